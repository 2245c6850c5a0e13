//! Header handling for relayed responses.
//!
//! # Responsibilities
//! - Strip hop-by-hop headers
//! - Flatten multi-valued headers to one string per name
//!
//! # Design Decisions
//! - Duplicate names are joined with ", " in arrival order
//! - `set-cookie` cannot be comma-joined safely; the last value wins
//! - `content-length` is dropped and recomputed from the buffered body

use std::collections::BTreeMap;

use axum::http::{header, HeaderMap, HeaderName};

/// Headers scoped to a single connection that must not be relayed.
const HOP_BY_HOP: [&str; 8] = [
    "connection",
    "keep-alive",
    "proxy-connection",
    "proxy-authenticate",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
];

pub fn is_hop_by_hop(name: &HeaderName) -> bool {
    HOP_BY_HOP.contains(&name.as_str())
}

/// Collapse an upstream header map into one value per name.
pub fn flatten(headers: &HeaderMap) -> BTreeMap<String, String> {
    let mut flat: BTreeMap<String, String> = BTreeMap::new();

    for name in headers.keys() {
        if is_hop_by_hop(name) || *name == header::CONTENT_LENGTH {
            continue;
        }

        let values = headers
            .get_all(name)
            .iter()
            .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned());

        let value = if *name == header::SET_COOKIE {
            values.last()
        } else {
            Some(values.collect::<Vec<_>>().join(", "))
        };

        if let Some(value) = value {
            flat.insert(name.as_str().to_string(), value);
        }
    }

    flat
}
