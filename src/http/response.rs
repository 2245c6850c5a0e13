//! Response handling and transformation.
//!
//! # Responsibilities
//! - Hold the buffered upstream response
//! - Write status, flattened headers and raw body back to the caller
//!
//! # Design Decisions
//! - Body bytes are relayed untouched
//! - Header flattening policy lives in `security::headers`

use std::collections::BTreeMap;

use axum::{
    body::{Body, Bytes},
    http::{HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};

/// A fully buffered upstream response, ready to relay.
#[derive(Debug, Clone)]
pub struct ForwardResponse {
    pub status: StatusCode,
    pub headers: BTreeMap<String, String>,
    pub body: Bytes,
}

impl IntoResponse for ForwardResponse {
    fn into_response(self) -> Response {
        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() = self.status;

        let headers = response.headers_mut();
        for (name, value) in self.headers {
            // Both halves came from a parsed HeaderMap.
            if let (Ok(name), Ok(value)) = (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(&value),
            ) {
                headers.insert(name, value);
            }
        }

        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn relays_status_headers_and_bytes() {
        let payload = Bytes::from_static(&[0x89, b'P', b'N', b'G', 0x00, 0xff]);
        let forward = ForwardResponse {
            status: StatusCode::IM_A_TEAPOT,
            headers: BTreeMap::from([
                ("content-type".to_string(), "image/png".to_string()),
                ("x-upstream".to_string(), "a, b".to_string()),
            ]),
            body: payload.clone(),
        };

        let response = forward.into_response();
        assert_eq!(response.status(), StatusCode::IM_A_TEAPOT);
        assert_eq!(response.headers()["content-type"], "image/png");
        assert_eq!(response.headers()["x-upstream"], "a, b");

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(body, payload);
    }
}
