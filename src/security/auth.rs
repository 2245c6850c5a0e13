//! Caller authentication against the shared proxy token.

use std::fmt;

use axum::http::{HeaderMap, HeaderName};
use subtle::ConstantTimeEq;
use thiserror::Error;

/// Header carrying the caller's token.
pub const TOKEN_HEADER: HeaderName = HeaderName::from_static("x-proxy-token");

/// Application error code returned on every denial.
pub const DENIED_CODE: u32 = 20017;

/// Message returned on every denial.
pub const DENIED_MESSAGE: &str = "The Maze isn't meant for you 👽👽👽";

/// The process-wide shared secret. `Debug` never prints the value.
#[derive(Clone)]
pub struct ProxyToken(String);

impl ProxyToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Constant-time comparison. Length mismatch rejects immediately.
    pub fn matches(&self, candidate: &[u8]) -> bool {
        let expected = self.0.as_bytes();
        if expected.len() != candidate.len() {
            return false;
        }
        expected.ct_eq(candidate).into()
    }

    /// Authorize a request by its headers.
    pub fn authorize(&self, headers: &HeaderMap) -> Result<(), AuthError> {
        match headers.get(&TOKEN_HEADER) {
            Some(value) if self.matches(value.as_bytes()) => Ok(()),
            Some(_) => Err(AuthError::Mismatch),
            None => Err(AuthError::Missing),
        }
    }
}

impl fmt::Debug for ProxyToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ProxyToken(<redacted>)")
    }
}

/// Why a caller was denied. Only used for logs; the response is identical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("x-proxy-token header missing")]
    Missing,

    #[error("x-proxy-token does not match")]
    Mismatch,
}
