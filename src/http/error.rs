//! Per-request failures and their HTTP rendering.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::http::request::{FieldError, ValidationErrors};
use crate::security::{AuthError, DENIED_CODE, DENIED_MESSAGE};
use crate::upstream::UpstreamError;

/// Everything that can end a `/proxy` call early.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

#[derive(Serialize)]
struct DeniedBody {
    code: u32,
    message: &'static str,
}

#[derive(Serialize)]
struct InvalidBody<'a> {
    message: &'static str,
    issues: &'a [FieldError],
}

#[derive(Serialize)]
struct UpstreamBody {
    message: &'static str,
    kind: &'static str,
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        match self {
            Self::Validation(errors) => {
                tracing::debug!(error = %errors, "Rejected invalid forward request");
                let body = InvalidBody {
                    message: "invalid forward request",
                    issues: &errors.0,
                };
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
            Self::Auth(reason) => {
                tracing::warn!(reason = %reason, "Rejected unauthorized forward request");
                let body = DeniedBody {
                    code: DENIED_CODE,
                    message: DENIED_MESSAGE,
                };
                (StatusCode::FORBIDDEN, Json(body)).into_response()
            }
            Self::Upstream(err) => {
                tracing::warn!(error = %err, kind = err.kind(), "Upstream failure");
                let body = UpstreamBody {
                    message: "upstream request failed",
                    kind: err.kind(),
                };
                (err.status(), Json(body)).into_response()
            }
        }
    }
}
