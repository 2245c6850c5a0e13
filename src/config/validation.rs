//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, body limit > 0)
//! - Check the bind address parses
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RelaySettings → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::RelaySettings;

/// A single semantic problem in the loaded settings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address {0:?} is not a socket address")]
    BindAddress(String),

    #[error("listener.max_body_size must be greater than zero")]
    ZeroBodyLimit,

    #[error("upstream.{0} must be greater than zero")]
    ZeroTimeout(&'static str),
}

pub fn validate_settings(settings: &RelaySettings) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if settings.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(
            settings.listener.bind_address.clone(),
        ));
    }
    if settings.listener.max_body_size == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }
    if settings.upstream.connect_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("connect_timeout_secs"));
    }
    if settings.upstream.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("request_timeout_secs"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(validate_settings(&RelaySettings::default()).is_ok());
    }

    #[test]
    fn reports_every_problem() {
        let mut settings = RelaySettings::default();
        settings.listener.bind_address = "localhost".into();
        settings.listener.max_body_size = 0;
        settings.upstream.request_timeout_secs = 0;

        let errors = validate_settings(&settings).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::BindAddress("localhost".into()),
                ValidationError::ZeroBodyLimit,
                ValidationError::ZeroTimeout("request_timeout_secs"),
            ]
        );
    }
}
