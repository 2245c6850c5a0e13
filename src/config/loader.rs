//! Configuration loading from the environment and an optional TOML file.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::env::ReadEnv;
use crate::config::schema::{RelayConfig, RelaySettings};
use crate::config::validation::{validate_settings, ValidationError};
use crate::routing::ProxyTemplate;
use crate::security::ProxyToken;

pub const PROXY_TOKEN_VAR: &str = "PROXY_TOKEN";
pub const PROXY_URL_VAR: &str = "PROXY_URL";
pub const CONFIG_PATH_VAR: &str = "RELAY_CONFIG";
pub const BIND_ADDRESS_VAR: &str = "RELAY_BIND_ADDRESS";
pub const UPSTREAM_TIMEOUT_VAR: &str = "RELAY_UPSTREAM_TIMEOUT_SECS";

/// Error type for configuration loading. Always fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to find {0} environment variable")]
    MissingVar(&'static str),

    #[error("{var} is not valid: {reason}")]
    InvalidVar { var: &'static str, reason: String },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load the relay configuration.
///
/// `PROXY_TOKEN` and `PROXY_URL` are required; an empty value counts as
/// missing. Settings come from the file named by `RELAY_CONFIG` when set,
/// then individual `RELAY_*` overrides apply.
pub fn load_config<E: ReadEnv>(env: &E) -> Result<RelayConfig, ConfigError> {
    let token = required(env, PROXY_TOKEN_VAR)?;
    let template = required(env, PROXY_URL_VAR)?;

    let mut settings = match env.var(CONFIG_PATH_VAR) {
        Ok(path) if !path.is_empty() => load_settings(Path::new(&path))?,
        _ => RelaySettings::default(),
    };
    apply_overrides(env, &mut settings)?;
    validate_settings(&settings).map_err(ConfigError::Validation)?;

    Ok(RelayConfig {
        token: ProxyToken::new(token),
        proxy_template: ProxyTemplate::new(template),
        settings,
    })
}

/// Parse settings from a TOML file.
pub fn load_settings(path: &Path) -> Result<RelaySettings, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn required<E: ReadEnv>(env: &E, var: &'static str) -> Result<String, ConfigError> {
    match env.var(var) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(ConfigError::MissingVar(var)),
    }
}

fn apply_overrides<E: ReadEnv>(env: &E, settings: &mut RelaySettings) -> Result<(), ConfigError> {
    if let Ok(addr) = env.var(BIND_ADDRESS_VAR) {
        settings.listener.bind_address = addr;
    }
    if let Ok(secs) = env.var(UPSTREAM_TIMEOUT_VAR) {
        settings.upstream.request_timeout_secs =
            secs.parse().map_err(|e: std::num::ParseIntError| ConfigError::InvalidVar {
                var: UPSTREAM_TIMEOUT_VAR,
                reason: e.to_string(),
            })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::env::MapEnv;

    fn base_env() -> MapEnv {
        MapEnv::new()
            .with(PROXY_TOKEN_VAR, "s3cret")
            .with(PROXY_URL_VAR, "http://proxy.example/{sessionId}")
    }

    #[test]
    fn loads_required_vars_with_default_settings() {
        let config = load_config(&base_env()).unwrap();
        assert!(config.token.matches(b"s3cret"));
        assert_eq!(config.proxy_template.as_str(), "http://proxy.example/{sessionId}");
        assert_eq!(config.settings, RelaySettings::default());
    }

    #[test]
    fn missing_token_names_the_variable() {
        let env = MapEnv::new().with(PROXY_URL_VAR, "http://proxy.example/{sessionId}");
        let err = load_config(&env).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar(PROXY_TOKEN_VAR)));
        assert!(err.to_string().contains("PROXY_TOKEN"));
    }

    #[test]
    fn missing_url_names_the_variable() {
        let env = MapEnv::new().with(PROXY_TOKEN_VAR, "s3cret");
        let err = load_config(&env).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar(PROXY_URL_VAR)));
        assert!(err.to_string().contains("PROXY_URL"));
    }

    #[test]
    fn empty_value_counts_as_missing() {
        let env = base_env().with(PROXY_TOKEN_VAR, "");
        assert!(matches!(
            load_config(&env),
            Err(ConfigError::MissingVar(PROXY_TOKEN_VAR))
        ));
    }

    #[test]
    fn env_overrides_apply() {
        let env = base_env()
            .with(BIND_ADDRESS_VAR, "127.0.0.1:9000")
            .with(UPSTREAM_TIMEOUT_VAR, "7");
        let config = load_config(&env).unwrap();
        assert_eq!(config.settings.listener.bind_address, "127.0.0.1:9000");
        assert_eq!(config.settings.upstream.request_timeout_secs, 7);
    }

    #[test]
    fn bad_timeout_override_is_rejected() {
        let env = base_env().with(UPSTREAM_TIMEOUT_VAR, "soon");
        assert!(matches!(
            load_config(&env),
            Err(ConfigError::InvalidVar { var: UPSTREAM_TIMEOUT_VAR, .. })
        ));
    }

    #[test]
    fn invalid_settings_fail_validation() {
        let env = base_env().with(UPSTREAM_TIMEOUT_VAR, "0");
        assert!(matches!(load_config(&env), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn settings_file_is_read() {
        let path = std::env::temp_dir().join(format!("maze-relay-{}.toml", std::process::id()));
        fs::write(&path, "[listener]\nbind_address = \"127.0.0.1:8123\"\n").unwrap();

        let env = base_env().with(CONFIG_PATH_VAR, path.to_string_lossy());
        let config = load_config(&env).unwrap();
        assert_eq!(config.settings.listener.bind_address, "127.0.0.1:8123");

        let _ = fs::remove_file(path);
    }

    #[test]
    fn unreadable_settings_file_is_fatal() {
        let env = base_env().with(CONFIG_PATH_VAR, "/nonexistent/maze-relay.toml");
        assert!(matches!(load_config(&env), Err(ConfigError::Io { .. })));
    }
}
