//! Configuration loading from disk.

use std::path::Path;

use thiserror::Error;

use crate::config::schema::RelayConfig;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Load configuration from a TOML file.
///
/// Credential completeness is deliberately not checked here: an incomplete
/// config must still produce a running server that reports the problem on
/// every request (see [`crate::config::validation`]).
pub fn load_config(path: &Path) -> Result<RelayConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: RelayConfig = toml::from_str(&content)?;
    Ok(config)
}

/// Configuration as observed by the request path.
///
/// A missing or unreadable config file does not abort startup. The server
/// runs and answers every request with a configuration error, so the operator
/// sees the same diagnostic a client does.
#[derive(Debug)]
pub enum ConfigState {
    /// The file could not be read or parsed. The path is kept for the
    /// error message.
    Missing { path: String },

    /// Parsed configuration, immutable for the process lifetime.
    Loaded(RelayConfig),
}

impl ConfigState {
    /// Load the config file, downgrading any failure to `Missing`.
    pub fn load(path: &Path) -> Self {
        match load_config(path) {
            Ok(config) => Self::Loaded(config),
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Configuration unavailable, serving errors until fixed"
                );
                Self::Missing {
                    path: path.display().to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_file() {
        let result = load_config(Path::new("/nonexistent/relay.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_state_downgrades_failure() {
        let state = ConfigState::load(Path::new("/nonexistent/relay.toml"));
        match state {
            ConfigState::Missing { path } => assert!(path.contains("relay.toml")),
            ConfigState::Loaded(_) => panic!("missing file must not load"),
        }
    }
}
