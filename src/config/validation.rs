//! Credential validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Detect fields left empty
//! - Detect fields still holding their template placeholder value
//!
//! # Design Decisions
//! - Validation is a pure function: RelayConfig → Result<(), CredentialError>
//! - Runs on every request, not at startup, so a template config produces
//!   a diagnostic response instead of a dead process

use thiserror::Error;

use crate::config::schema::RelayConfig;

/// Reserved marker that template values start with. A credential beginning
/// with this prefix has not been edited since the example config was copied.
pub const PLACEHOLDER_MARKER: &str = "YOUR_";

/// A credential field that cannot be used as configured.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialError {
    /// Required field is empty.
    #[error("Please configure '{0}' in the relay config file")]
    MissingField(&'static str),

    /// Field still holds its template placeholder value.
    #[error("'{0}' is still set to its template placeholder, please configure it")]
    Placeholder(&'static str),
}

impl CredentialError {
    /// Name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            CredentialError::MissingField(field) => field,
            CredentialError::Placeholder(field) => field,
        }
    }
}

/// Check that every required credential field is usable.
///
/// First violation wins; field order matches the config file layout.
pub fn validate_credentials(config: &RelayConfig) -> Result<(), CredentialError> {
    let required = [
        ("bookstack_url", &config.upstream.bookstack_url),
        ("api_token_id", &config.upstream.api_token_id),
        ("api_token_secret", &config.upstream.api_token_secret),
    ];

    for (name, value) in required {
        if value.is_empty() {
            return Err(CredentialError::MissingField(name));
        }
        if value.starts_with(PLACEHOLDER_MARKER) {
            return Err(CredentialError::Placeholder(name));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::RelayConfig;

    fn configured() -> RelayConfig {
        let mut config = RelayConfig::default();
        config.upstream.bookstack_url = "https://docs.example.com".to_string();
        config.upstream.api_token_id = "token-id".to_string();
        config.upstream.api_token_secret = "token-secret".to_string();
        config
    }

    #[test]
    fn test_valid_credentials() {
        assert_eq!(validate_credentials(&configured()), Ok(()));
    }

    #[test]
    fn test_default_config_is_incomplete() {
        let result = validate_credentials(&RelayConfig::default());
        assert_eq!(result, Err(CredentialError::MissingField("bookstack_url")));
    }

    #[test]
    fn test_empty_secret() {
        let mut config = configured();
        config.upstream.api_token_secret = String::new();
        assert_eq!(
            validate_credentials(&config),
            Err(CredentialError::MissingField("api_token_secret"))
        );
    }

    #[test]
    fn test_placeholder_detected() {
        let mut config = configured();
        config.upstream.api_token_id = "YOUR_TOKEN_ID_HERE".to_string();
        assert_eq!(
            validate_credentials(&config),
            Err(CredentialError::Placeholder("api_token_id"))
        );
    }

    #[test]
    fn test_placeholder_url() {
        let mut config = configured();
        config.upstream.bookstack_url = "YOUR_BOOKSTACK_URL_HERE".to_string();
        let err = validate_credentials(&config).unwrap_err();
        assert_eq!(err.field(), "bookstack_url");
        assert!(err.to_string().contains("bookstack_url"));
    }

    #[test]
    fn test_marker_only_matches_prefix() {
        let mut config = configured();
        // The marker must anchor at the start; a token merely containing it
        // is a legitimate (if odd) secret.
        config.upstream.api_token_secret = "abcYOUR_xyz".to_string();
        assert_eq!(validate_credentials(&config), Ok(()));
    }
}
