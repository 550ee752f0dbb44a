//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the relay.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the relay.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RelayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Upstream BookStack instance and API credentials.
    pub upstream: UpstreamConfig,

    /// Origins allowed to call the relay from a browser.
    /// A `"*"` entry allows any origin.
    pub allowed_origins: Vec<String>,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            listener: ListenerConfig::default(),
            upstream: UpstreamConfig::default(),
            allowed_origins: vec!["*".to_string()],
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Upstream BookStack instance and the credentials used to call it.
///
/// Credentials live only in this server-side structure. They are attached to
/// outbound requests as an `Authorization` header and must never appear in a
/// response body or a log field.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// BookStack base URL, with or without a trailing slash
    /// (e.g., "https://docs.example.com").
    pub bookstack_url: String,

    /// API token ID, generated from the BookStack user profile.
    pub api_token_id: String,

    /// API token secret paired with the token ID.
    pub api_token_secret: String,
}
