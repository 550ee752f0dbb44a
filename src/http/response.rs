//! Error-to-response mapping.
//!
//! # Responsibilities
//! - Define the relay's own failure taxonomy
//! - Map each failure to exactly one HTTP status code
//! - Render failures as `{error, message}` JSON bodies
//!
//! Upstream 4xx/5xx are deliberately absent here: those are BookStack's
//! errors and pass through to the client verbatim.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::config::CredentialError;

/// Terminal failures the relay itself can produce. None is retried.
#[derive(Debug, Error)]
pub enum RelayError {
    /// Configuration file could not be read at startup.
    #[error("Configuration file not found")]
    ConfigMissing { path: String },

    /// A required credential field is empty or still a template placeholder.
    #[error("Configuration incomplete")]
    ConfigIncomplete(#[from] CredentialError),

    /// Request used a method other than GET (OPTIONS is handled earlier).
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// The `endpoint` query parameter was absent or empty.
    #[error("Missing endpoint parameter")]
    MissingEndpoint,

    /// The `endpoint` value contained a parent-directory sequence.
    #[error("Invalid endpoint")]
    InvalidEndpoint,

    /// The upstream call failed at the transport level
    /// (connect error, timeout, TLS failure).
    #[error("Failed to connect to BookStack API")]
    UpstreamUnreachable(#[source] reqwest::Error),
}

impl RelayError {
    /// HTTP status this failure surfaces as.
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::ConfigMissing { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            RelayError::ConfigIncomplete(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RelayError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            RelayError::MissingEndpoint => StatusCode::BAD_REQUEST,
            RelayError::InvalidEndpoint => StatusCode::BAD_REQUEST,
            RelayError::UpstreamUnreachable(_) => StatusCode::BAD_GATEWAY,
        }
    }

    /// Human-readable detail for the `message` field, where one exists.
    /// The two endpoint validation failures carry `error` only.
    fn message(&self) -> Option<String> {
        match self {
            RelayError::ConfigMissing { path } => Some(format!(
                "Please copy relay.example.toml to {path} and configure your credentials"
            )),
            RelayError::ConfigIncomplete(e) => Some(e.to_string()),
            RelayError::MethodNotAllowed => Some("Only GET requests are supported".to_string()),
            RelayError::MissingEndpoint | RelayError::InvalidEndpoint => None,
            RelayError::UpstreamUnreachable(e) => Some(e.to_string()),
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status();
        let mut body = json!({ "error": self.to_string() });
        if let Some(message) = self.message() {
            body["message"] = json!(message);
        }
        (status, Json(body)).into_response()
    }
}
