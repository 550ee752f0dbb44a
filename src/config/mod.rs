//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize, failure → ConfigState::Missing)
//!     → ConfigState (immutable, shared via Arc with every request)
//!     → validation.rs (credential checks, per request)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults to allow minimal configs
//! - A missing/broken file keeps the server up and answering with a
//!   configuration error, matching what an operator debugging a fresh
//!   install needs to see

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError, ConfigState};
pub use schema::{ListenerConfig, RelayConfig, UpstreamConfig};
pub use validation::{validate_credentials, CredentialError};
