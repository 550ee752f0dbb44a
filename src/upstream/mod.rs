//! Upstream BookStack API subsystem.
//!
//! # Data Flow
//! ```text
//! validated endpoint + pass-through params
//!     → build_target_url (base + /api/ + endpoint + re-encoded query)
//!     → UpstreamClient::fetch (GET, token auth header, 30s timeout)
//!     → (status, body bytes) relayed verbatim by the handler
//! ```

pub mod client;

pub use client::{auth_header, build_target_url, UpstreamClient};
