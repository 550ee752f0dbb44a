//! BookStack API relay.
//!
//! A server-side relay that keeps BookStack API credentials away from the
//! browser. Clients call the relay with an `endpoint` query parameter; the
//! relay validates the request, attaches the token header, forwards the
//! call to `<bookstack_url>/api/<endpoint>`, and returns the upstream
//! response verbatim. Read-only by construction: only GET (and CORS
//! preflight OPTIONS) requests are accepted.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod upstream;

pub use config::{ConfigState, RelayConfig};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
