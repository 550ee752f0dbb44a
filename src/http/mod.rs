//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, relay handler gate sequence)
//!     → cors.rs (origin negotiation, headers on every gated response)
//!     → upstream subsystem (authenticated BookStack call)
//!     → response.rs (relay failures → JSON error responses)
//! ```

pub mod cors;
pub mod response;
pub mod server;

pub use response::RelayError;
pub use server::HttpServer;
