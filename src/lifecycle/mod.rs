//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Shutdown::trigger
//!
//! Shutdown (shutdown.rs):
//!     broadcast fires → server stops accepting → in-flight drain → exit
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
