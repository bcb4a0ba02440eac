//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, trace, timeout)
//!     → blocker gate (403 for denylisted gRPC services)
//!     → upstream.rs (rewrite URI, relay to upstream)
//!     → Send upstream response to client
//! ```

pub mod server;
pub mod upstream;

pub use server::HttpServer;
pub use upstream::{forward_handler, Upstream};
