//! gRPC service blocker.
//!
//! Middleware that rejects gRPC calls to a configured denylist of services
//! with `403 This gRPC service is blocked`, and passes every other request
//! to the next stage untouched.
//!
//! ```no_run
//! use grpc_blocker::{BlockerConfig, GrpcBlockerLayer};
//! use tower::ServiceBuilder;
//! # fn wrap<S>(upstream: S) -> Result<(), grpc_blocker::config::ConfigError> {
//! let config = BlockerConfig::new(["myapp.AdminService"], false);
//! let service = ServiceBuilder::new()
//!     .layer(GrpcBlockerLayer::new(&config)?)
//!     .service(upstream);
//! # let _ = service;
//! # Ok(())
//! # }
//! ```

pub mod blocker;
pub mod config;
pub mod http;
pub mod observability;

pub use blocker::{Gate, GrpcBlocker, GrpcBlockerLayer, Verdict, BLOCKED_MESSAGE};
pub use config::{AppConfig, BlockerConfig};
pub use http::HttpServer;
