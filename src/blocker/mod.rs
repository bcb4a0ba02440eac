//! gRPC service blocking.
//!
//! # Data Flow
//! ```text
//! Incoming request (headers, path)
//!     → classify.rs (content-type contains "application/grpc"?)
//!         no  → forward to next stage
//!     → classify.rs (first path segment = service identifier)
//!     → gate.rs (exact match against denylist)
//!         hit  → 403 "This gRPC service is blocked"
//!         miss → forward to next stage
//! ```
//!
//! # Design Decisions
//! - Gate is immutable after construction and shared via Arc; no locks
//! - Decision is synchronous; only the forwarded call is async
//! - Granularity is the service, never the method
//! - Diagnostics go through a sink trait so decisions test without a subscriber

pub mod classify;
pub mod diagnostics;
pub mod gate;
pub mod layer;
pub mod middleware;

pub use classify::{is_grpc_content_type, is_grpc_request, service_name, GRPC_CONTENT_TYPE};
pub use diagnostics::{Diagnostic, DiagnosticSink, MemorySink, TracingSink};
pub use gate::{Gate, Verdict, BLOCKED_MESSAGE};
pub use layer::{blocked_response, GrpcBlocker, GrpcBlockerLayer};
pub use middleware::grpc_blocker_middleware;
