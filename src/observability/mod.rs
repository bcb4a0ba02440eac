//! Observability subsystem.
//!
//! Only structured logging lives here. Gate diagnostics reach the
//! subscriber through `blocker::TracingSink`.

pub mod logging;

pub use logging::init_logging;
