//! Diagnostic events emitted by the gate when logging is enabled.

use std::fmt;
use std::sync::Mutex;

/// One diagnostic step of a gRPC request passing through the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diagnostic<'a> {
    /// A gRPC request arrived. `path` has its leading `/` stripped.
    Received { path: &'a str },
    /// The service identifier was extracted.
    Extracted {
        service: &'a str,
        blocked: &'a [String],
    },
    /// The request is being rejected.
    Blocked { service: &'a str },
}

impl fmt::Display for Diagnostic<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::Received { path } => {
                write!(f, "gRPC request received - Full path: {}", path)
            }
            Diagnostic::Extracted { service, blocked } => write!(
                f,
                "Extracted service name: {}, blocked services: {:?}",
                service, blocked
            ),
            Diagnostic::Blocked { service } => {
                write!(f, "Blocking request to service: {}", service)
            }
        }
    }
}

/// Anything that accepts gate diagnostics.
///
/// Sinks must not fail: whatever happens inside `record` has no bearing on
/// the forward/reject decision.
pub trait DiagnosticSink: Send + Sync {
    fn record(&self, event: &Diagnostic<'_>);
}

/// Writes diagnostics through `tracing` at info level.
///
/// Turning on `enable_logging` is the opt-in, so the lines must survive the
/// default `info` filter.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn record(&self, event: &Diagnostic<'_>) {
        match event {
            Diagnostic::Received { path } => {
                tracing::info!(path = %path, "{}", event);
            }
            Diagnostic::Extracted { service, blocked } => {
                tracing::info!(service = %service, blocked = ?blocked, "{}", event);
            }
            Diagnostic::Blocked { service } => {
                tracing::info!(service = %service, "{}", event);
            }
        }
    }
}

/// Keeps rendered diagnostic lines in memory.
///
/// Used by tests and by hosts that want to inspect decisions after the fact.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every line recorded so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .map(|lines| lines.clone())
            .unwrap_or_default()
    }
}

impl DiagnosticSink for MemorySink {
    fn record(&self, event: &Diagnostic<'_>) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push(event.to_string());
        }
    }
}
