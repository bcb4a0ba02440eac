//! The forward-or-reject decision.

use std::fmt;
use std::sync::Arc;

use axum::http::Request;

use crate::blocker::classify::{content_type, is_grpc_content_type, service_name, service_path};
use crate::blocker::diagnostics::{Diagnostic, DiagnosticSink, TracingSink};
use crate::config::{validate_blocker, BlockerConfig, ConfigError};

/// Body of every rejection response.
pub const BLOCKED_MESSAGE: &str = "This gRPC service is blocked";

/// Outcome of inspecting one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Hand the request to the next stage unchanged.
    Forward,
    /// Reject with 403; the named service is on the denylist.
    Block { service: String },
}

impl Verdict {
    pub fn is_blocked(&self) -> bool {
        matches!(self, Verdict::Block { .. })
    }
}

/// Immutable denylist plus an optional diagnostics sink.
///
/// Shared behind `Arc` by every middleware clone; nothing in here changes
/// after construction.
pub struct Gate {
    blocked_services: Vec<String>,
    diagnostics: Option<Arc<dyn DiagnosticSink>>,
}

impl Gate {
    /// Build a gate from config. Diagnostics go to `tracing` when enabled.
    pub fn new(config: &BlockerConfig) -> Result<Self, ConfigError> {
        Self::with_sink(config, Arc::new(TracingSink))
    }

    /// Build a gate that reports diagnostics to `sink` when enabled.
    ///
    /// Never fails today; the `Result` is kept for future config checks.
    /// Entries that can never match a service (empty, or containing `/`)
    /// are kept and only warned about, so they simply never block.
    pub fn with_sink(
        config: &BlockerConfig,
        sink: Arc<dyn DiagnosticSink>,
    ) -> Result<Self, ConfigError> {
        if let Err(problems) = validate_blocker(config) {
            for problem in &problems {
                tracing::warn!(problem = %problem, "Blocked service entry can never match");
            }
        }

        Ok(Self {
            blocked_services: config.blocked_services.clone(),
            diagnostics: config.enable_logging.then_some(sink),
        })
    }

    pub fn blocked_services(&self) -> &[String] {
        &self.blocked_services
    }

    /// Decide what to do with a request. Never touches the request.
    pub fn intercept<B>(&self, request: &Request<B>) -> Verdict {
        self.decide(&content_type(request.headers()), request.uri().path())
    }

    /// Decide from a raw content-type value and request path.
    pub fn decide(&self, content_type: &str, path: &str) -> Verdict {
        if !is_grpc_content_type(content_type) {
            return Verdict::Forward;
        }

        self.emit(Diagnostic::Received {
            path: service_path(path),
        });

        let service = service_name(path).unwrap_or_default();
        self.emit(Diagnostic::Extracted {
            service,
            blocked: &self.blocked_services,
        });

        if !service.is_empty() && self.is_blocked(service) {
            self.emit(Diagnostic::Blocked { service });
            return Verdict::Block {
                service: service.to_string(),
            };
        }

        Verdict::Forward
    }

    /// Exact, case-sensitive membership test.
    pub fn is_blocked(&self, service: &str) -> bool {
        self.blocked_services.iter().any(|blocked| blocked == service)
    }

    fn emit(&self, event: Diagnostic<'_>) {
        if let Some(sink) = &self.diagnostics {
            sink.record(&event);
        }
    }
}

impl fmt::Debug for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gate")
            .field("blocked_services", &self.blocked_services)
            .field("diagnostics", &self.diagnostics.is_some())
            .finish()
    }
}
