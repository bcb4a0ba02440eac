//! Tower middleware wrapping any downstream service with the gate.

use std::sync::Arc;
use std::task::{Context, Poll};

use axum::http::{Request, Response, StatusCode};
use futures_util::future::{ready, Either, Ready};
use tower::{Layer, Service};

use crate::blocker::gate::{Gate, Verdict, BLOCKED_MESSAGE};
use crate::config::{BlockerConfig, ConfigError};

/// Build the rejection response: 403 with a plain body and no extra headers.
pub fn blocked_response<B>() -> Response<B>
where
    B: From<&'static str>,
{
    let mut response = Response::new(B::from(BLOCKED_MESSAGE));
    *response.status_mut() = StatusCode::FORBIDDEN;
    response
}

/// Layer that applies [`GrpcBlocker`] to a service.
#[derive(Debug, Clone)]
pub struct GrpcBlockerLayer {
    gate: Arc<Gate>,
}

impl GrpcBlockerLayer {
    pub fn new(config: &BlockerConfig) -> Result<Self, ConfigError> {
        Ok(Self::from_gate(Arc::new(Gate::new(config)?)))
    }

    pub fn from_gate(gate: Arc<Gate>) -> Self {
        Self { gate }
    }
}

impl<S> Layer<S> for GrpcBlockerLayer {
    type Service = GrpcBlocker<S>;

    fn layer(&self, inner: S) -> Self::Service {
        GrpcBlocker {
            inner,
            gate: self.gate.clone(),
        }
    }
}

/// Rejects gRPC calls to denylisted services and forwards everything else
/// to `inner` untouched.
#[derive(Debug, Clone)]
pub struct GrpcBlocker<S> {
    inner: S,
    gate: Arc<Gate>,
}

impl<S> GrpcBlocker<S> {
    pub fn new(config: &BlockerConfig, inner: S) -> Result<Self, ConfigError> {
        Ok(GrpcBlockerLayer::new(config)?.layer(inner))
    }

    pub fn gate(&self) -> &Gate {
        &self.gate
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for GrpcBlocker<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>>,
    ResBody: From<&'static str>,
{
    type Response = Response<ResBody>;
    type Error = S::Error;
    type Future = Either<Ready<Result<Self::Response, Self::Error>>, S::Future>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request<ReqBody>) -> Self::Future {
        match self.gate.intercept(&request) {
            Verdict::Block { .. } => Either::Left(ready(Ok(blocked_response()))),
            Verdict::Forward => Either::Right(self.inner.call(request)),
        }
    }
}
