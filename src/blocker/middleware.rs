//! Axum middleware function form of the gate.
//!
//! For routers assembled with `middleware::from_fn_with_state`.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};

use crate::blocker::gate::{Gate, Verdict};
use crate::blocker::layer::blocked_response;

pub async fn grpc_blocker_middleware(
    State(gate): State<Arc<Gate>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    match gate.intercept(&request) {
        Verdict::Forward => next.run(request).await,
        Verdict::Block { .. } => blocked_response(),
    }
}
