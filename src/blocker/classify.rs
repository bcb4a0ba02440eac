//! Request classification: protocol detection and service extraction.

use std::borrow::Cow;

use axum::http::{header::CONTENT_TYPE, HeaderMap};

/// Media-type token identifying gRPC traffic.
pub const GRPC_CONTENT_TYPE: &str = "application/grpc";

/// Check if a content-type value marks a gRPC request.
///
/// Plain substring match, case-sensitive. `application/grpc+proto` and
/// `application/grpc-web` both qualify.
pub fn is_grpc_content_type(content_type: &str) -> bool {
    content_type.contains(GRPC_CONTENT_TYPE)
}

/// Content-type of a request, or `""` when the header is absent.
///
/// Only the first value is consulted. Borrows when the value is visible
/// ASCII; otherwise bytes are replaced lossily, which keeps any ASCII token
/// in the value intact.
pub fn content_type(headers: &HeaderMap) -> Cow<'_, str> {
    match headers.get(CONTENT_TYPE) {
        Some(value) => match value.to_str() {
            Ok(text) => Cow::Borrowed(text),
            Err(_) => String::from_utf8_lossy(value.as_bytes()),
        },
        None => Cow::Borrowed(""),
    }
}

/// Check if a request carries gRPC traffic.
pub fn is_grpc_request(headers: &HeaderMap) -> bool {
    is_grpc_content_type(&content_type(headers))
}

/// Strip one leading `/` from a request path.
pub fn service_path(path: &str) -> &str {
    path.strip_prefix('/').unwrap_or(path)
}

/// Extract the service identifier from a request path.
///
/// The identifier is the first segment after a single leading `/`, so
/// `/pkg.Service/Method` yields `pkg.Service`. Returns `None` when that
/// segment is empty (`/`, `""`, `//Method`).
pub fn service_name(path: &str) -> Option<&str> {
    service_path(path)
        .split('/')
        .next()
        .filter(|segment| !segment.is_empty())
}
