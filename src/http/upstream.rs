//! Forwarding of allowed requests to the upstream server.

use std::str::FromStr;

use axum::{
    body::Body,
    extract::State,
    http::{
        header::{CONNECTION, TRANSFER_ENCODING, UPGRADE},
        uri::{Authority, PathAndQuery, Scheme},
        HeaderMap, Request, StatusCode, Uri,
    },
    response::{IntoResponse, Response},
};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};

use crate::config::{ConfigError, UpstreamConfig, ValidationError};

/// Client handle plus the upstream authority requests are rewritten to.
#[derive(Clone)]
pub struct Upstream {
    client: Client<HttpConnector, Body>,
    authority: Authority,
}

impl Upstream {
    pub fn new(config: &UpstreamConfig) -> Result<Self, ConfigError> {
        let authority = Authority::from_str(&config.address).map_err(|_| {
            ConfigError::Validation(vec![ValidationError::InvalidAddress {
                field: "upstream.address",
                value: config.address.clone(),
            }])
        })?;

        let client = Client::builder(TokioExecutor::new())
            .http2_only(config.http2_only)
            .build(HttpConnector::new());

        Ok(Self { client, authority })
    }

    pub fn authority(&self) -> &Authority {
        &self.authority
    }

    /// Point a request URI at the upstream, keeping path and query.
    fn rewrite(&self, uri: &Uri) -> Uri {
        let mut parts = uri.clone().into_parts();
        parts.scheme = Some(Scheme::HTTP);
        parts.authority = Some(self.authority.clone());
        if parts.path_and_query.is_none() {
            parts.path_and_query = Some(PathAndQuery::from_static("/"));
        }
        Uri::from_parts(parts).unwrap_or_else(|_| uri.clone())
    }
}

/// Drop connection-scoped headers that must not cross a hop.
///
/// `te: trailers` is left alone; gRPC relies on it.
fn strip_hop_by_hop(headers: &mut HeaderMap) {
    for name in [CONNECTION, TRANSFER_ENCODING, UPGRADE] {
        headers.remove(name);
    }
    headers.remove("keep-alive");
    headers.remove("proxy-connection");
}

/// Relay a request upstream and stream the response back.
pub async fn forward_handler(State(upstream): State<Upstream>, request: Request<Body>) -> Response {
    let (mut parts, body) = request.into_parts();
    let path = parts.uri.path().to_string();
    parts.uri = upstream.rewrite(&parts.uri);
    strip_hop_by_hop(&mut parts.headers);

    tracing::debug!(
        path = %path,
        upstream = %upstream.authority,
        "Forwarding request"
    );

    let request = Request::from_parts(parts, body);
    match upstream.client.request(request).await {
        Ok(response) => {
            let response: Response<hyper::body::Incoming> = response;
            let (parts, body) = response.into_parts();
            Response::from_parts(parts, Body::new(body))
        }
        Err(e) => {
            tracing::error!(path = %path, error = %e, "Upstream error");
            (StatusCode::BAD_GATEWAY, "Upstream request failed").into_response()
        }
    }
}
