//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::{body::Body, http::Request, Router};
use tokio::net::TcpListener;

use grpc_blocker::{AppConfig, BlockerConfig, HttpServer};

/// Counts requests that reached the stage after the gate.
#[derive(Clone, Default)]
pub struct CallCounter(Arc<AtomicUsize>);

impl CallCounter {
    pub fn get(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }

    pub fn hit(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

/// Router whose every route answers 200 "upstream" and counts the call.
#[allow(dead_code)]
pub fn counting_router(counter: CallCounter) -> Router {
    Router::new().fallback(move |request: Request<Body>| {
        let counter = counter.clone();
        async move {
            counter.hit();
            format!("upstream {}", request.uri().path())
        }
    })
}

/// Start a mock upstream on an ephemeral port.
#[allow(dead_code)]
pub async fn start_mock_upstream(counter: CallCounter) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = counting_router(counter);

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    addr
}

/// Start the blocker server in front of `upstream`.
///
/// Returns its address and a sender that shuts it down.
#[allow(dead_code)]
pub async fn start_blocker(
    upstream: SocketAddr,
    blocker: BlockerConfig,
) -> (SocketAddr, tokio::sync::oneshot::Sender<()>) {
    let mut config = AppConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.upstream.address = upstream.to_string();
    config.upstream.http2_only = false;
    config.blocker = blocker;

    let listener = TcpListener::bind(&config.listener.bind_address).await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = HttpServer::new(config).unwrap();
    let (tx, rx) = tokio::sync::oneshot::channel::<()>();

    tokio::spawn(async move {
        let _ = server
            .run_until(listener, async {
                let _ = rx.await;
            })
            .await;
    });

    (addr, tx)
}
