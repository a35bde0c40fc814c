//! Shared helpers for integration tests: a canned HTTP server on an ephemeral port.

#![allow(dead_code)]

use axum::Router;
use petscout::Config;
use tokio::net::TcpListener;

/// Serves `app` on `127.0.0.1:0` and returns its base URL.
pub async fn serve(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// A base URL nothing is listening on.
pub async fn closed_port() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

pub fn config(base_url: &str) -> Config {
    Config {
        base_url: base_url.to_string(),
        request_timeout_secs: 5,
        ..Config::default()
    }
}
