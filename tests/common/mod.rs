//! Shared utilities for integration and load testing.

use std::net::SocketAddr;
use std::sync::Arc;

use route_compare::http::{App, HttpServer};
use route_compare::routing::{chi, stdlib};
use tokio::net::TcpListener;

/// Addresses of a running pair of servers.
#[allow(dead_code)]
pub struct Servers {
    pub chi: SocketAddr,
    pub stdlib: SocketAddr,
}

/// Start `server` on an ephemeral localhost port.
pub async fn start(server: HttpServer) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = server.run(listener).await;
    });
    addr
}

/// Start both routers, each on its own ephemeral port.
#[allow(dead_code)]
pub async fn start_both() -> Servers {
    let chi = start(HttpServer::new("chi", App::Chi(chi::router()))).await;
    let stdlib = start(HttpServer::new(
        "stdlib",
        App::StdLib(Arc::new(stdlib::mux().unwrap())),
    ))
    .await;
    Servers { chi, stdlib }
}

/// Client without connection pooling or proxies, as the proxy tests use.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
