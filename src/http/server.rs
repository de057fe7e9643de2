//! HTTP server runner.
//!
//! # Responsibilities
//! - Serve one router on one already-bound listener
//! - axum flavour: `axum::serve` with peer addresses as `ConnectInfo`
//! - mux flavour: accept loop, one task per connection, hyper HTTP/1.1
//!
//! # States
//! ```text
//! created → listening → (serving requests)* → terminated
//! ```
//! There is no shutdown path; a server runs until a fatal error or process exit.
//! Accept errors caused by a single peer are skipped; resource exhaustion
//! (EMFILE, ENOBUFS, ...) is retried with a growing delay.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::Request;
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;

use crate::routing::ServeMux;

/// Error type for a running server.
#[derive(Debug, thiserror::Error)]
pub enum ServeError {
    #[error("Listener unusable: {0}")]
    Listener(#[source] std::io::Error),

    #[error("Failed to accept: {0}")]
    Accept(#[source] std::io::Error),

    #[error("Server error: {0}")]
    Io(#[source] std::io::Error),
}

/// The router a server dispatches to.
#[derive(Clone)]
pub enum App {
    Chi(axum::Router),
    StdLib(Arc<ServeMux>),
}

/// A named HTTP server, ready to run on a listener.
pub struct HttpServer {
    name: &'static str,
    app: App,
}

impl HttpServer {
    pub fn new(name: &'static str, app: App) -> Self {
        Self { name, app }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Serve requests until a fatal error. Under normal operation this never returns.
    pub async fn run(self, listener: TcpListener) -> Result<(), ServeError> {
        let addr = listener.local_addr().map_err(ServeError::Listener)?;
        tracing::info!(server = self.name, address = %addr, "HTTP server listening");

        match self.app {
            App::Chi(router) => {
                let app = router.into_make_service_with_connect_info::<SocketAddr>();
                axum::serve(listener, app).await.map_err(ServeError::Io)
            }
            App::StdLib(mux) => serve_mux(self.name, listener, mux).await,
        }
    }
}

async fn serve_mux(
    name: &'static str,
    listener: TcpListener,
    mux: Arc<ServeMux>,
) -> Result<(), ServeError> {
    let mut backoff = AcceptBackoff::default();
    loop {
        let (stream, remote) = match listener.accept().await {
            Ok(accepted) => {
                backoff.reset();
                accepted
            }
            Err(e) => match classify_accept_error(&e) {
                AcceptFailure::Connection => {
                    tracing::debug!(server = name, error = %e, "Peer dropped before accept");
                    continue;
                }
                AcceptFailure::Temporary => {
                    let delay = backoff.next_delay();
                    tracing::error!(server = name, error = %e, retry_in = ?delay, "Accept error");
                    tokio::time::sleep(delay).await;
                    continue;
                }
                AcceptFailure::Fatal => return Err(ServeError::Accept(e)),
            },
        };
        tracing::debug!(server = name, peer_addr = %remote, "Connection accepted");

        let mux = mux.clone();
        tokio::spawn(async move {
            let service = service_fn(move |request: Request<Incoming>| {
                let response = mux.dispatch(request, Some(remote));
                async move { Ok::<_, Infallible>(response) }
            });

            if let Err(e) = http1::Builder::new()
                .serve_connection(TokioIo::new(stream), service)
                .await
            {
                tracing::debug!(server = name, peer_addr = %remote, error = %e, "Connection error");
            }
        });
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AcceptFailure {
    /// The pending connection failed; the listener is fine.
    Connection,
    /// Out of descriptors, buffers or memory; retry later.
    Temporary,
    /// The listener itself is broken.
    Fatal,
}

fn classify_accept_error(e: &std::io::Error) -> AcceptFailure {
    use std::io::ErrorKind;

    match e.kind() {
        ErrorKind::ConnectionRefused
        | ErrorKind::ConnectionAborted
        | ErrorKind::ConnectionReset
        | ErrorKind::Interrupted
        | ErrorKind::WouldBlock => AcceptFailure::Connection,
        ErrorKind::InvalidInput | ErrorKind::NotConnected | ErrorKind::Unsupported => {
            AcceptFailure::Fatal
        }
        _ => AcceptFailure::Temporary,
    }
}

/// Delay between retries after temporary accept errors: 5ms doubling up to 1s.
#[derive(Debug, Default)]
struct AcceptBackoff {
    current: Option<Duration>,
}

impl AcceptBackoff {
    const INITIAL: Duration = Duration::from_millis(5);
    const MAX: Duration = Duration::from_secs(1);

    fn next_delay(&mut self) -> Duration {
        let delay = match self.current {
            None => Self::INITIAL,
            Some(current) => (current * 2).min(Self::MAX),
        };
        self.current = Some(delay);
        delay
    }

    fn reset(&mut self) {
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::{chi, stdlib};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;

    async fn raw_get(addr: SocketAddr, path: &str) -> String {
        let mut stream = TcpStream::connect(addr).await.unwrap();
        let request = format!(
            "GET {} HTTP/1.1\r\nHost: {}\r\nConnection: close\r\n\r\n",
            path, addr
        );
        stream.write_all(request.as_bytes()).await.unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();
        response
    }

    async fn spawn(app: App) -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(HttpServer::new("test", app).run(listener));
        addr
    }

    #[tokio::test]
    async fn test_mux_over_socket() {
        let addr = spawn(App::StdLib(Arc::new(stdlib::mux().unwrap()))).await;
        let response = raw_get(addr, "/task/abc/").await;
        assert!(response.starts_with("HTTP/1.1 200 OK"));
        assert!(response.ends_with("StdLib: Hit GET task by id={abc} endpoint\n"));
    }

    #[tokio::test]
    async fn test_axum_over_socket() {
        let addr = spawn(App::Chi(chi::router())).await;
        let response = raw_get(addr, "/path/").await;
        assert!(response.starts_with("HTTP/1.1 200 OK"));
        assert!(response.ends_with("Chi: Hit GET path endpoint\n"));
    }

    #[test]
    fn test_accept_errors_are_classified() {
        use std::io::{Error, ErrorKind};

        let emfile = Error::from_raw_os_error(24);
        assert_eq!(classify_accept_error(&emfile), AcceptFailure::Temporary);
        assert_eq!(
            classify_accept_error(&Error::from(ErrorKind::ConnectionAborted)),
            AcceptFailure::Connection
        );
        assert_eq!(
            classify_accept_error(&Error::from(ErrorKind::OutOfMemory)),
            AcceptFailure::Temporary
        );
        assert_eq!(
            classify_accept_error(&Error::from(ErrorKind::InvalidInput)),
            AcceptFailure::Fatal
        );
    }

    #[test]
    fn test_accept_backoff_grows_and_resets() {
        let mut backoff = AcceptBackoff::default();
        assert_eq!(backoff.next_delay(), Duration::from_millis(5));
        assert_eq!(backoff.next_delay(), Duration::from_millis(10));
        for _ in 0..10 {
            backoff.next_delay();
        }
        assert_eq!(backoff.next_delay(), Duration::from_secs(1));

        backoff.reset();
        assert_eq!(backoff.next_delay(), Duration::from_millis(5));
    }

    #[test]
    fn test_listener_error_message() {
        let err = ServeError::Listener(std::io::Error::from(std::io::ErrorKind::NotConnected));
        assert!(err.to_string().starts_with("Listener unusable: "));
    }

    #[tokio::test]
    async fn test_mux_not_found_over_socket() {
        let addr = spawn(App::StdLib(Arc::new(stdlib::mux().unwrap()))).await;
        let response = raw_get(addr, "/unknown/").await;
        assert!(response.starts_with("HTTP/1.1 404 Not Found"));
    }
}
