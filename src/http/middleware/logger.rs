//! Access logging middleware.
//!
//! Emits one line per request in the form
//! ```text
//! "GET http://localhost:8090/task/f0cd2e/ HTTP/1.1" from 127.0.0.1:51234 - 200 45B in 14.573µs
//! ```
//! The timestamp is prepended by the subscriber's fmt layer.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};
use hyper::body::Body as _;
use hyper::header::{self, HeaderMap};
use hyper::{Method, StatusCode, Uri, Version};

use crate::http::handlers::RouterFlavor;
use crate::routing::mux::{Handler, RequestContext};

/// One completed request, as written to the access log.
#[derive(Debug, Clone)]
pub struct AccessLogEntry {
    pub router: RouterFlavor,
    pub method: Method,
    pub url: String,
    pub version: Version,
    pub remote: Option<SocketAddr>,
    pub status: StatusCode,
    pub bytes: u64,
    pub elapsed: Duration,
}

impl AccessLogEntry {
    pub fn emit(&self) {
        tracing::info!(
            router = %self.router,
            method = %self.method,
            status = self.status.as_u16(),
            bytes = self.bytes,
            elapsed_us = self.elapsed.as_micros() as u64,
            "{}",
            self
        );
    }
}

impl std::fmt::Display for AccessLogEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "\"{} {} {:?}\" from ", self.method, self.url, self.version)?;
        match self.remote {
            Some(addr) => write!(f, "{}", addr)?,
            None => f.write_str("-")?,
        }
        write!(
            f,
            " - {} {}B in {:?}",
            self.status.as_u16(),
            self.bytes,
            self.elapsed
        )
    }
}

/// Absolute request URL: origin-form targets are prefixed with `http://` and the Host header.
pub fn request_url(uri: &Uri, headers: &HeaderMap) -> String {
    if uri.authority().is_some() {
        return uri.to_string();
    }
    let host = headers
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .unwrap_or_default();
    let target = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");
    format!("http://{}{}", host, target)
}

/// Router-wide axum middleware. Attach with `from_fn_with_state(flavor, access_log)`.
pub async fn access_log(
    State(router): State<RouterFlavor>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let url = request_url(request.uri(), request.headers());
    let version = request.version();
    let remote = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);

    let response = next.run(request).await;

    AccessLogEntry {
        router,
        method,
        url,
        version,
        remote,
        status: response.status(),
        bytes: response.body().size_hint().exact().unwrap_or(0),
        elapsed: start.elapsed(),
    }
    .emit();

    response
}

/// Wrap a single mux handler so each invocation is logged.
pub fn logged(router: RouterFlavor, handler: Handler) -> Handler {
    Arc::new(move |ctx: &RequestContext| {
        let start = Instant::now();
        let response = handler(ctx);
        // hyper drops the body of a HEAD response
        let bytes = if *ctx.method() == Method::HEAD {
            0
        } else {
            response.body().size_hint().exact().unwrap_or(0)
        };

        AccessLogEntry {
            router,
            method: ctx.method().clone(),
            url: request_url(ctx.uri(), ctx.headers()),
            version: ctx.version(),
            remote: ctx.remote(),
            status: response.status(),
            bytes,
            elapsed: start.elapsed(),
        }
        .emit();

        response
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(remote: Option<SocketAddr>) -> AccessLogEntry {
        AccessLogEntry {
            router: RouterFlavor::StdLib,
            method: Method::GET,
            url: "http://localhost:8090/task/f0cd2e/".to_string(),
            version: Version::HTTP_11,
            remote,
            status: StatusCode::OK,
            bytes: 45,
            elapsed: Duration::from_nanos(14_573),
        }
    }

    #[test]
    fn test_line_format() {
        let line = entry(Some("127.0.0.1:51234".parse().unwrap())).to_string();
        assert_eq!(
            line,
            "\"GET http://localhost:8090/task/f0cd2e/ HTTP/1.1\" from 127.0.0.1:51234 - 200 45B in 14.573µs"
        );
    }

    #[test]
    fn test_line_without_remote() {
        let line = entry(None).to_string();
        assert!(line.contains("from - - 200"));
    }

    #[test]
    fn test_request_url_origin_form() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, "localhost:8091".parse().unwrap());
        let uri: Uri = "/task/7/?x=1".parse().unwrap();
        assert_eq!(request_url(&uri, &headers), "http://localhost:8091/task/7/?x=1");
    }

    #[test]
    fn test_request_url_absolute_form() {
        let uri: Uri = "http://example.com/path/".parse().unwrap();
        assert_eq!(request_url(&uri, &HeaderMap::new()), "http://example.com/path/");
    }
}
