//! Plain-text response construction for the pattern mux.
//!
//! # Design Decisions
//! - Every response carries an exact-size `Full` body so the access log can
//!   report its length without buffering
//! - Content type matches what the standard library sniffs for text bodies

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{self, HeaderValue};
use hyper::{Response, StatusCode};

pub type MuxResponse = Response<Full<Bytes>>;

pub const TEXT_PLAIN_UTF8: &str = "text/plain; charset=utf-8";

/// Build a `text/plain` response with the given status and body.
pub fn text(status: StatusCode, body: impl Into<Bytes>) -> MuxResponse {
    let mut response = Response::new(Full::new(body.into()));
    *response.status_mut() = status;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(TEXT_PLAIN_UTF8),
    );
    response
}

pub fn not_found() -> MuxResponse {
    text(StatusCode::NOT_FOUND, "404 page not found\n")
}

pub fn bad_request(body: &'static str) -> MuxResponse {
    text(StatusCode::BAD_REQUEST, body)
}

/// 405 with an `Allow` header listing the methods the path accepts.
pub fn method_not_allowed(allowed: &[String]) -> MuxResponse {
    let mut response = text(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed\n");
    if let Ok(value) = HeaderValue::from_str(&allowed.join(", ")) {
        response.headers_mut().insert(header::ALLOW, value);
    }
    response
}

/// 301 pointing at `location`: the cleaned path, or `path + "/"` for a subtree pattern.
pub fn moved_permanently(location: &str) -> MuxResponse {
    let mut response = text(StatusCode::MOVED_PERMANENTLY, "");
    if let Ok(value) = HeaderValue::from_str(location) {
        response.headers_mut().insert(header::LOCATION, value);
    }
    response
}
