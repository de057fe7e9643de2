//! Request middleware.
//!
//! Both routers use the same access logger; only the attachment point differs:
//! - axum: one `from_fn` layer over the whole router (every request is logged)
//! - mux: each handler is wrapped at registration (unmatched requests are not)

pub mod logger;

pub use logger::{access_log, logged, AccessLogEntry};
