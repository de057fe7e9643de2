//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     chi::router()  → axum Router (routes + access_log layer + fallback)
//!     stdlib::mux()  → ServeMux (each handler wrapped in `logged`)
//!
//! Per request (mux):
//!     "GET /task/42/"
//!     → pattern lookup (method table, HEAD→GET, method-less table)
//!     → PathValues { id: "42" }
//!     → handler(&RequestContext)
//! ```
//!
//! # Design Decisions
//! - Route tables are built once at startup, immutable at runtime
//! - Matching is owned by libraries (axum / matchit); this module only
//!   supplies patterns and handlers

pub mod chi;
pub mod mux;
pub mod pattern;
pub mod stdlib;

pub use mux::{Handler, PathValues, RequestContext, ServeMux};
pub use pattern::Pattern;

/// Error type for mux route registration.
#[derive(Debug, thiserror::Error)]
pub enum MuxError {
    #[error("invalid pattern {pattern:?}: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("pattern {pattern:?} conflicts with already registered {existing:?}")]
    Conflict { pattern: String, existing: String },
}
