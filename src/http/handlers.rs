//! Endpoint handlers shared by both routers.
//!
//! The bodies differ only in their router prefix, so responses can be
//! attributed to the router that produced them.

use axum::extract::Path;
use hyper::StatusCode;

use crate::http::response::{self, MuxResponse};
use crate::routing::mux::RequestContext;

/// Which router a handler is mounted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouterFlavor {
    /// Third-party router with router-wide middleware (axum).
    Chi,
    /// Pattern mux over the low-level HTTP library (hyper + matchit).
    StdLib,
}

impl RouterFlavor {
    pub fn label(self) -> &'static str {
        match self {
            RouterFlavor::Chi => "Chi",
            RouterFlavor::StdLib => "StdLib",
        }
    }
}

impl std::fmt::Display for RouterFlavor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

pub fn path_body(flavor: RouterFlavor) -> String {
    format!("{}: Hit GET path endpoint\n", flavor)
}

pub fn task_body(flavor: RouterFlavor, id: &str) -> String {
    format!("{}: Hit GET task by id={{{}}} endpoint\n", flavor, id)
}

// axum handlers

pub async fn chi_path() -> String {
    path_body(RouterFlavor::Chi)
}

pub async fn chi_task(Path(id): Path<String>) -> String {
    task_body(RouterFlavor::Chi, &id)
}

// mux handlers

pub fn stdlib_path(_ctx: &RequestContext) -> MuxResponse {
    response::text(StatusCode::OK, path_body(RouterFlavor::StdLib))
}

pub fn stdlib_task(ctx: &RequestContext) -> MuxResponse {
    let id = ctx.path_value("id").unwrap_or_default();
    response::text(StatusCode::OK, task_body(RouterFlavor::StdLib, id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bodies() {
        assert_eq!(path_body(RouterFlavor::Chi), "Chi: Hit GET path endpoint\n");
        assert_eq!(
            task_body(RouterFlavor::StdLib, "f0cd2e"),
            "StdLib: Hit GET task by id={f0cd2e} endpoint\n"
        );
    }
}
