//! Two HTTP routers, side by side.
//!
//! - `chi`: axum router, access log applied as a router-wide layer
//! - `stdlib`: method-aware pattern mux over hyper, access log wrapped around
//!   each handler
//!
//! Both serve `GET /path/` and `GET /task/{id}/` and log one line per handled
//! request with its processing time, so the two can be compared.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod routing;

pub use config::schema::DemoConfig;
pub use http::HttpServer;
pub use routing::ServeMux;
