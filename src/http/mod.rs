//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (axum::serve, or hyper http1 per connection)
//!     → router (axum Router / ServeMux)
//!     → middleware/logger.rs (access line)
//!     → handlers.rs (fixed text bodies)
//!     → response.rs (text/plain responses for the mux)
//! ```

pub mod handlers;
pub mod middleware;
pub mod response;
pub mod server;

pub use handlers::RouterFlavor;
pub use server::{App, HttpServer, ServeError};
