//! Low-level flavour: pattern mux over hyper, logger wrapped per handler.

use std::sync::Arc;

use crate::http::handlers::{self, RouterFlavor};
use crate::http::middleware::logged;
use crate::routing::{MuxError, ServeMux};

/// Build the pattern mux with both endpoints registered.
pub fn mux() -> Result<ServeMux, MuxError> {
    let mut mux = ServeMux::new();
    mux.handle(
        "GET /path/",
        logged(RouterFlavor::StdLib, Arc::new(handlers::stdlib_path)),
    )?;
    mux.handle(
        "GET /task/{id}/",
        logged(RouterFlavor::StdLib, Arc::new(handlers::stdlib_task)),
    )?;
    Ok(mux)
}
