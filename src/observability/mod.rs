//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Subsystems emit `tracing` events:
//!     → access lines (http::middleware::logger)
//!     → lifecycle events (listening, bind failures, task exits)
//!     → logging.rs subscriber (fmt layer, stdout)
//! ```

pub mod logging;
