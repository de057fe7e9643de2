//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Build routers → spawn chi server ─┐
//!                   → spawn mux server ─┴→ join both
//! ```
//!
//! # Design Decisions
//! - The two servers share nothing; a failure in one leaves the other running
//! - No shutdown path: the process is stopped from outside (signal/kill)

pub mod startup;

pub use startup::{run, spawn_server, ServerExit};
