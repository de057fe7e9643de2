//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! ListenerConfig
//!     → listener.rs (resolve `:port` shorthand, bind)
//!     → TcpListener handed to the HTTP server runner
//! ```

pub mod listener;

pub use listener::{bind, ListenerError};
