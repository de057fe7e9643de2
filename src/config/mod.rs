//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! DemoConfig::default()            (what the binary runs with)
//!     or
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → DemoConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - All fields have defaults; the defaults are the demo's fixed addresses
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{DemoConfig, ListenerConfig, ObservabilityConfig};
