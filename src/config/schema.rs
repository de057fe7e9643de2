//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the demo.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Listener for the axum router.
    pub chi: ListenerConfig,

    /// Listener for the pattern mux.
    pub stdlib: ListenerConfig,

    /// Logging settings.
    pub observability: ObservabilityConfig,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            chi: ListenerConfig::new(":8091"),
            stdlib: ListenerConfig::new("localhost:8090"),
            observability: ObservabilityConfig::default(),
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ListenerConfig {
    /// Bind address. Accepts `host:port`, `ip:port` or `:port` (all interfaces).
    pub bind_address: String,
}

impl ListenerConfig {
    pub fn new(bind_address: impl Into<String>) -> Self {
        Self {
            bind_address: bind_address.into(),
        }
    }

    /// Address in a form `TcpListener::bind` resolves; `:port` becomes `0.0.0.0:port`.
    pub fn socket_address(&self) -> String {
        let address = self.bind_address.trim();
        if address.starts_with(':') {
            format!("0.0.0.0{}", address)
        } else {
            address.to_string()
        }
    }
}

/// Observability settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Default `tracing` filter directive; `RUST_LOG` takes precedence.
    pub log_filter: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_filter: "route_compare=info".to_string(),
        }
    }
}
