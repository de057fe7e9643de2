//! TCP listener binding.
//!
//! # Responsibilities
//! - Resolve the configured address (`host:port`, `ip:port` or `:port`)
//! - Bind a Tokio `TcpListener`
//! - Report bind failures with the address that failed

use tokio::net::TcpListener;

use crate::config::ListenerConfig;

/// Error type for listener operations.
#[derive(Debug, thiserror::Error)]
pub enum ListenerError {
    /// Failed to bind to address.
    #[error("Failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },
}

/// Bind to the configured address.
pub async fn bind(config: &ListenerConfig) -> Result<TcpListener, ListenerError> {
    let address = config.socket_address();
    let listener = TcpListener::bind(address.as_str())
        .await
        .map_err(|source| ListenerError::Bind {
            address: address.clone(),
            source,
        })?;

    if let Ok(local_addr) = listener.local_addr() {
        tracing::info!(
            configured = %config.bind_address,
            address = %local_addr,
            "Listener bound"
        );
    }

    Ok(listener)
}
