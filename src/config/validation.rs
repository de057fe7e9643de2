//! Configuration validation.
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Pure function: DemoConfig → Result<(), Vec<ValidationError>>

use crate::config::schema::DemoConfig;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0}: bind address is empty")]
    EmptyBindAddress(&'static str),

    #[error("chi and stdlib both bind {0}")]
    SharedBindAddress(String),
}

pub fn validate_config(config: &DemoConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    for (name, listener) in [("chi", &config.chi), ("stdlib", &config.stdlib)] {
        if listener.bind_address.trim().is_empty() {
            errors.push(ValidationError::EmptyBindAddress(name));
        }
    }

    let chi = config.chi.socket_address();
    if !chi.is_empty() && chi == config.stdlib.socket_address() {
        errors.push(ValidationError::SharedBindAddress(chi));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
