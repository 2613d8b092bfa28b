//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses and value ranges
//! - Reject target hosts that are URLs rather than bare hosts
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RedirectorConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::RedirectorConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid bind address '{0}'")]
    BindAddress(String),

    #[error("target host '{0}' must be a bare host, optionally with a port")]
    TargetHost(String),

    #[error("host query parameter '{0}' must not contain whitespace")]
    HostQueryParam(String),

    #[error("invalid metrics address '{0}'")]
    MetricsAddress(String),
}

/// Parse a listen address.
///
/// The `:port` shorthand binds `[::]:port`, which accepts IPv4 clients too
/// on dual-stack hosts. Hostnames are not resolved.
pub fn parse_bind_address(address: &str) -> Option<SocketAddr> {
    if address.starts_with(':') {
        return format!("[::]{}", address).parse().ok();
    }
    address.parse().ok()
}

/// Check a loaded configuration, collecting every problem found.
pub fn validate_config(config: &RedirectorConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if parse_bind_address(&config.listener.bind_address).is_none() {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    let target_host = &config.redirect.target_host;
    if !is_bare_host(target_host) {
        errors.push(ValidationError::TargetHost(target_host.clone()));
    }

    let param = &config.redirect.host_query_param;
    if param.chars().any(char::is_whitespace) {
        errors.push(ValidationError::HostQueryParam(param.clone()));
    }

    let observability = &config.observability;
    if observability.metrics_enabled
        && observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Empty is allowed: it disables host rewriting.
fn is_bare_host(host: &str) -> bool {
    !host.chars().any(|c| {
        c.is_whitespace() || c.is_control() || matches!(c, '/' | '?' | '#' | '@' | '\\')
    })
}
