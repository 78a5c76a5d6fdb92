//! Error types for the Trellis rendering-context framework.

use crate::capability::CapabilityKey;
use thiserror::Error;

/// Context lookup errors
///
/// Any of these aborts the render step that triggered the lookup.
#[derive(Debug, Error)]
pub enum ContextError {
    #[error("Capability {0} was not remembered.")]
    CapabilityNotFound(CapabilityKey),

    #[error("Slot named '{0}' was not filled.")]
    SlotNotFilled(String),

    #[error("No request context above this context")]
    NoRequestContext,

    #[error("Failed to construct capability {key}: {source}")]
    Construction {
        key: CapabilityKey,
        #[source]
        source: anyhow::Error,
    },

    #[error("Capability {key} is not a {expected}")]
    TypeMismatch {
        key: CapabilityKey,
        expected: &'static str,
    },
}

impl ContextError {
    /// Whether this is the "nothing remembered" failure of a lookup.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ContextError::CapabilityNotFound(_))
    }
}

/// DOM helper errors
#[derive(Debug, Error)]
pub enum DomError {
    #[error("Node lookup failed: {0}")]
    NodeLookup(String),

    #[error("No substitution for '%({0})s'")]
    MissingSubstitution(String),
}

/// Errors surfaced to callers of the setup layers (config, logging, CLI)
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Context error: {0}")]
    Context(#[from] ContextError),

    #[error("DOM error: {0}")]
    Dom(#[from] DomError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Output error: {0}")]
    OutputError(String),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
