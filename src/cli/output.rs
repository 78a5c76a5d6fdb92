//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::{ApiError, ContextError};

/// Map domain/service errors to a string for CLI output.
pub fn map_error(e: &ApiError) -> String {
    match e {
        ApiError::Context(ContextError::CapabilityNotFound(key)) => {
            format!("Not found: capability '{}' is not remembered by the site", key)
        }
        ApiError::Context(ContextError::SlotNotFilled(name)) => {
            format!("Not found: slot '{}' is not filled", name)
        }
        _ => e.to_string(),
    }
}
