//! # Validation Errors
//!
//! Construction-time failures for the core domain primitives, built with
//! `thiserror`. No `Box<dyn Error>`, no `.unwrap()` outside tests.

use thiserror::Error;

/// Errors raised when a core domain primitive cannot be constructed.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// A timestamp string, epoch value, or clock computation could not
    /// be represented.
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),
}
