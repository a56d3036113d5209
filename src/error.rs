//! Error types for sable

use thiserror::Error;

/// Result type for sable operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for sable
///
/// Configuration state never fails a capability call: a disabled group
/// degrades the operation to a no-op or an empty result. The only error this
/// crate produces itself is rejecting an unrecognized capability-group name
/// while constructing or mutating a configuration record. Failures raised by
/// a caller-supplied dispatch function keep the caller's own error type and
/// pass through the behavior operations untouched.
#[derive(Debug, Error)]
pub enum Error {
    /// Unrecognized capability-group name
    #[error("invalid configuration: unknown capability group '{field}'")]
    InvalidConfiguration { field: String },
}

impl Error {
    /// Create an invalid-configuration error for an unknown group name
    pub fn invalid_configuration(field: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            field: field.into(),
        }
    }
}
