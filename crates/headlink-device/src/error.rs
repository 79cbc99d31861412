//! Error types for device construction.

use thiserror::Error;

/// Errors raised while constructing devices or their identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeviceError {
    /// A device unique id must contain at least one byte.
    #[error("Device unique id must not be empty")]
    EmptyUniqueId,

    /// A Bluetooth address string could not be parsed.
    #[error("Invalid MAC address: {0}")]
    InvalidMacAddress(String),

    /// Every application handle has been allocated once.
    #[error("Application handles exhausted")]
    ApplicationHandlesExhausted,

    /// A deserialized application table is inconsistent.
    #[error("Invalid application table: {0}")]
    InvalidApplicationTable(String),
}

impl DeviceError {
    /// Create an invalid MAC address error.
    #[must_use]
    pub fn invalid_mac_address(address: impl Into<String>) -> Self {
        Self::InvalidMacAddress(address.into())
    }

    /// Create an invalid application table error.
    #[must_use]
    pub fn invalid_application_table(reason: impl Into<String>) -> Self {
        Self::InvalidApplicationTable(reason.into())
    }
}

/// A specialized `Result` type for device operations.
pub type DeviceResult<T> = std::result::Result<T, DeviceError>;
