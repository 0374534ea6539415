//! Error taxonomy.
//!
//! Trellis exposes a closed set of error conditions instead of opaque
//! sentinel values. Construction failures abort with no partial handle;
//! single-item operations propagate the first error; multi-item
//! aggregations (listing, member inspection) degrade per item and never
//! surface these errors for individual misses.

use std::time::Duration;
use thiserror::Error;

/// Error conditions surfaced by the adapter.
#[derive(Debug, Error)]
pub enum TrellisError {
    /// No connection configuration was supplied.
    #[error("connection config is missing")]
    ConfigMissing,

    /// TLS is enabled but certificate, key, or CA material is empty.
    #[error("tls is enabled but certificate, key, or CA material is missing")]
    TlsConfigMissing,

    /// The endpoint address list is empty.
    #[error("no endpoint addresses configured")]
    EmptyAddress,

    /// Transport or authentication failure while establishing the handle.
    #[error("failed to connect to the cluster: {source}")]
    Connection {
        #[source]
        source: etcd_client::Error,
    },

    /// Read miss on an exact key.
    #[error("key not found: {key}")]
    KeyNotFound { key: String },

    /// Conditional add aborted because the key already holds a value.
    #[error("key already exists: {key}")]
    AlreadyExists { key: String },

    /// Malformed key, value, or credential bytes.
    #[error("decoding failed: {message}")]
    Decoding { message: String },

    /// A remote call exceeded its deadline.
    #[error("{operation} exceeded its {deadline:?} deadline")]
    Timeout {
        operation: &'static str,
        deadline: Duration,
    },

    /// Generic passthrough failure from the underlying store.
    #[error("store error: {0}")]
    Store(#[from] etcd_client::Error),
}

impl TrellisError {
    /// Create a KeyNotFound error for the given key.
    pub fn key_not_found(key: impl Into<String>) -> Self {
        Self::KeyNotFound { key: key.into() }
    }

    /// Create an AlreadyExists error for the given key.
    pub fn already_exists(key: impl Into<String>) -> Self {
        Self::AlreadyExists { key: key.into() }
    }

    /// Create a Decoding error.
    pub fn decoding(message: impl Into<String>) -> Self {
        Self::Decoding {
            message: message.into(),
        }
    }

    /// Create a Timeout error for the named operation.
    pub fn timeout(operation: &'static str, deadline: Duration) -> Self {
        Self::Timeout {
            operation,
            deadline,
        }
    }

    /// Create a Connection error wrapping the transport failure.
    pub fn connection(source: etcd_client::Error) -> Self {
        Self::Connection { source }
    }

    /// Check if this error is a read miss.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::KeyNotFound { .. })
    }

    /// Check if this error is a deadline expiry.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Check if this error was raised before any connection was attempted.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::ConfigMissing | Self::TlsConfigMissing | Self::EmptyAddress
        )
    }
}

/// Result type using TrellisError.
pub type TrellisResult<T> = Result<T, TrellisError>;
