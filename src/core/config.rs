//! Connection configuration and validation.
//!
//! The embedding application owns config storage (profiles typically live
//! in a management database) and hands a fully-populated `ConnectConfig`
//! to the connector. Credential material arrives base64-encoded so it can
//! be stored as text columns.

use crate::core::error::{TrellisError, TrellisResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Connection configuration for one cluster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectConfig {
    /// Cluster endpoints (e.g., "127.0.0.1:2379"). Must be non-empty.
    pub address: Vec<String>,

    /// Enable TLS for the transport.
    #[serde(default)]
    pub tls_enable: bool,

    /// Client certificate, base64-encoded PEM.
    #[serde(default)]
    pub cert: String,

    /// Client private key, base64-encoded PEM.
    #[serde(default)]
    pub key: String,

    /// CA certificate bundle, base64-encoded PEM.
    #[serde(default)]
    pub ca: String,

    /// Username for store authentication. Empty disables auth.
    #[serde(default)]
    pub username: String,

    /// Password for store authentication.
    #[serde(default)]
    pub password: String,

    /// Dial timeout in milliseconds.
    #[serde(default = "default_dial_timeout_ms")]
    pub dial_timeout_ms: u64,

    /// Per-call request timeout in milliseconds.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

fn default_dial_timeout_ms() -> u64 {
    10_000
}

fn default_request_timeout_ms() -> u64 {
    5_000
}

impl ConnectConfig {
    /// Create a plaintext, unauthenticated configuration for the given
    /// endpoints with default timeouts.
    pub fn new(address: Vec<String>) -> Self {
        Self {
            address,
            tls_enable: false,
            cert: String::new(),
            key: String::new(),
            ca: String::new(),
            username: String::new(),
            password: String::new(),
            dial_timeout_ms: default_dial_timeout_ms(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }

    /// Set username/password authentication.
    pub fn with_user(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = username.into();
        self.password = password.into();
        self
    }

    /// Enable TLS with base64-encoded PEM material.
    pub fn with_tls(
        mut self,
        cert: impl Into<String>,
        key: impl Into<String>,
        ca: impl Into<String>,
    ) -> Self {
        self.tls_enable = true;
        self.cert = cert.into();
        self.key = key.into();
        self.ca = ca.into();
        self
    }

    /// Validate the configuration before a connection attempt.
    ///
    /// TLS material is checked before the address list, so an incomplete
    /// TLS block is reported even when no endpoints are given.
    pub fn validate(&self) -> TrellisResult<()> {
        if self.tls_enable && (self.cert.is_empty() || self.key.is_empty() || self.ca.is_empty()) {
            return Err(TrellisError::TlsConfigMissing);
        }
        if self.address.is_empty() {
            return Err(TrellisError::EmptyAddress);
        }
        Ok(())
    }

    /// Dial timeout as a Duration.
    pub fn dial_timeout(&self) -> Duration {
        Duration::from_millis(self.dial_timeout_ms)
    }

    /// Request timeout as a Duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}
