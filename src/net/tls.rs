//! TLS material decoding.
//!
//! Credential material is stored base64-encoded (text-safe for config
//! databases) and decoded here into PEM blobs for the store client's TLS
//! stack. Decode failures surface as errors rather than silently producing
//! an empty trust store.

use crate::core::config::ConnectConfig;
use crate::core::error::{TrellisError, TrellisResult};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use etcd_client::{Certificate, Identity, TlsOptions};

/// Decoded TLS material for one connection.
#[derive(Debug, Clone)]
pub struct TlsMaterial {
    /// Client certificate in PEM format.
    pub cert_pem: Vec<u8>,
    /// Client private key in PEM format.
    pub key_pem: Vec<u8>,
    /// CA certificate bundle in PEM format.
    pub ca_pem: Vec<u8>,
}

impl TlsMaterial {
    /// Decode the base64 PEM blobs carried by a configuration.
    ///
    /// The caller is expected to have validated that all three fields are
    /// present; this only rejects malformed encoding.
    pub fn decode(config: &ConnectConfig) -> TrellisResult<Self> {
        Ok(Self {
            cert_pem: decode_pem_blob("certificate", &config.cert)?,
            key_pem: decode_pem_blob("private key", &config.key)?,
            ca_pem: decode_pem_blob("CA certificate", &config.ca)?,
        })
    }

    /// Build the store client's TLS options: client identity plus root CA.
    pub fn into_tls_options(self) -> TlsOptions {
        TlsOptions::new()
            .identity(Identity::from_pem(self.cert_pem, self.key_pem))
            .ca_certificate(Certificate::from_pem(self.ca_pem))
    }
}

fn decode_pem_blob(what: &'static str, encoded: &str) -> TrellisResult<Vec<u8>> {
    STANDARD
        .decode(encoded.trim())
        .map_err(|err| TrellisError::decoding(format!("{} is not valid base64: {}", what, err)))
}
