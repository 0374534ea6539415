//! Common test utilities.
//!
//! Shared helpers for integration tests. Import with `mod common;` in
//! test files.

#![allow(dead_code)]

use trellis::ConnectConfig;

/// Borrow string pairs as the byte pairs the tree converter consumes.
pub fn as_entries<'a>(
    pairs: &'a [(&str, &str)],
) -> impl Iterator<Item = (&'a [u8], &'a [u8])> {
    pairs.iter().map(|(k, v)| (k.as_bytes(), v.as_bytes()))
}

/// A plaintext single-endpoint configuration.
pub fn local_config() -> ConnectConfig {
    ConnectConfig::new(vec![local_endpoint()])
}

/// Endpoint used by the live tests; override with TRELLIS_TEST_ENDPOINT.
pub fn local_endpoint() -> String {
    std::env::var("TRELLIS_TEST_ENDPOINT").unwrap_or_else(|_| "127.0.0.1:2379".to_string())
}

/// A config carrying syntactically valid (but not usable) TLS material.
pub fn tls_config() -> ConnectConfig {
    // "cert" / "key" / "ca" in base64
    local_config().with_tls("Y2VydA==", "a2V5", "Y2E=")
}
