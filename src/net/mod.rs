//! Networking material.
//!
//! Transport behavior itself is delegated to the store client; this module
//! only prepares what the transport needs:
//! - [`tls`] - TLS material decoding

pub mod tls;
