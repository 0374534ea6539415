//! Trellis - tree-structured client adapter for etcd v3 clusters.
//!
//! Trellis wraps the flat keyspace of an etcd v3 cluster in a virtual
//! directory tree. A prefix scan over slash-delimited keys is materialized
//! into a sorted, deduplicated, one-level-deep listing in which deeper keys
//! collapse into virtual directories, while write operations layer an
//! overwrite-protection policy over the raw store.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Embedding application                       │
//! │                 (management UI, CLI, tooling)                   │
//! └─────────────────────────────────────────────────────────────────┘
//!                                  │
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                          Client handle                          │
//! │      list │ get │ add │ put │ del │ members │ close             │
//! └─────────────────────────────────────────────────────────────────┘
//!                     │                          │
//! ┌────────────────────────────────┐  ┌─────────────────────────────┐
//! │      Tree materialization      │  │     Member inspection       │
//! │  flat keys → one-level nodes   │  │  roster + liveness probes   │
//! └────────────────────────────────┘  └─────────────────────────────┘
//!                                  │
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      etcd v3 cluster (gRPC)                     │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Module Organization
//!
//! - [`core::config`] - Connection configuration and validation
//! - [`core::error`] - Error taxonomy
//! - [`net::tls`] - TLS material decoding
//! - [`tree`] - Flat-key-to-tree materialization
//! - [`client`] - Connection factory, catalog operations, cluster inspection
//!
//! # Usage
//!
//! ```no_run
//! use trellis::{ConnectConfig, Connector};
//!
//! # async fn demo() -> trellis::TrellisResult<()> {
//! let connector = Connector::new();
//! let config = ConnectConfig::new(vec!["127.0.0.1:2379".to_string()]);
//! let client = connector.connect(Some(&config)).await?;
//!
//! for node in client.list("/services").await? {
//!     println!("{} dir={} value={}", node.path, node.is_dir, node.value);
//! }
//! client.close();
//! # Ok(())
//! # }
//! ```

// Core infrastructure
pub mod core;

// Networking material
pub mod net;

// Flat-key-to-tree conversion
pub mod tree;

// Client handle and operations
pub mod client;

// Re-exports for convenience
pub use self::core::config::ConnectConfig;
pub use self::core::error::{TrellisError, TrellisResult};
pub use client::{Client, Connector, Health, Member, Role, StatusReport};
pub use tree::Node;
