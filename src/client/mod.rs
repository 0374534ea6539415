//! Client handle and operations.
//!
//! - [`kv`] - Catalog operations (list/get/add/put/del)
//! - [`cluster`] - Member inspection
//!
//! [`Connector`] builds authenticated handles; all connection builds in a
//! process should go through one `Connector` so that credential-material
//! setup is serialized. The resulting [`Client`] is stateless apart from
//! the owned store client and is safe to share across tasks; every remote
//! call runs under its own deadline.

use crate::core::config::ConnectConfig;
use crate::core::error::{TrellisError, TrellisResult};
use crate::net::tls::TlsMaterial;
use etcd_client::ConnectOptions;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

pub mod cluster;
pub mod kv;

pub use cluster::{Health, Member, Role, StatusReport};

/// Connection factory.
///
/// Owns the critical section guarding connection builds: only one build
/// may proceed at a time. Steady-state operations on the handles it
/// produces are not limited by the lock.
pub struct Connector {
    build_lock: Mutex<()>,
}

impl Connector {
    /// Create a connection factory.
    pub fn new() -> Self {
        Self {
            build_lock: Mutex::new(()),
        }
    }

    /// Build an authenticated handle for the configured cluster.
    ///
    /// Fails with `ConfigMissing` when no configuration is supplied, with
    /// the validation errors of [`ConnectConfig::validate`], with
    /// `Decoding` on malformed credential material, and with `Connection`
    /// on transport or authentication failure. No partial handle is ever
    /// returned.
    pub async fn connect(&self, config: Option<&ConnectConfig>) -> TrellisResult<Client> {
        let _guard = self.build_lock.lock().await;

        let config = config.ok_or(TrellisError::ConfigMissing)?;
        config.validate()?;

        let mut options = ConnectOptions::new().with_connect_timeout(config.dial_timeout());
        if !config.username.is_empty() {
            options = options.with_user(config.username.clone(), config.password.clone());
        }
        if config.tls_enable {
            options = options.with_tls(TlsMaterial::decode(config)?.into_tls_options());
        }
        let options = Some(options);

        let inner = etcd_client::Client::connect(&config.address, options.clone())
            .await
            .map_err(TrellisError::connection)?;
        debug!("connected to {} endpoint(s)", config.address.len());

        Ok(Client {
            inner,
            probe_options: options,
            request_timeout: config.request_timeout(),
        })
    }
}

impl Default for Connector {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle to one cluster.
///
/// Owns the underlying store client. Operations take `&self`; the store
/// client multiplexes concurrent requests over its channel.
pub struct Client {
    /// The underlying store client.
    inner: etcd_client::Client,

    /// Connect options retained for per-member status probes, which dial
    /// the member's own endpoint with the same credentials.
    probe_options: Option<ConnectOptions>,

    /// Deadline applied to each remote call.
    request_timeout: Duration,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("probe_options", &self.probe_options.is_some())
            .field("request_timeout", &self.request_timeout)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Deadline for a remote call starting now.
    fn deadline(&self) -> Instant {
        Instant::now() + self.request_timeout
    }

    /// Request timeout this handle applies to each remote call.
    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    /// Release the handle.
    ///
    /// Consumes the handle, so the underlying client and its sockets are
    /// released exactly once; any clone of the store client's channel held
    /// by an in-flight call drains before teardown completes.
    pub fn close(self) {}
}
