//! Catalog operations over the flat keyspace.
//!
//! Listing is a keys-only prefix scan materialized through the tree
//! converter, then sorted and hydrated leaf by leaf. Hydration follows an
//! explicit skip-and-continue policy: a failed or timed-out single-key
//! fetch leaves that node's value empty and is logged, it never aborts the
//! listing. Writes layer the overwrite-protection policy: `add` is an
//! atomic conditional write, `put` overwrites unconditionally, `del`
//! removes exactly one key.

use crate::core::error::{TrellisError, TrellisResult};
use crate::tree::{self, Node};
use etcd_client::{Compare, CompareOp, GetOptions, Txn, TxnOp};
use tokio::time::timeout_at;
use tracing::warn;

use super::Client;

impl Client {
    /// List the nodes immediately under `path`, sorted ascending by path.
    ///
    /// An empty scan result is an empty list, not an error. Leaf values
    /// are fetched individually after the scan; a failure on one key
    /// leaves that node unhydrated and the listing proceeds. The scan and
    /// the hydration loop share a single deadline; only scan expiry
    /// surfaces `Timeout`.
    pub async fn list(&self, path: &str) -> TrellisResult<Vec<Node>> {
        let mut kv = self.inner.kv_client();
        let deadline = self.deadline();

        let scan = timeout_at(
            deadline,
            kv.get(
                path,
                Some(GetOptions::new().with_prefix().with_keys_only()),
            ),
        )
        .await
        .map_err(|_| TrellisError::timeout("list scan", self.request_timeout))??;

        if scan.kvs().is_empty() {
            return Ok(Vec::new());
        }

        let mut nodes =
            tree::nodes_under(path, scan.kvs().iter().map(|kv| (kv.key(), kv.value())))?;
        // The store's result ordering is not relied upon.
        nodes.sort_by(|l, r| l.path.cmp(&r.path));

        for node in nodes.iter_mut().filter(|n| !n.is_dir) {
            let fetched = timeout_at(deadline, kv.get(node.path.clone(), None)).await;
            match fetched {
                Ok(Ok(resp)) => {
                    if let Some(found) = resp.kvs().first() {
                        match found.value_str() {
                            Ok(value) => node.value = value.to_string(),
                            Err(err) => warn!("skipping value for {}: {}", node.path, err),
                        }
                    }
                }
                Ok(Err(err)) => warn!("skipping value for {}: {}", node.path, err),
                Err(_) => warn!(
                    "skipping value for {}: listing deadline exhausted",
                    node.path
                ),
            }
        }

        Ok(nodes)
    }

    /// Fetch the node stored at exactly `path`.
    ///
    /// A missing key is an explicit `KeyNotFound`, never an empty-value
    /// success.
    pub async fn get(&self, path: &str) -> TrellisResult<Node> {
        let mut kv = self.inner.kv_client();
        let deadline = self.deadline();

        let resp = timeout_at(deadline, kv.get(path, None))
            .await
            .map_err(|_| TrellisError::timeout("get", self.request_timeout))??;
        if resp.kvs().is_empty() {
            return Err(TrellisError::key_not_found(path));
        }

        // Shape the singleton through the same conversion listing uses so
        // the two agree on node shape.
        let nodes = tree::nodes_under(
            parent_prefix(path),
            resp.kvs().iter().map(|kv| (kv.key(), kv.value())),
        )?;
        nodes
            .into_iter()
            .next()
            .ok_or_else(|| TrellisError::key_not_found(path))
    }

    /// Create the key at `path`, failing if it already exists.
    ///
    /// Implemented as one conditional transaction (key version still 0 at
    /// commit time), so two concurrent adds on the same key cannot both
    /// succeed. The losing add surfaces `AlreadyExists`.
    pub async fn add(&self, path: &str, data: impl Into<Vec<u8>>) -> TrellisResult<()> {
        let mut kv = self.inner.kv_client();
        let deadline = self.deadline();

        let txn = Txn::new()
            .when(vec![Compare::version(path, CompareOp::Equal, 0)])
            .and_then(vec![TxnOp::put(path, data.into(), None)]);
        let resp = timeout_at(deadline, kv.txn(txn))
            .await
            .map_err(|_| TrellisError::timeout("add", self.request_timeout))??;

        if !resp.succeeded() {
            return Err(TrellisError::already_exists(path));
        }
        Ok(())
    }

    /// Write the key at `path`, creating or overwriting it.
    pub async fn put(&self, path: &str, data: impl Into<Vec<u8>>) -> TrellisResult<()> {
        let mut kv = self.inner.kv_client();
        let deadline = self.deadline();

        timeout_at(deadline, kv.put(path, data.into(), None))
            .await
            .map_err(|_| TrellisError::timeout("put", self.request_timeout))??;
        Ok(())
    }

    /// Delete the exact key at `path`.
    ///
    /// Virtual directories are never stored keys, so deleting a directory
    /// path matches nothing and succeeds as a no-op. No recursive delete
    /// of a subtree is performed.
    pub async fn del(&self, path: &str) -> TrellisResult<()> {
        let mut kv = self.inner.kv_client();
        let deadline = self.deadline();

        timeout_at(deadline, kv.delete(path, None))
            .await
            .map_err(|_| TrellisError::timeout("del", self.request_timeout))??;
        Ok(())
    }
}

/// Prefix covering everything up to and including the last separator, so
/// that shaping an exact key through the tree converter yields its leaf.
fn parent_prefix(path: &str) -> &str {
    match path.rfind(tree::SEPARATOR) {
        Some(idx) => &path[..idx + 1],
        None => "",
    }
}
