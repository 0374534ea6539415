//! Flat-key-to-tree materialization.
//!
//! etcd stores a flat, ordered keyspace; the directory structure implied by
//! slash-delimited keys exists only by convention. [`nodes_under`] converts
//! the result of a prefix scan into the one-level listing a browser would
//! show: keys exactly one segment below the prefix appear as leaves, deeper
//! keys collapse into a single virtual directory per first segment.
//!
//! The conversion is a pure function over `(key, value)` byte pairs so it
//! can be exercised without a cluster. Result ordering is unspecified;
//! callers that need sorted output sort by [`Node::path`].

use crate::core::error::{TrellisError, TrellisResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Key segment separator.
pub const SEPARATOR: char = '/';

/// One entry in a directory listing: either a stored key holding a value or
/// a virtual directory collapsed from deeper keys.
///
/// Nodes are derived per query and never persisted; the store remains the
/// source of truth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Absolute slash-delimited path.
    pub path: String,

    /// Stored value. Empty for directories and for leaves whose value has
    /// not been hydrated yet.
    #[serde(default)]
    pub value: String,

    /// Whether this node is a virtual directory.
    pub is_dir: bool,
}

impl Node {
    /// Create a leaf node for a stored key.
    pub fn leaf(path: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            value: value.into(),
            is_dir: false,
        }
    }

    /// Create a virtual directory node.
    pub fn directory(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            value: String::new(),
            is_dir: true,
        }
    }
}

impl std::fmt::Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_dir {
            write!(f, "{}{}", self.path, SEPARATOR)
        } else {
            write!(f, "{}", self.path)
        }
    }
}

/// Materialize the one-level listing under `prefix` from a prefix scan.
///
/// For each key the leading `prefix` (and at most one separator after it)
/// is stripped:
/// - an empty remainder is skipped; a node does not list itself;
/// - a remainder with a further separator contributes one directory node
///   at `prefix/<first-segment>`, deduplicated across entries;
/// - otherwise the entry is a leaf at the full key, carrying its value.
///
/// A path seen both as an exact key and as a prefix of deeper keys yields
/// a single node; the leaf wins since the stored value is authoritative.
///
/// Non-UTF-8 key or value bytes fail the whole conversion; no partial
/// output is returned.
pub fn nodes_under<'a, I>(prefix: &str, entries: I) -> TrellisResult<Vec<Node>>
where
    I: IntoIterator<Item = (&'a [u8], &'a [u8])>,
{
    let mut nodes: Vec<Node> = Vec::new();
    let mut index_by_path: HashMap<String, usize> = HashMap::new();

    for (raw_key, raw_value) in entries {
        let key = decode_utf8("key", raw_key)?;
        let Some(rest) = key.strip_prefix(prefix) else {
            // Not under the prefix; a prefix scan should never produce this.
            continue;
        };
        let rest = rest.strip_prefix(SEPARATOR).unwrap_or(rest);
        if rest.is_empty() {
            continue;
        }

        match rest.find(SEPARATOR) {
            Some(split) => {
                let path = format!(
                    "{}{}{}",
                    prefix.trim_end_matches(SEPARATOR),
                    SEPARATOR,
                    &rest[..split]
                );
                if !index_by_path.contains_key(&path) {
                    index_by_path.insert(path.clone(), nodes.len());
                    nodes.push(Node::directory(path));
                }
            }
            None => {
                let value = decode_utf8("value", raw_value)?;
                let leaf = Node::leaf(key, value);
                match index_by_path.get(&leaf.path).copied() {
                    Some(slot) => nodes[slot] = leaf,
                    None => {
                        index_by_path.insert(leaf.path.clone(), nodes.len());
                        nodes.push(leaf);
                    }
                }
            }
        }
    }

    Ok(nodes)
}

fn decode_utf8<'a>(what: &'static str, bytes: &'a [u8]) -> TrellisResult<&'a str> {
    std::str::from_utf8(bytes).map_err(|_| {
        TrellisError::decoding(format!(
            "{} is not valid UTF-8: {}",
            what,
            String::from_utf8_lossy(bytes)
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries<'a>(pairs: &'a [(&str, &str)]) -> impl Iterator<Item = (&'a [u8], &'a [u8])> {
        pairs.iter().map(|(k, v)| (k.as_bytes(), v.as_bytes()))
    }

    #[test]
    fn test_leaves_and_directories() {
        let pairs = [("/a/b", "1"), ("/a/c/d", "2")];
        let mut nodes = nodes_under("/a", entries(&pairs)).unwrap();
        nodes.sort_by(|l, r| l.path.cmp(&r.path));

        assert_eq!(nodes, vec![Node::leaf("/a/b", "1"), Node::directory("/a/c")]);
    }

    #[test]
    fn test_deep_entries_deduplicate() {
        let pairs = [("/a/c/d", "1"), ("/a/c/e", "2"), ("/a/c/e/f", "3")];
        let nodes = nodes_under("/a", entries(&pairs)).unwrap();

        assert_eq!(nodes, vec![Node::directory("/a/c")]);
    }

    #[test]
    fn test_self_listing_skipped() {
        let pairs = [("/a", "root"), ("/a/b", "1")];
        let nodes = nodes_under("/a", entries(&pairs)).unwrap();

        assert_eq!(nodes, vec![Node::leaf("/a/b", "1")]);
    }

    #[test]
    fn test_leaf_wins_path_collision() {
        // "/a/b" is both a stored key and the parent of "/a/b/c".
        let pairs = [("/a/b", "1"), ("/a/b/c", "2")];
        let nodes = nodes_under("/a", entries(&pairs)).unwrap();
        assert_eq!(nodes, vec![Node::leaf("/a/b", "1")]);

        // Same outcome when the scan yields the deeper key first.
        let pairs = [("/a/b/c", "2"), ("/a/b", "1")];
        let nodes = nodes_under("/a", entries(&pairs)).unwrap();
        assert_eq!(nodes, vec![Node::leaf("/a/b", "1")]);
    }

    #[test]
    fn test_prefix_with_trailing_separator() {
        let pairs = [("/a/b", "1"), ("/a/c/d", "2")];
        let mut nodes = nodes_under("/a/", entries(&pairs)).unwrap();
        nodes.sort_by(|l, r| l.path.cmp(&r.path));

        assert_eq!(nodes, vec![Node::leaf("/a/b", "1"), Node::directory("/a/c")]);
    }

    #[test]
    fn test_invalid_utf8_key_fails_whole_conversion() {
        let good: (&[u8], &[u8]) = (b"/a/b", b"1");
        let bad: (&[u8], &[u8]) = (b"/a/\xff", b"2");
        let err = nodes_under("/a", vec![good, bad]).unwrap_err();
        assert!(matches!(err, TrellisError::Decoding { .. }));
    }

    #[test]
    fn test_invalid_utf8_value_fails_whole_conversion() {
        let bad: (&[u8], &[u8]) = (b"/a/b", b"\xfe\xff");
        let err = nodes_under("/a", vec![bad]).unwrap_err();
        assert!(matches!(err, TrellisError::Decoding { .. }));
    }

    #[test]
    fn test_empty_scan() {
        let nodes = nodes_under("/a", entries(&[])).unwrap();
        assert!(nodes.is_empty());
    }

    #[test]
    fn test_display() {
        assert_eq!(Node::leaf("/a/b", "1").to_string(), "/a/b");
        assert_eq!(Node::directory("/a/c").to_string(), "/a/c/");
    }
}
