//! Node abstractions for the consistent hash ring.
//!
//! Nodes are physical endpoints identified by an opaque string. The ring
//! never resolves an id to an address; callers own that mapping.

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

/// Opaque identifier for a physical node.
///
/// Newtype over `Arc<str>` so the many copies held by the position table and
/// by published snapshots are cheap to clone.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct NodeId(Arc<str>);

impl NodeId {
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(Arc::from(id.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(Arc::from(id))
    }
}

impl From<&String> for NodeId {
    fn from(id: &String) -> Self {
        Self::new(id)
    }
}

impl From<&NodeId> for NodeId {
    fn from(id: &NodeId) -> Self {
        id.clone()
    }
}

impl AsRef<str> for NodeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for NodeId {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for NodeId {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

/// A registered physical node as reported by the ring.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub id: NodeId,
    /// Multiplier applied to the ring's replica count when the node was added.
    pub weight: f64,
    /// Virtual positions the node currently owns. Lower than the requested
    /// count when some of its labels lost a hash collision.
    pub vnodes: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id_conversions() {
        let a = NodeId::from("cache-1");
        let b = NodeId::from(String::from("cache-1"));
        assert_eq!(a, b);
        assert_eq!(a, "cache-1");
        assert_eq!(a.to_string(), "cache-1");
        assert!(!a.is_empty());
        assert!(NodeId::from("").is_empty());
    }

    #[test]
    fn test_node_id_ordering() {
        let mut ids = vec![NodeId::from("b"), NodeId::from("c"), NodeId::from("a")];
        ids.sort();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }
}
