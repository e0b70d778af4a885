//! Builder for [`HashRing`].

use crate::error::Result;
use crate::hasher::{Crc32Hasher, HashFunction};
use crate::node::NodeId;
use crate::ring::HashRing;

/// Builds a ring and its initial nodes in one step.
///
/// The initial nodes are added atomically: if any of them is invalid or a
/// duplicate, [`build`](Self::build) fails and no ring is returned.
///
/// ```rust
/// use chash_ring::{RingBuilder, Xxh3Hasher};
///
/// let ring = RingBuilder::new()
///     .hasher(Xxh3Hasher)
///     .replicas(32)
///     .node("a")
///     .weighted_node("b", 2.0)
///     .build()?;
///
/// assert_eq!(ring.vnode_count(), 96);
/// # Ok::<(), chash_ring::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct RingBuilder<H = Crc32Hasher> {
    hasher: H,
    replicas: Option<usize>,
    nodes: Vec<(NodeId, f64)>,
}

impl RingBuilder<Crc32Hasher> {
    pub fn new() -> Self {
        Self {
            hasher: Crc32Hasher,
            replicas: None,
            nodes: Vec::new(),
        }
    }
}

impl Default for RingBuilder<Crc32Hasher> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: HashFunction> RingBuilder<H> {
    /// Replaces the hash function.
    pub fn hasher<H2: HashFunction>(self, hasher: H2) -> RingBuilder<H2> {
        RingBuilder {
            hasher,
            replicas: self.replicas,
            nodes: self.nodes,
        }
    }

    /// Virtual nodes per unit of weight. Zero means the default.
    pub fn replicas(mut self, replicas: usize) -> Self {
        self.replicas = Some(replicas);
        self
    }

    /// Adds a node with weight 1.
    pub fn node(self, id: impl Into<NodeId>) -> Self {
        self.weighted_node(id, 1.0)
    }

    pub fn weighted_node(mut self, id: impl Into<NodeId>, weight: f64) -> Self {
        self.nodes.push((id.into(), weight));
        self
    }

    pub fn build(self) -> Result<HashRing<H>> {
        let ring = HashRing::with_replicas(self.hasher, self.replicas);
        if !self.nodes.is_empty() {
            ring.insert_batch(self.nodes)?;
        }
        Ok(ring)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_builder_defaults() {
        let ring = RingBuilder::new().node("a").node("b").build().unwrap();
        assert_eq!(ring.replicas(), 64);
        assert_eq!(ring.hasher_name(), "crc32");
        assert_eq!(ring.nodes(), vec!["a", "b"]);
    }

    #[test]
    fn test_builder_duplicate_fails() {
        let err = RingBuilder::new().node("a").node("a").build().unwrap_err();
        assert_eq!(err, Error::DuplicateNode(NodeId::from("a")));
    }
}
