//! Virtual node abstractions.
//!
//! Each physical node is placed on the ring many times, once per virtual
//! node. Replica `i` of node `n` sits at `hash("n#i")`. A node added with
//! weight `w` to a ring with `r` replicas gets `round(r * w)` virtual nodes,
//! so heavier nodes own proportionally more of the ring.

use std::fmt;

use crate::hasher::HashFunction;
use crate::node::NodeId;
use crate::position::Position;

/// A single placement of a physical node on the ring.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VirtualNode {
    /// Where this replica sits on the ring.
    pub position: Position,
    /// The physical node that owns it.
    pub node_id: NodeId,
}

impl VirtualNode {
    #[inline]
    pub fn new(position: Position, node_id: NodeId) -> Self {
        Self { position, node_id }
    }

    /// Places replica `index` of `node_id` using `hasher`.
    pub fn from_index<H: HashFunction + ?Sized>(hasher: &H, node_id: &NodeId, index: usize) -> Self {
        let position = Position(hasher.hash(label(node_id, index).as_bytes()));
        Self::new(position, node_id.clone())
    }
}

impl fmt::Display for VirtualNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VNode(position={}, node={})", self.position, self.node_id)
    }
}

/// The byte string hashed for replica `index` of `node_id`: `"<node>#<index>"`.
pub fn label(node_id: &NodeId, index: usize) -> String {
    format!("{}#{}", node_id, index)
}

/// Most virtual nodes a single node may own.
pub const MAX_VNODES_PER_NODE: usize = 1 << 20;

/// Number of virtual nodes for a node of `weight` on a ring with `replicas`.
///
/// Rounds half away from zero. Returns `None` above
/// [`MAX_VNODES_PER_NODE`]. Callers validate that `weight` is finite and
/// positive.
pub fn virtual_count(replicas: usize, weight: f64) -> Option<usize> {
    let count = (replicas as f64 * weight).round();
    if count > MAX_VNODES_PER_NODE as f64 {
        return None;
    }
    Some(count as usize)
}
