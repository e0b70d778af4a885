//! Thread-safe consistent hash ring.
//!
//! # Concurrency
//!
//! The ring publishes immutable [`RingSnapshot`]s through a
//! `RwLock<Arc<RingSnapshot>>`. Readers hold the read lock only long enough
//! to clone the `Arc`, then run the lookup on their own snapshot. Writers
//! are serialized by a separate mutex. A writer builds the next snapshot
//! from a copy of the current one without holding the `RwLock`, then takes
//! the write lock only to swap the new `Arc` in. Lookups are never blocked
//! by the hashing work of a topology change, and they see a topology either
//! before or after a change, never halfway through one.
//!
//! Snapshots keep their position table in a `BTreeMap`, so each published
//! snapshot is sorted exactly once and lookups never re-sort.

use std::fmt;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::hasher::{Crc32Hasher, HashFunction};
use crate::node::{Node, NodeId};
use crate::position::Position;
use crate::ring::snapshot::RingSnapshot;
use crate::vnode::VirtualNode;

/// Virtual nodes per unit of weight when no replica count is given.
pub const DEFAULT_REPLICAS: usize = 64;

/// A consistent hash ring of weighted physical nodes.
///
/// # Example
///
/// ```rust
/// use chash_ring::{HashRing, Md5Hasher};
///
/// let ring = HashRing::with_replicas(Md5Hasher, Some(128));
/// ring.add_node("a")?;
/// ring.add_weighted_node("b", 2.0)?;
///
/// assert_eq!(ring.node_count(), 2);
/// let owner = ring.lookup(b"some-key")?;
/// assert!(owner == "a" || owner == "b");
/// # Ok::<(), chash_ring::Error>(())
/// ```
pub struct HashRing<H = Crc32Hasher> {
    hasher: H,
    replicas: usize,
    state: RwLock<Arc<RingSnapshot>>,
    writer: Mutex<()>,
}

impl<H: HashFunction> HashRing<H> {
    /// Creates an empty ring with [`DEFAULT_REPLICAS`] virtual nodes per
    /// unit of weight.
    pub fn new(hasher: H) -> Self {
        Self::with_replicas(hasher, None)
    }

    /// Creates an empty ring. A missing or zero `replicas` falls back to
    /// [`DEFAULT_REPLICAS`].
    pub fn with_replicas(hasher: H, replicas: Option<usize>) -> Self {
        let replicas = match replicas {
            Some(n) if n > 0 => n,
            _ => DEFAULT_REPLICAS,
        };
        Self {
            hasher,
            replicas,
            state: RwLock::new(Arc::new(RingSnapshot::default())),
            writer: Mutex::new(()),
        }
    }

    /// Adds a node with weight 1.
    pub fn add_node(&self, id: impl Into<NodeId>) -> Result<()> {
        self.add_weighted_node(id, 1.0)
    }

    /// Adds a node owning `round(replicas * weight)` virtual nodes.
    ///
    /// Fails with [`Error::DuplicateNode`] if the id is already registered,
    /// and with [`Error::InvalidArgument`] for an empty id or a weight that
    /// is not a positive number. The ring is unchanged on failure.
    pub fn add_weighted_node(&self, id: impl Into<NodeId>, weight: f64) -> Result<()> {
        let id = id.into();
        self.publish(|next| {
            let placed = next.insert(&self.hasher, self.replicas, id.clone(), weight)?;
            debug!(
                node = %id,
                weight,
                requested = placed.requested,
                owned = placed.owned,
                overwritten = placed.overwritten,
                "node added"
            );
            Ok(())
        })
    }

    /// Adds each node in order, one at a time.
    ///
    /// Not atomic: on the first failure the error names the offending node
    /// and every node added before it stays in the ring. See
    /// [`add_nodes_atomic`](Self::add_nodes_atomic) for all-or-nothing
    /// behavior.
    pub fn add_nodes<I, N>(&self, ids: I, weight: f64) -> Result<()>
    where
        I: IntoIterator<Item = N>,
        N: Into<NodeId>,
    {
        for id in ids {
            self.add_weighted_node(id, weight)?;
        }
        Ok(())
    }

    /// Adds all nodes or none of them.
    ///
    /// Readers observe the whole batch appear at once.
    pub fn add_nodes_atomic<I, N>(&self, ids: I, weight: f64) -> Result<()>
    where
        I: IntoIterator<Item = N>,
        N: Into<NodeId>,
    {
        self.insert_batch(ids.into_iter().map(|id| (id.into(), weight)))
    }

    pub(crate) fn insert_batch<I>(&self, nodes: I) -> Result<()>
    where
        I: IntoIterator<Item = (NodeId, f64)>,
    {
        self.publish(|next| {
            let mut added = 0usize;
            for (id, weight) in nodes {
                next.insert(&self.hasher, self.replicas, id, weight)?;
                added += 1;
            }
            debug!(added, vnodes = next.vnode_count(), "node batch added");
            Ok(())
        })
    }

    /// Removes a node and all of its virtual nodes.
    ///
    /// Fails with [`Error::NodeNotFound`] if the id is not registered.
    pub fn remove_node(&self, id: impl AsRef<str>) -> Result<()> {
        let id = id.as_ref();
        self.publish(|next| {
            let removed = next.remove(id)?;
            debug!(node = id, removed, "node removed");
            Ok(())
        })
    }

    /// Distinct physical node ids, in ascending id order.
    pub fn nodes(&self) -> Vec<NodeId> {
        self.snapshot().node_ids()
    }

    /// Details of a registered node.
    pub fn node(&self, id: impl AsRef<str>) -> Option<Node> {
        self.snapshot().node(id.as_ref())
    }

    pub fn contains_node(&self, id: impl AsRef<str>) -> bool {
        self.snapshot().contains(id.as_ref())
    }

    /// Number of physical nodes.
    pub fn node_count(&self) -> usize {
        self.snapshot().node_count()
    }

    /// Number of occupied positions on the ring.
    pub fn vnode_count(&self) -> usize {
        self.snapshot().vnode_count()
    }

    pub fn is_empty(&self) -> bool {
        self.node_count() == 0
    }

    /// Virtual nodes per unit of weight.
    pub fn replicas(&self) -> usize {
        self.replicas
    }

    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    pub fn hasher_name(&self) -> &'static str {
        self.hasher.name()
    }

    /// Finds the node responsible for `resource`.
    ///
    /// Fails with [`Error::NoNodeAvailable`] when the ring is empty. It also
    /// fails that way when two or more nodes are registered but none of them
    /// owns a position, which happens when every weight rounds to zero
    /// virtual nodes or every position was lost to collisions.
    pub fn lookup(&self, resource: impl AsRef<[u8]>) -> Result<NodeId> {
        self.lookup_n(resource, 1)?
            .into_iter()
            .next()
            .ok_or(Error::NoNodeAvailable)
    }

    /// Finds up to `count` distinct nodes for `resource`, in clockwise order
    /// starting just after the resource's position.
    ///
    /// Returns at most `min(count, node_count())` ids. An empty ring yields
    /// an empty list rather than an error; a zero `count` is an
    /// [`Error::InvalidArgument`]. Nodes that own no positions are never
    /// returned unless one is the only registered node, so with two or more
    /// such nodes and nothing else the list is empty.
    pub fn lookup_n(&self, resource: impl AsRef<[u8]>, count: usize) -> Result<Vec<NodeId>> {
        if count == 0 {
            return Err(Error::InvalidArgument(
                "lookup count must be greater than zero".into(),
            ));
        }

        let snapshot = self.snapshot();
        match snapshot.node_count() {
            0 => return Ok(Vec::new()),
            1 => return Ok(snapshot.node_ids()),
            _ => {}
        }

        let target = Position(self.hasher.hash(resource.as_ref()));
        let nodes = snapshot.walk_clockwise(target, count);
        trace!(position = %target, count, found = nodes.len(), "lookup");
        Ok(nodes)
    }

    /// Every occupied position and its owner, in ascending position order.
    ///
    /// Diagnostic only; use [`nodes`](Self::nodes) for the list of physical
    /// nodes.
    pub fn virtual_positions(&self) -> Vec<VirtualNode> {
        self.snapshot().virtual_nodes()
    }

    /// Fraction of the hash space each node is responsible for, in
    /// ascending id order. The fractions of a non-empty ring sum to 1.
    pub fn ownership(&self) -> Vec<(NodeId, f64)> {
        self.snapshot().ownership(self.hasher.max_position())
    }

    /// Human-readable summary listing the physical nodes, for logs.
    pub fn describe(&self) -> String {
        self.to_string()
    }

    fn snapshot(&self) -> Arc<RingSnapshot> {
        Arc::clone(&self.state.read())
    }

    /// Applies `change` to a copy of the current snapshot and publishes the
    /// copy if it succeeds.
    ///
    /// Holding `writer` keeps the captured snapshot current until the swap,
    /// so no concurrent change is lost.
    fn publish<T>(&self, change: impl FnOnce(&mut RingSnapshot) -> Result<T>) -> Result<T> {
        let _writer = self.writer.lock();
        let mut next = RingSnapshot::clone(&self.snapshot());
        let out = change(&mut next)?;
        *self.state.write() = Arc::new(next);
        Ok(out)
    }
}

impl<H: HashFunction + Default> Default for HashRing<H> {
    fn default() -> Self {
        Self::new(H::default())
    }
}

impl<H: HashFunction> fmt::Display for HashRing<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let nodes = self
            .nodes()
            .iter()
            .map(NodeId::as_str)
            .collect::<Vec<_>>()
            .join(",");
        write!(f, "HashRing{{hasher:{}, nodes:[{}]}}", self.hasher.name(), nodes)
    }
}

impl<H: HashFunction> fmt::Debug for HashRing<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snapshot = self.snapshot();
        f.debug_struct("HashRing")
            .field("hasher", &self.hasher.name())
            .field("replicas", &self.replicas)
            .field("nodes", &snapshot.node_count())
            .field("vnodes", &snapshot.vnode_count())
            .finish()
    }
}
