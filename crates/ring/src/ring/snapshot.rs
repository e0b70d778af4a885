//! Immutable ring state published by [`HashRing`](super::HashRing).
//!
//! A snapshot is never mutated once published. Writers clone the current
//! snapshot, apply their change to the clone and swap it in, so a reader
//! holding an `Arc<RingSnapshot>` always sees a complete topology.

use std::collections::{BTreeMap, BTreeSet};
use std::ops::Bound::{Excluded, Unbounded};

use tracing::warn;

use crate::error::{Error, Result};
use crate::hasher::HashFunction;
use crate::node::{Node, NodeId};
use crate::position::Position;
use crate::vnode::{virtual_count, VirtualNode, MAX_VNODES_PER_NODE};

#[derive(Clone, Debug)]
struct NodeEntry {
    weight: f64,
    positions: BTreeSet<Position>,
}

/// Outcome of placing one node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Placement {
    /// Virtual nodes requested, `round(replicas * weight)`.
    pub requested: usize,
    /// Positions the node ended up owning.
    pub owned: usize,
    /// Positions taken over from other nodes.
    pub overwritten: usize,
}

/// Position table plus node registry.
///
/// Invariants:
/// - every position in `table` is listed under its owner in `registry`, and
///   every position listed in `registry` is in `table` with that owner
/// - a node id appears in `registry` at most once
///
/// Both maps are ordered, so the table is always sorted by position.
#[derive(Clone, Debug, Default)]
pub(crate) struct RingSnapshot {
    table: BTreeMap<Position, NodeId>,
    registry: BTreeMap<NodeId, NodeEntry>,
}

impl RingSnapshot {
    pub(crate) fn node_count(&self) -> usize {
        self.registry.len()
    }

    pub(crate) fn vnode_count(&self) -> usize {
        self.table.len()
    }

    pub(crate) fn contains(&self, id: &str) -> bool {
        self.registry.contains_key(id)
    }

    pub(crate) fn node_ids(&self) -> Vec<NodeId> {
        self.registry.keys().cloned().collect()
    }

    pub(crate) fn node(&self, id: &str) -> Option<Node> {
        self.registry.get_key_value(id).map(|(id, entry)| Node {
            id: id.clone(),
            weight: entry.weight,
            vnodes: entry.positions.len(),
        })
    }

    pub(crate) fn virtual_nodes(&self) -> Vec<VirtualNode> {
        self.table
            .iter()
            .map(|(position, id)| VirtualNode::new(*position, id.clone()))
            .collect()
    }

    /// Places `round(replicas * weight)` virtual nodes for `id`.
    ///
    /// On a position collision the later insertion wins: the previous owner
    /// loses exactly that one position. Nothing is changed on error.
    pub(crate) fn insert<H: HashFunction + ?Sized>(
        &mut self,
        hasher: &H,
        replicas: usize,
        id: NodeId,
        weight: f64,
    ) -> Result<Placement> {
        if id.is_empty() {
            return Err(Error::InvalidArgument("node id must not be empty".into()));
        }
        if !weight.is_finite() || weight <= 0.0 {
            return Err(Error::InvalidArgument(format!(
                "weight for node '{}' must be a positive number, got {}",
                id, weight
            )));
        }
        if self.registry.contains_key(&id) {
            return Err(Error::DuplicateNode(id));
        }

        let requested = virtual_count(replicas, weight).ok_or_else(|| {
            Error::InvalidArgument(format!(
                "node '{}' with weight {} needs more than {} virtual nodes",
                id, weight, MAX_VNODES_PER_NODE
            ))
        })?;
        let mut positions = BTreeSet::new();
        let mut overwritten = 0;

        for index in 0..requested {
            let vnode = VirtualNode::from_index(hasher, &id, index);
            if let Some(previous) = self.table.insert(vnode.position, id.clone()) {
                if previous != id {
                    if let Some(entry) = self.registry.get_mut(&previous) {
                        entry.positions.remove(&vnode.position);
                    }
                    warn!(
                        position = %vnode.position,
                        node = %id,
                        previous = %previous,
                        "virtual node collision, position reassigned"
                    );
                    overwritten += 1;
                }
            }
            positions.insert(vnode.position);
        }

        let owned = positions.len();
        self.registry.insert(id, NodeEntry { weight, positions });

        Ok(Placement {
            requested,
            owned,
            overwritten,
        })
    }

    /// Removes `id` and every position it owns. Returns the number of
    /// positions removed.
    pub(crate) fn remove(&mut self, id: &str) -> Result<usize> {
        let entry = self
            .registry
            .remove(id)
            .ok_or_else(|| Error::NodeNotFound(NodeId::from(id)))?;

        for position in &entry.positions {
            self.table.remove(position);
        }

        Ok(entry.positions.len())
    }

    /// Collects up to `count` distinct nodes clockwise from `target`.
    ///
    /// The walk starts at the first position strictly greater than `target`,
    /// wraps to the smallest position at most once, and stops early once
    /// every registered node has been seen.
    pub(crate) fn walk_clockwise(&self, target: Position, count: usize) -> Vec<NodeId> {
        let limit = count.min(self.registry.len());
        let mut result: Vec<NodeId> = Vec::with_capacity(limit);
        if limit == 0 {
            return result;
        }

        let after = self.table.range((Excluded(target), Unbounded));
        let before = self.table.range(..=target);

        for (_, id) in after.chain(before) {
            if !result.contains(id) {
                result.push(id.clone());
                if result.len() == limit {
                    break;
                }
            }
        }

        result
    }

    /// Fraction of the hash space owned by each registered node.
    ///
    /// A position owns the arc from its predecessor (inclusive) up to itself
    /// (exclusive), matching the strictly-greater rule of the clockwise walk.
    pub(crate) fn ownership(&self, max: u64) -> Vec<(NodeId, f64)> {
        let mut arcs: BTreeMap<&NodeId, u128> =
            self.registry.keys().map(|id| (id, 0u128)).collect();

        if let Some((&last, _)) = self.table.iter().next_back() {
            let mut previous = last;
            for (&position, id) in &self.table {
                if let Some(arc) = arcs.get_mut(id) {
                    *arc += previous.distance_to(position, max);
                }
                previous = position;
            }
        }

        let space = (u128::from(max) + 1) as f64;
        arcs.into_iter()
            .map(|(id, arc)| (id.clone(), arc as f64 / space))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hasher::Crc32Hasher;

    /// Hashes `"<digits>..."` labels to the leading number, everything else
    /// to zero.
    struct Leading;

    impl HashFunction for Leading {
        fn hash(&self, key: &[u8]) -> u64 {
            let digits: String = String::from_utf8_lossy(key)
                .chars()
                .take_while(|c| c.is_ascii_digit())
                .collect();
            digits.parse().unwrap_or(0)
        }

        fn max_position(&self) -> u64 {
            99
        }

        fn name(&self) -> &'static str {
            "leading"
        }
    }

    #[test]
    fn test_insert_and_remove_keep_maps_in_sync() {
        let mut snapshot = RingSnapshot::default();
        let placed = snapshot
            .insert(&Crc32Hasher, 8, NodeId::from("a"), 1.0)
            .unwrap();
        assert_eq!(placed.requested, 8);
        assert_eq!(snapshot.vnode_count(), placed.owned);

        assert_eq!(snapshot.remove("a").unwrap(), placed.owned);
        assert_eq!(snapshot.vnode_count(), 0);
        assert_eq!(snapshot.node_count(), 0);
    }

    #[test]
    fn test_collision_moves_position_to_later_node() {
        let mut snapshot = RingSnapshot::default();
        // "10#0" and "10x#0" both hash to 10.
        snapshot.insert(&Leading, 1, NodeId::from("10"), 1.0).unwrap();
        let placed = snapshot.insert(&Leading, 1, NodeId::from("10x"), 1.0).unwrap();

        assert_eq!(placed.overwritten, 1);
        assert_eq!(snapshot.vnode_count(), 1);
        assert_eq!(snapshot.node("10").unwrap().vnodes, 0);
        assert_eq!(snapshot.node("10x").unwrap().vnodes, 1);

        // Removing the loser must not touch the winner's position.
        snapshot.remove("10").unwrap();
        assert_eq!(snapshot.vnode_count(), 1);
    }

    #[test]
    fn test_rejects_bad_input_without_mutation() {
        let mut snapshot = RingSnapshot::default();
        assert!(matches!(
            snapshot.insert(&Crc32Hasher, 4, NodeId::from(""), 1.0),
            Err(Error::InvalidArgument(_))
        ));
        for weight in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                snapshot.insert(&Crc32Hasher, 4, NodeId::from("a"), weight),
                Err(Error::InvalidArgument(_))
            ));
        }
        assert_eq!(snapshot.node_count(), 0);
        assert_eq!(snapshot.vnode_count(), 0);
    }

    #[test]
    fn test_rejects_oversized_weight_before_hashing() {
        struct Unreachable;

        impl HashFunction for Unreachable {
            fn hash(&self, _key: &[u8]) -> u64 {
                panic!("nothing may be hashed for a rejected node");
            }

            fn name(&self) -> &'static str {
                "unreachable"
            }
        }

        let mut snapshot = RingSnapshot::default();
        assert!(matches!(
            snapshot.insert(&Unreachable, 64, NodeId::from("huge"), 1e7),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            snapshot.insert(&Unreachable, usize::MAX, NodeId::from("huge"), 1.0),
            Err(Error::InvalidArgument(_))
        ));
        assert_eq!(snapshot.node_count(), 0);
    }

    #[test]
    fn test_walk_starts_strictly_after_target() {
        let mut snapshot = RingSnapshot::default();
        snapshot.insert(&Leading, 1, NodeId::from("20"), 1.0).unwrap();
        snapshot.insert(&Leading, 1, NodeId::from("40"), 1.0).unwrap();

        // A target equal to a position belongs to the next one clockwise.
        assert_eq!(snapshot.walk_clockwise(Position(20), 1), vec!["40"]);
        assert_eq!(snapshot.walk_clockwise(Position(40), 1), vec!["20"]);
        assert_eq!(snapshot.walk_clockwise(Position(30), 5), vec!["40", "20"]);
    }

    #[test]
    fn test_ownership_arcs() {
        let mut snapshot = RingSnapshot::default();
        snapshot.insert(&Leading, 1, NodeId::from("20"), 1.0).unwrap();
        snapshot.insert(&Leading, 1, NodeId::from("70"), 1.0).unwrap();

        let shares = snapshot.ownership(Leading.max_position());
        // "70" owns [20, 70), "20" owns [70, 100) and [0, 20).
        assert_eq!(shares[0].0, "20");
        assert!((shares[0].1 - 0.5).abs() < 1e-9);
        assert!((shares[1].1 - 0.5).abs() < 1e-9);
    }
}
