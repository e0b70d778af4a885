//! Consistent hash ring with weighted virtual nodes.
//!
//! This crate provides the pieces needed to shard keys across a changing set
//! of nodes:
//! - Pluggable hash functions (CRC32, MD5 prefix, SipHash, XXH3)
//! - Node, position and virtual node types
//! - A thread-safe ring with clockwise lookup and wrap-around
//! - A builder and a serde-backed configuration layer
//!
//! ```rust
//! use chash_ring::{HashRing, Crc32Hasher};
//!
//! let ring = HashRing::new(Crc32Hasher);
//! ring.add_nodes(["cache-a", "cache-b", "cache-c"], 1.0)?;
//!
//! let primary = ring.lookup("user:42")?;
//! let replicas = ring.lookup_n("user:42", 2)?;
//! assert_eq!(replicas[0], primary);
//! # Ok::<(), chash_ring::Error>(())
//! ```

pub mod config;
pub mod error;
pub mod hasher;
pub mod node;
pub mod position;
pub mod ring;
pub mod vnode;

pub use config::{NodeConfig, RingConfig};
pub use error::{Error, Result};
pub use hasher::{Crc32Hasher, HashFunction, HasherKind, Md5Hasher, SipHasher, Xxh3Hasher};
pub use node::{Node, NodeId};
pub use position::Position;
pub use ring::{HashRing, RingBuilder, DEFAULT_REPLICAS};
pub use vnode::{VirtualNode, MAX_VNODES_PER_NODE};
