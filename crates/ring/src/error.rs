//! Error types for the ring library.

use thiserror::Error;

use crate::node::NodeId;

/// Result type alias for the ring library.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by ring operations.
///
/// Every variant describes caller misuse or an empty ring. None of them is
/// transient, and a failed operation never leaves the ring partially mutated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A node with this id is already registered.
    #[error("node '{0}' already exists")]
    DuplicateNode(NodeId),
    /// No node with this id is registered.
    #[error("node '{0}' not found")]
    NodeNotFound(NodeId),
    /// An argument was out of range (zero lookup count, empty id, bad or
    /// oversized weight).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// A single-node lookup found no node: the ring is empty, or none of the
    /// registered nodes owns a position.
    #[error("no node available")]
    NoNodeAvailable,
    /// Configuration could not be read or parsed.
    #[error("invalid configuration: {0}")]
    Config(String),
}
