//! Consistent hash ring implementation.
//!
//! The ring maps resources to physical nodes by walking clockwise from the
//! resource's hashed position to the next virtual node.

pub mod builder;
pub mod ring;
mod snapshot;

pub use builder::RingBuilder;
pub use ring::{HashRing, DEFAULT_REPLICAS};
