//! Core hash function trait.

use std::sync::Arc;

/// A hash function maps arbitrary bytes to a position on the ring.
///
/// Implementations must be pure and deterministic: the same input always
/// yields the same output, and every output fits in `0..=max_position()`.
/// They are shared by every reader of a ring, so they must be thread-safe.
pub trait HashFunction: Send + Sync + 'static {
    /// Hashes `key` to a ring position.
    fn hash(&self, key: &[u8]) -> u64;

    /// Largest value [`hash`](Self::hash) can return.
    ///
    /// Only used for diagnostics such as ownership fractions.
    fn max_position(&self) -> u64 {
        u64::MAX
    }

    /// Short name used in logs and descriptions.
    fn name(&self) -> &'static str;
}

impl<H: HashFunction + ?Sized> HashFunction for Box<H> {
    fn hash(&self, key: &[u8]) -> u64 {
        (**self).hash(key)
    }

    fn max_position(&self) -> u64 {
        (**self).max_position()
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

impl<H: HashFunction + ?Sized> HashFunction for Arc<H> {
    fn hash(&self, key: &[u8]) -> u64 {
        (**self).hash(key)
    }

    fn max_position(&self) -> u64 {
        (**self).max_position()
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}
