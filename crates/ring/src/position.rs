//! Ring positions.

use std::fmt;

/// A position on the ring, as produced by a [`HashFunction`].
///
/// Positions are ordered numerically; the ring is the circle formed by
/// wrapping from the hash function's maximum back to zero.
///
/// [`HashFunction`]: crate::hasher::HashFunction
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Position(pub u64);

impl Position {
    #[inline]
    pub fn value(self) -> u64 {
        self.0
    }

    /// Clockwise distance from `self` to `other` on a ring whose largest
    /// position is `max`.
    ///
    /// Returned as `u128` so a full turn of a 64-bit ring (`max + 1`) fits.
    pub fn distance_to(self, other: Position, max: u64) -> u128 {
        if other.0 > self.0 {
            u128::from(other.0 - self.0)
        } else {
            (u128::from(max) + 1 + u128::from(other.0)).saturating_sub(u128::from(self.0))
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}
