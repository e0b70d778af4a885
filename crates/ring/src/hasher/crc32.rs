//! CRC-32 hash function.

use crate::hasher::traits::HashFunction;

/// IEEE CRC-32 of the key. Output domain is `0..=u32::MAX`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Crc32Hasher;

impl HashFunction for Crc32Hasher {
    fn hash(&self, key: &[u8]) -> u64 {
        u64::from(crc32fast::hash(key))
    }

    fn max_position(&self) -> u64 {
        u64::from(u32::MAX)
    }

    fn name(&self) -> &'static str {
        "crc32"
    }
}
