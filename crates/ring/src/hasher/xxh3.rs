//! XXH3 hash function.

use xxhash_rust::xxh3::xxh3_64;

use crate::hasher::traits::HashFunction;

/// XXH3-64 of the key. Full 64-bit output.
#[derive(Clone, Copy, Debug, Default)]
pub struct Xxh3Hasher;

impl HashFunction for Xxh3Hasher {
    fn hash(&self, key: &[u8]) -> u64 {
        xxh3_64(key)
    }

    fn name(&self) -> &'static str {
        "xxh3"
    }
}
