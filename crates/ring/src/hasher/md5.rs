//! MD5-prefix hash function.

use crate::hasher::traits::HashFunction;

/// First four bytes of the MD5 digest read as a big-endian `u32`.
///
/// Equivalent to parsing the first eight hex characters of the digest.
#[derive(Clone, Copy, Debug, Default)]
pub struct Md5Hasher;

impl HashFunction for Md5Hasher {
    fn hash(&self, key: &[u8]) -> u64 {
        let digest = md5::compute(key);
        let prefix = [digest[0], digest[1], digest[2], digest[3]];
        u64::from(u32::from_be_bytes(prefix))
    }

    fn max_position(&self) -> u64 {
        u64::from(u32::MAX)
    }

    fn name(&self) -> &'static str {
        "md5"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_md5_prefix() {
        // md5("") = d41d8cd98f00b204e9800998ecf8427e
        assert_eq!(Md5Hasher.hash(b""), 0xd41d_8cd9);
        // md5("abc") = 900150983cd24fb0d6963f7d28e17f72
        assert_eq!(Md5Hasher.hash(b"abc"), 0x9001_5098);
    }
}
