//! Hash functions that place virtual nodes and resources on the ring.
//!
//! The ring only relies on the [`HashFunction`] capability, so callers can
//! plug in their own implementation. Four strategies ship with the crate:
//!
//! - [`Crc32Hasher`]: IEEE CRC-32, 32-bit output (default)
//! - [`Md5Hasher`]: first four bytes of the MD5 digest, big-endian, 32-bit output
//! - [`SipHasher`]: SipHash-1-3, 64-bit output
//! - [`Xxh3Hasher`]: XXH3-64, 64-bit output

pub mod crc32;
pub mod kind;
pub mod md5;
pub mod sip;
pub mod traits;
pub mod xxh3;

pub use crc32::Crc32Hasher;
pub use kind::HasherKind;
pub use self::md5::Md5Hasher;
pub use sip::SipHasher;
pub use traits::HashFunction;
pub use xxh3::Xxh3Hasher;
