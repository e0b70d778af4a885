//! Runtime selection of a hash function.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::Error;
use crate::hasher::{Crc32Hasher, HashFunction, Md5Hasher, SipHasher, Xxh3Hasher};

/// Names the built-in hash functions, for configuration files and the CLI.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HasherKind {
    #[default]
    Crc32,
    Md5,
    Sip,
    Xxh3,
}

impl HasherKind {
    /// Instantiates the hash function.
    pub fn build(self) -> Box<dyn HashFunction> {
        match self {
            HasherKind::Crc32 => Box::new(Crc32Hasher),
            HasherKind::Md5 => Box::new(Md5Hasher),
            HasherKind::Sip => Box::new(SipHasher::new()),
            HasherKind::Xxh3 => Box::new(Xxh3Hasher),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HasherKind::Crc32 => "crc32",
            HasherKind::Md5 => "md5",
            HasherKind::Sip => "sip",
            HasherKind::Xxh3 => "xxh3",
        }
    }
}

impl fmt::Display for HasherKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HasherKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "crc32" => Ok(HasherKind::Crc32),
            "md5" => Ok(HasherKind::Md5),
            "sip" | "siphash" => Ok(HasherKind::Sip),
            "xxh3" | "xxhash" => Ok(HasherKind::Xxh3),
            other => Err(Error::InvalidArgument(format!(
                "unknown hasher '{}', expected one of crc32, md5, sip, xxh3",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_build() {
        for kind in [HasherKind::Crc32, HasherKind::Md5, HasherKind::Sip, HasherKind::Xxh3] {
            let parsed: HasherKind = kind.as_str().parse().unwrap();
            assert_eq!(parsed, kind);
            assert_eq!(kind.build().name(), kind.as_str());
        }
    }

    #[test]
    fn test_parse_unknown() {
        assert!(matches!(
            "sha1".parse::<HasherKind>(),
            Err(Error::InvalidArgument(_))
        ));
    }
}
