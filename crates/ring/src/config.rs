//! JSON configuration for a ring.
//!
//! ```json
//! {
//!   "replicas": 128,
//!   "hasher": "md5",
//!   "nodes": [
//!     { "id": "cache-a" },
//!     { "id": "cache-b", "weight": 2.0 }
//!   ]
//! }
//! ```
//!
//! Every field is optional. The library reads no environment variables.

use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::hasher::{HashFunction, HasherKind};
use crate::ring::{HashRing, RingBuilder, DEFAULT_REPLICAS};

/// Top-level ring configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RingConfig {
    /// Virtual nodes per unit of weight. Zero means the default of 64.
    pub replicas: usize,
    /// Hash function: `"crc32"` (default), `"md5"`, `"sip"` or `"xxh3"`.
    pub hasher: HasherKind,
    /// Initial nodes, added atomically.
    pub nodes: Vec<NodeConfig>,
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            replicas: DEFAULT_REPLICAS,
            hasher: HasherKind::default(),
            nodes: Vec::new(),
        }
    }
}

/// One `nodes` entry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NodeConfig {
    pub id: String,
    #[serde(default = "default_weight")]
    pub weight: f64,
}

fn default_weight() -> f64 {
    1.0
}

impl RingConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&json)
    }

    /// Builds a ring with the configured hasher and nodes.
    pub fn build_ring(&self) -> Result<HashRing<Box<dyn HashFunction>>> {
        self.nodes
            .iter()
            .fold(
                RingBuilder::new()
                    .hasher(self.hasher.build())
                    .replicas(self.replicas),
                |builder, node| builder.weighted_node(node.id.as_str(), node.weight),
            )
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = RingConfig::from_json_str("{}").unwrap();
        assert_eq!(config, RingConfig::default());

        let ring = config.build_ring().unwrap();
        assert_eq!(ring.replicas(), 64);
        assert_eq!(ring.hasher_name(), "crc32");
        assert!(ring.is_empty());
    }

    #[test]
    fn test_full_config() {
        let config = RingConfig::from_json_str(
            r#"{
                "replicas": 10,
                "hasher": "md5",
                "nodes": [{ "id": "a" }, { "id": "b", "weight": 2.5 }]
            }"#,
        )
        .unwrap();

        assert_eq!(config.hasher, HasherKind::Md5);
        assert_eq!(config.nodes[0].weight, 1.0);

        let ring = config.build_ring().unwrap();
        assert_eq!(ring.hasher_name(), "md5");
        assert_eq!(ring.node("b").unwrap().weight, 2.5);
        assert_eq!(ring.nodes(), vec!["a", "b"]);
    }

    #[test]
    fn test_bad_config() {
        assert!(matches!(
            RingConfig::from_json_str(r#"{ "hasher": "sha1" }"#),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            RingConfig::from_json_str(r#"{ "nodes": [{ "weight": 1.0 }] }"#),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            RingConfig::load("/nonexistent/ring.json"),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_duplicate_nodes_fail_to_build() {
        let config = RingConfig::from_json_str(r#"{ "nodes": [{ "id": "a" }, { "id": "a" }] }"#)
            .unwrap();
        assert!(config.build_ring().is_err());
    }
}
