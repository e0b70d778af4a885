//! Command line options.

use std::path::PathBuf;

use anyhow::Context;
use chash_ring::{HashFunction, HashRing, HasherKind, NodeConfig, RingConfig};
use clap::Parser;
use tracing::debug;

use crate::commands::Command;
use crate::logging;

#[derive(Debug, Parser)]
#[command(name = "chash", version, about = "Inspect consistent hash ring placements")]
pub struct CliConfig {
    /// JSON ring configuration file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Comma-separated node ids, added after the ones from the config file.
    #[arg(short, long, value_delimiter = ',', global = true)]
    pub nodes: Vec<String>,

    /// Virtual nodes per unit of weight.
    #[arg(short, long, global = true)]
    pub replicas: Option<usize>,

    /// Hash function: crc32, md5, sip or xxh3.
    #[arg(long, global = true)]
    pub hasher: Option<HasherKind>,

    /// Weight of the nodes given with --nodes.
    #[arg(short, long, default_value_t = 1.0, global = true)]
    pub weight: f64,

    /// Log level used when RUST_LOG is not set.
    #[arg(long, default_value = "warn", global = true)]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

impl CliConfig {
    pub fn run(&self) -> anyhow::Result<()> {
        logging::init(&self.log_level);

        let ring = self.build_ring()?;
        debug!(ring = %ring, "ring ready");

        let result = self.command.execute(&ring)?;
        println!("{}", result);
        Ok(())
    }

    /// Merges the config file (if any) with command line overrides.
    pub fn ring_config(&self) -> anyhow::Result<RingConfig> {
        let mut config = match &self.config {
            Some(path) => RingConfig::load(path)
                .with_context(|| format!("loading ring config {}", path.display()))?,
            None => RingConfig::default(),
        };

        if let Some(replicas) = self.replicas {
            config.replicas = replicas;
        }
        if let Some(hasher) = self.hasher {
            config.hasher = hasher;
        }
        config.nodes.extend(self.nodes.iter().map(|id| NodeConfig {
            id: id.clone(),
            weight: self.weight,
        }));

        Ok(config)
    }

    pub fn build_ring(&self) -> anyhow::Result<HashRing<Box<dyn HashFunction>>> {
        let config = self.ring_config()?;
        config.build_ring().context("building ring")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_overrides() {
        let cli = CliConfig::try_parse_from([
            "chash", "--nodes", "a,b,c", "--replicas", "8", "--hasher", "md5", "describe",
        ])
        .unwrap();

        let config = cli.ring_config().unwrap();
        assert_eq!(config.replicas, 8);
        assert_eq!(config.hasher, HasherKind::Md5);
        assert_eq!(config.nodes.len(), 3);

        let ring = cli.build_ring().unwrap();
        assert_eq!(ring.to_string(), "HashRing{hasher:md5, nodes:[a,b,c]}");
    }

    #[test]
    fn test_rejects_unknown_hasher() {
        assert!(CliConfig::try_parse_from(["chash", "--hasher", "sha1", "describe"]).is_err());
    }

    #[test]
    fn test_duplicate_nodes_fail() {
        let cli = CliConfig::try_parse_from(["chash", "--nodes", "a,a", "describe"]).unwrap();
        assert!(cli.build_ring().is_err());
    }
}
