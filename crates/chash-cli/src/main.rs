//! CLI entry point for chash.

use chash_cli::CliConfig;
use clap::Parser;

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();
    config.run()
}
