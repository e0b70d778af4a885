//! Subcommands and their output.

use std::fmt;

use chash_ring::{HashFunction, HashRing, NodeId, VirtualNode};
use clap::Subcommand;

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print the nodes responsible for a key, primary first.
    Lookup {
        key: String,
        /// Number of distinct nodes to return.
        #[arg(short = 'k', long, default_value_t = 1)]
        count: usize,
    },
    /// Print the list of physical nodes.
    Describe,
    /// Print the share of the hash space owned by each node.
    Ownership,
    /// Print every virtual node position.
    Positions,
}

/// Output of a command, rendered one item per line.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandResult {
    Nodes(Vec<NodeId>),
    Text(String),
    Shares(Vec<(NodeId, f64)>),
    Positions(Vec<VirtualNode>),
}

impl Command {
    pub fn execute<H: HashFunction>(&self, ring: &HashRing<H>) -> chash_ring::Result<CommandResult> {
        Ok(match self {
            Command::Lookup { key, count } => CommandResult::Nodes(ring.lookup_n(key, *count)?),
            Command::Describe => CommandResult::Text(ring.describe()),
            Command::Ownership => CommandResult::Shares(ring.ownership()),
            Command::Positions => CommandResult::Positions(ring.virtual_positions()),
        })
    }
}

impl fmt::Display for CommandResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandResult::Nodes(nodes) if nodes.is_empty() => write!(f, "(no nodes)"),
            CommandResult::Nodes(nodes) => {
                let lines: Vec<&str> = nodes.iter().map(NodeId::as_str).collect();
                write!(f, "{}", lines.join("\n"))
            }
            CommandResult::Text(text) => write!(f, "{}", text),
            CommandResult::Shares(shares) => {
                let lines: Vec<String> = shares
                    .iter()
                    .map(|(id, share)| format!("{}\t{:.2}%", id, share * 100.0))
                    .collect();
                write!(f, "{}", lines.join("\n"))
            }
            CommandResult::Positions(vnodes) => {
                let lines: Vec<String> = vnodes
                    .iter()
                    .map(|v| format!("{}\t{}", v.position, v.node_id))
                    .collect();
                write!(f, "{}", lines.join("\n"))
            }
        }
    }
}
