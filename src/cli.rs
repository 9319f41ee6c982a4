// CLI commands

use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::consensus::{Miner, ProofOfWork, DEFAULT_DIFFICULTY};
use crate::{Block, Node, NodeConfig};

#[derive(Parser)]
#[command(name = "pow-ledger")]
#[command(about = "Proof-of-work ledger node", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP node
    Serve {
        /// TOML config file
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Listen address, overrides the config file
        #[arg(short, long)]
        bind: Option<SocketAddr>,
        /// Leading hex zeros required, overrides the config file
        #[arg(short, long)]
        difficulty: Option<usize>,
    },

    /// Search for a proof that solves the puzzle for a block
    Solve {
        /// Block as JSON, e.g. the `last_block` returned by a node
        block: String,
        /// Leading hex zeros required
        #[arg(short, long, default_value_t = DEFAULT_DIFFICULTY)]
        difficulty: usize,
        /// First proof to try
        #[arg(short, long, default_value = "0")]
        start: u64,
    },

    /// Print a block's canonical string and digest
    Digest {
        /// Block as JSON
        block: String,
    },
}

/// CLI handler
#[derive(Default)]
pub struct CliHandler;

impl CliHandler {
    pub fn new() -> Self {
        Self
    }

    /// Handle CLI command
    pub async fn handle(&self, cli: Cli) -> Result<(), String> {
        match cli.command {
            Commands::Serve { config, bind, difficulty } => self.serve(config, bind, difficulty).await,
            Commands::Solve { block, difficulty, start } => self.solve(&block, difficulty, start),
            Commands::Digest { block } => self.digest(&block),
        }
    }

    async fn serve(
        &self,
        config: Option<PathBuf>,
        bind: Option<SocketAddr>,
        difficulty: Option<usize>,
    ) -> Result<(), String> {
        let config = match config {
            Some(path) => {
                log::info!("Loading config from {}", path.display());
                NodeConfig::load(&path).map_err(|e| e.to_string())?
            }
            None => NodeConfig::default(),
        };
        let config = config
            .with_overrides(bind, difficulty)
            .map_err(|e| e.to_string())?;

        Node::new(&config).listen().await
    }

    fn solve(&self, block: &str, difficulty: usize, start: u64) -> Result<(), String> {
        let block = parse_block(block)?;
        let miner = Miner::new(ProofOfWork::new(difficulty));

        println!("Solving block {} at difficulty {}...", block.index, miner.pow.difficulty());
        let result = miner.mine(&block.canonical_string(), start);

        if !result.success {
            return Err(format!("No proof found after {} attempts", result.attempts));
        }

        println!("✓ Proof found");
        println!("  Proof: {}", result.proof);
        println!("  Hash: {}", result.hash);
        println!("  Attempts: {}", result.attempts);
        println!("  Duration: {:?}", result.duration);
        println!("  Hash rate: {:.2} H/s", result.hash_rate());

        Ok(())
    }

    fn digest(&self, block: &str) -> Result<(), String> {
        let block = parse_block(block)?;

        println!("Block {}:", block.index);
        println!("  Canonical: {}", block.canonical_string());
        println!("  Digest: {}", block.hash());

        Ok(())
    }
}

/// Accept either a bare block or a `{"last_block": ...}` response body
fn parse_block(raw: &str) -> Result<Block, String> {
    let value: serde_json::Value =
        serde_json::from_str(raw).map_err(|e| format!("Invalid JSON: {}", e))?;
    let value = match value.get("last_block") {
        Some(inner) => inner.clone(),
        None => value,
    };
    serde_json::from_value(value).map_err(|e| format!("Invalid block: {}", e))
}
