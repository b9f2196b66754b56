//! Command-line interface for docgrid table reconstruction.
//!
//! Works on saved analysis dumps: a JSON file holding either a bare block
//! array or a result envelope with a `Blocks` field. `reconstruct` emits
//! persistence-ready table records, `inspect` summarizes a dump without
//! reconstructing.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use docgrid::{Block, ReconstructionConfig, reconstruct_tables, summarize_by_page};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "docgrid", version, about = "Reconstruct data tables from document-analysis block dumps")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconstruct table records from a block dump
    Reconstruct {
        /// Path to the block dump (JSON)
        input: PathBuf,
        /// Write records to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Reconstruction config file (.toml or .json)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Pretty-print the output JSON
        #[arg(long)]
        pretty: bool,
    },
    /// Summarize a block dump without reconstructing
    Inspect {
        /// Path to the block dump (JSON)
        input: PathBuf,
    },
}

/// A dump is either a bare block array or a result envelope.
#[derive(Deserialize)]
#[serde(untagged)]
enum BlockDump {
    List(Vec<Block>),
    Envelope {
        #[serde(rename = "Blocks")]
        blocks: Vec<Block>,
    },
}

fn parse_blocks(content: &str) -> Result<Vec<Block>> {
    let dump: BlockDump = serde_json::from_str(content).context("failed to parse block dump")?;
    Ok(match dump {
        BlockDump::List(blocks) => blocks,
        BlockDump::Envelope { blocks } => blocks,
    })
}

fn load_blocks(path: &Path) -> Result<Vec<Block>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_blocks(&content)
}

fn load_config(path: Option<&Path>) -> Result<ReconstructionConfig> {
    match path {
        Some(path) => ReconstructionConfig::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(ReconstructionConfig::default()),
    }
}

fn run_reconstruct(
    input: &Path,
    output: Option<&Path>,
    config: Option<&Path>,
    pretty: bool,
) -> Result<()> {
    let blocks = load_blocks(input)?;
    let config = load_config(config)?;

    let records = reconstruct_tables(&blocks, &config);
    for (page, tables) in summarize_by_page(&records) {
        tracing::info!(page, table_count = tables.len(), "reconstructed");
    }

    let json = if pretty {
        serde_json::to_string_pretty(&records)?
    } else {
        serde_json::to_string(&records)?
    };

    match output {
        Some(path) => {
            std::fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(records = records.len(), output = %path.display(), "records written");
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn run_inspect(input: &Path) -> Result<()> {
    let blocks = load_blocks(input)?;

    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for block in &blocks {
        let name = serde_json::to_value(block.block_type)?
            .as_str()
            .unwrap_or("UNKNOWN")
            .to_string();
        *counts.entry(name).or_default() += 1;
    }

    println!("{} blocks", blocks.len());
    for (block_type, count) in counts {
        println!("  {block_type}: {count}");
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Reconstruct {
            input,
            output,
            config,
            pretty,
        } => run_reconstruct(&input, output.as_deref(), config.as_deref(), pretty),
        Commands::Inspect { input } => run_inspect(&input),
    }
}
