//! merkle CLI - Command line interface for merkle_primer
//!
//! Builds trees, prints roots and proofs, and verifies proofs. Output is
//! JSON by default so the commands can back a web demo or a script.

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use merkle_primer::{
    records_from, Config, Digest, Engine, HasherKind, OutputFormat, Proof, ProofStep, Record,
};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "merkle")]
#[command(about = "Build merkle trees and check inclusion proofs")]
#[command(version)]
#[command(args_override_self = true)]
struct Cli {
    /// Path to the config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Digest function (overrides config)
    #[arg(short = 'H', long, global = true)]
    hasher: Option<HasherKind>,

    /// Output format (overrides config)
    #[arg(short, long, global = true)]
    format: Option<OutputFormat>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct RecordArgs {
    /// Records, in leaf order
    records: Vec<String>,

    /// Read records from a file, one per line (empty lines skipped)
    #[arg(long, conflicts_with = "records")]
    file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the digest of a single record
    Digest {
        /// The record text
        text: String,
    },

    /// Print the root digest of a tree
    Root {
        #[command(flatten)]
        input: RecordArgs,
    },

    /// Print every level of a tree
    Tree {
        #[command(flatten)]
        input: RecordArgs,
    },

    /// Generate an inclusion proof
    Prove {
        /// Zero-based index of the leaf to prove
        #[arg(short, long)]
        index: usize,
        /// Also write the proof to this file (binary)
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[command(flatten)]
        input: RecordArgs,
    },

    /// Verify an inclusion proof against a root
    Verify {
        /// Leaf digest (hex)
        #[arg(long, required_unless_present = "record", conflicts_with = "record")]
        leaf: Option<Digest>,
        /// Leaf record text (digested with the selected hasher)
        #[arg(long)]
        record: Option<String>,
        /// Expected root digest (hex)
        #[arg(long)]
        root: Digest,
        /// Proof file written by `prove --output`
        #[arg(long, conflicts_with = "steps")]
        proof: Option<PathBuf>,
        /// Proof step as <left|right>:<hex>, in order from the leaf up
        #[arg(long = "step")]
        steps: Vec<ProofStep>,
    },

    /// Show or create the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show the effective configuration
    Show,
    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl RecordArgs {
    fn load(&self) -> anyhow::Result<Vec<Record>> {
        match &self.file {
            Some(path) => {
                let content = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read records from {}", path.display()))?;
                Ok(content
                    .lines()
                    .map(|l| l.trim_end_matches('\r'))
                    .filter(|l| !l.is_empty())
                    .map(Record::from)
                    .collect())
            }
            None => Ok(records_from(&self.records)),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => Config::default_path()?,
    };
    let config = Config::load(&config_path)?;
    let hasher = cli.hasher.unwrap_or(config.hasher);
    let format = cli.format.unwrap_or(config.format);
    let engine = Engine::new(hasher);
    info!(hasher = engine.hasher_name(), "engine ready");

    match cli.command {
        Commands::Digest { text } => {
            let digest = engine.leaf_digest(&Record::from(&text));
            output(
                format,
                &serde_json::json!({
                    "hasher": engine.hasher_name(),
                    "record": text,
                    "digest": digest.to_hex()
                }),
            )?;
        }

        Commands::Root { input } => {
            let records = input.load()?;
            let tree = engine.build(&records);
            output(
                format,
                &serde_json::json!({
                    "hasher": engine.hasher_name(),
                    "leaves": tree.leaf_count(),
                    "empty": tree.is_empty(),
                    "root": tree.root_digest().to_hex()
                }),
            )?;
        }

        Commands::Tree { input } => {
            let records = input.load()?;
            let tree = engine.build(&records);
            match format {
                OutputFormat::Text => print!("{}", tree.render()),
                OutputFormat::Json => {
                    let levels: Vec<Vec<String>> = tree
                        .levels()
                        .iter()
                        .map(|l| l.iter().map(Digest::to_hex).collect())
                        .collect();
                    output(
                        format,
                        &serde_json::json!({
                            "hasher": engine.hasher_name(),
                            "leaves": tree.leaf_count(),
                            "depth": tree.depth(),
                            "root": tree.root_digest().to_hex(),
                            "levels": levels
                        }),
                    )?;
                }
            }
        }

        Commands::Prove {
            index,
            output: proof_path,
            input,
        } => {
            let records = input.load()?;
            let tree = engine.build(&records);
            let proof = tree.prove(index);
            let leaf = tree.leaf_digest(index);
            if leaf.is_none() {
                warn!(index, leaves = records.len(), "index out of range, proof is empty");
            }

            if let Some(path) = &proof_path {
                write_proof(path, &proof)?;
            }

            output(
                format,
                &serde_json::json!({
                    "hasher": engine.hasher_name(),
                    "index": index,
                    "leaves": tree.leaf_count(),
                    "in_range": leaf.is_some(),
                    "leaf": leaf.map(|d| d.to_hex()),
                    "root": tree.root_digest().to_hex(),
                    "proof": proof
                }),
            )?;
        }

        Commands::Verify {
            leaf,
            record,
            root,
            proof,
            steps,
        } => {
            let leaf = match (leaf, record) {
                (Some(leaf), _) => leaf,
                (None, Some(text)) => engine.leaf_digest(&Record::from(text)),
                (None, None) => bail!("either --leaf or --record is required"),
            };
            let proof = match proof {
                Some(path) => read_proof(&path)?,
                None => Proof::new(steps),
            };

            let computed = proof.compute_root(engine.hasher(), &leaf);
            let valid = engine.verify(&leaf, &proof, &root);
            output(
                format,
                &serde_json::json!({
                    "hasher": engine.hasher_name(),
                    "valid": valid,
                    "leaf": leaf.to_hex(),
                    "root": root.to_hex(),
                    "computed": computed.to_hex(),
                    "steps": proof.len()
                }),
            )?;
            if !valid {
                std::process::exit(1);
            }
        }

        Commands::Config { action } => match action {
            ConfigAction::Show => {
                output(
                    format,
                    &serde_json::json!({
                        "path": config_path.display().to_string(),
                        "exists": config_path.exists(),
                        "config": config,
                        "effective": {
                            "hasher": hasher,
                            "format": format
                        }
                    }),
                )?;
            }
            ConfigAction::Init { force } => {
                if config_path.exists() && !force {
                    bail!(
                        "Config already exists at {} (use --force to overwrite)",
                        config_path.display()
                    );
                }
                Config::default().save(&config_path)?;
                output(
                    format,
                    &serde_json::json!({
                        "status": "ok",
                        "message": format!("Wrote config to {}", config_path.display())
                    }),
                )?;
            }
        },
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_env("MERKLE_LOG").unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}

fn write_proof(path: &Path, proof: &Proof) -> anyhow::Result<()> {
    let bytes = proof.to_bytes()?;
    std::fs::write(path, bytes)
        .with_context(|| format!("Failed to write proof to {}", path.display()))?;
    info!(path = %path.display(), steps = proof.len(), "wrote proof");
    Ok(())
}

fn read_proof(path: &Path) -> anyhow::Result<Proof> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read proof from {}", path.display()))?;
    Proof::from_bytes(&bytes).with_context(|| format!("Invalid proof file {}", path.display()))
}

fn output(format: OutputFormat, value: &serde_json::Value) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string(value)?),
        OutputFormat::Text => println!("{}", serde_json::to_string_pretty(value)?),
    }
    Ok(())
}
