//! # md-suggest CLI
//!
//! Runs the suggestion engine over JSON documents.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use md_suggest::{
    EditOperation, Node, StructureMarkGroup, SuggestConfig, SuggestionId, Transaction,
    annotate_with_config, apply_suggestion, find_structure_group, is_structural,
    revert_all_suggestions, revert_suggestion, suggestion_ids,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Exit code for a step that is not structural and was left untracked.
const EXIT_NOT_STRUCTURAL: i32 = 2;

#[derive(Parser)]
#[command(name = "md-suggest")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reports whether a range holds content or only node boundaries
    Classify {
        #[arg(long)]
        doc: PathBuf,
        #[arg(long)]
        from: usize,
        #[arg(long)]
        to: usize,
    },
    /// Applies a step as a structural suggestion and prints the document
    Annotate {
        #[arg(long)]
        doc: PathBuf,
        /// JSON file holding one step
        #[arg(long)]
        step: PathBuf,
        /// JSON file holding the steps applied since the step was made
        #[arg(long)]
        prev: Option<PathBuf>,
        #[arg(long)]
        id: u64,
        /// Fail when a boundary cannot be anchored
        #[arg(long)]
        strict_anchors: bool,
        /// Only trust the step's own structure flag
        #[arg(long)]
        no_infer_structure: bool,
    },
    /// Reverts a suggestion and prints the document
    Revert {
        #[arg(long)]
        doc: PathBuf,
        #[arg(long, required_unless_present = "all", conflicts_with = "all")]
        id: Option<u64>,
        /// Revert every structural suggestion
        #[arg(long)]
        all: bool,
        /// Print the document together with the replayed steps
        #[arg(long)]
        json: bool,
    },
    /// Accepts a suggestion and prints the document
    Apply {
        #[arg(long)]
        doc: PathBuf,
        #[arg(long)]
        id: u64,
    },
    /// Lists structural suggestions anchored in a document
    Groups {
        #[arg(long)]
        doc: PathBuf,
        #[arg(long)]
        json: bool,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GroupSummary {
    id: SuggestionId,
    #[serde(rename = "type")]
    kind: &'static str,
    from: usize,
    to: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    gap_from: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    gap_to: Option<usize>,
}

impl From<&StructureMarkGroup> for GroupSummary {
    fn from(group: &StructureMarkGroup) -> Self {
        let gap = group.gap();
        Self {
            id: group.id(),
            kind: match group {
                StructureMarkGroup::Replace { .. } => "replace",
                StructureMarkGroup::ReplaceAround { .. } => "replaceAround",
            },
            from: group.from(),
            to: group.to(),
            gap_from: gap.map(|(from, _)| from),
            gap_to: gap.map(|(_, to)| to),
        }
    }
}

#[derive(Serialize)]
struct RevertOutput<'a> {
    doc: &'a Node,
    replayed: &'a [EditOperation],
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli.command) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("Error: {err:#}");
            std::process::exit(1);
        }
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Commands) -> Result<i32> {
    match command {
        Commands::Classify { doc, from, to } => {
            let doc: Node = read_json(&doc)?;
            if is_structural(&doc, from, to) {
                println!("structural");
            } else {
                println!("content");
            }
            Ok(0)
        }
        Commands::Annotate {
            doc,
            step,
            prev,
            id,
            strict_anchors,
            no_infer_structure,
        } => {
            let doc: Node = read_json(&doc)?;
            let step: EditOperation = read_json(&step)?;
            let prev: Vec<EditOperation> = match prev {
                Some(path) => read_json(&path)?,
                None => Vec::new(),
            };
            let config = SuggestConfig {
                infer_structure: !no_infer_structure,
                strict_anchors,
            };
            let mut tx = Transaction::new(doc);
            let tracked = annotate_with_config(&mut tx, &step, &prev, SuggestionId(id), &config)
                .with_context(|| format!("Failed to annotate suggestion {id}"))?;
            if !tracked {
                eprintln!("Step is not structural; nothing was annotated.");
                return Ok(EXIT_NOT_STRUCTURAL);
            }
            print_json(tx.doc())?;
            Ok(0)
        }
        Commands::Revert { doc, id, all, json } => {
            let doc: Node = read_json(&doc)?;
            let mut tx = Transaction::new(doc);
            let replayed = match id {
                Some(id) if !all => revert_suggestion(&mut tx, SuggestionId(id))
                    .with_context(|| format!("Failed to revert suggestion {id}"))?,
                _ => revert_all_suggestions(&mut tx).context("Failed to revert suggestions")?,
            };
            if json {
                print_json(&RevertOutput {
                    doc: tx.doc(),
                    replayed: &replayed,
                })?;
            } else {
                print_json(tx.doc())?;
            }
            Ok(0)
        }
        Commands::Apply { doc, id } => {
            let doc: Node = read_json(&doc)?;
            let mut tx = Transaction::new(doc);
            apply_suggestion(&mut tx, SuggestionId(id))
                .with_context(|| format!("Failed to apply suggestion {id}"))?;
            print_json(tx.doc())?;
            Ok(0)
        }
        Commands::Groups { doc, json } => {
            let doc: Node = read_json(&doc)?;
            let mut summaries = Vec::new();
            for id in suggestion_ids(&doc) {
                let group = find_structure_group(&doc, id)
                    .with_context(|| format!("Failed to read suggestion {id}"))?;
                summaries.push(GroupSummary::from(&group));
            }
            if json {
                print_json(&summaries)?;
            } else if summaries.is_empty() {
                println!("No structural suggestions.");
            } else {
                for group in summaries {
                    match (group.gap_from, group.gap_to) {
                        (Some(gap_from), Some(gap_to)) => println!(
                            "{} {} [{}, {}) gap [{}, {})",
                            group.id, group.kind, group.from, group.to, gap_from, gap_to
                        ),
                        _ => println!("{} {} [{}, {})", group.id, group.kind, group.from, group.to),
                    }
                }
            }
            Ok(0)
        }
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let data = fs::read(path).with_context(|| format!("Failed to read {:?}", path))?;
    serde_json::from_slice(&data).with_context(|| format!("Failed to parse {:?}", path))
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{out}");
    Ok(())
}
