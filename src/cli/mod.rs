//! CLI argument parsing for promptgen.
//!
//! Uses clap derive macros for declarative argument definitions. The
//! pipeline itself lives in the `commands` module.

use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Generate writing prompts with a hosted chat model and merge them into a
/// markdown document.
///
/// The document must contain the AI-GENERATED-PROMPTS start and end marker
/// comments; everything between them is replaced on each run.
///
/// Endpoint, key and model come from AZURE_AI_ENDPOINT, AZURE_AI_KEY and
/// AZURE_AI_MODEL unless --mock is given.
#[derive(Parser, Debug)]
#[command(name = "promptgen")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Number of prompts to generate.
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u32).range(1..))]
    pub count: u32,

    /// Print the generated markdown instead of writing the document.
    #[arg(long)]
    pub dry_run: bool,

    /// Print the raw model response before parsing it.
    #[arg(long)]
    pub show_raw: bool,

    /// Skip the remote call and use canned prompts (no credentials needed).
    #[arg(long)]
    pub mock: bool,

    /// Markdown document containing the marker pair.
    #[arg(long, value_name = "PATH", default_value = "docs/prompts.md")]
    pub file: PathBuf,

    /// Where to write the run summary JSON.
    #[arg(long, value_name = "PATH", default_value = "docs/prompts.run.json")]
    pub summary: PathBuf,

    /// Increase log verbosity (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
