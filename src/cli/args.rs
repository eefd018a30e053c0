//! CLI argument definitions using clap.
//!
//! Three pipeline commands, used in strict order:
//!
//! - `extract`: content tree -> consolidated document
//! - `generate`: consolidated document -> candidate catalog (POT)
//! - `inject`: compiled catalog + document -> localized JSON outputs
//!
//! plus `init`, which writes a starter configuration file.

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

use crate::config::CONFIG_FILE_NAME;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }
}

/// Common arguments shared by all pipeline commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Configuration file
    #[arg(short, long, env = "LOREPOT_CONFIG", default_value = CONFIG_FILE_NAME)]
    pub config: PathBuf,

    /// Treat configuration warnings as fatal
    #[arg(long)]
    pub strict: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct ExtractCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Content tree root (overrides config file)
    #[arg(long)]
    pub source_root: Option<PathBuf>,

    /// Consolidated document output path (overrides config file)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct GenerateCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Consolidated document input path (overrides config file)
    #[arg(long)]
    pub document: Option<PathBuf>,

    /// Candidate catalog output path (overrides config file)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct InjectCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Consolidated document input path (overrides config file)
    #[arg(long)]
    pub document: Option<PathBuf>,

    /// Compiled catalog path (overrides config file)
    #[arg(long)]
    pub compiled: Option<PathBuf>,

    /// Combined output path for ordinary types (overrides config file)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Dedicated output path for the culture record (overrides config file)
    #[arg(long)]
    pub culture_output: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract game content into the consolidated document
    Extract(ExtractCommand),
    /// Generate the candidate translation catalog
    Generate(GenerateCommand),
    /// Inject compiled translations back into game-shaped JSON
    Inject(InjectCommand),
    /// Write a starter configuration file
    Init,
}
