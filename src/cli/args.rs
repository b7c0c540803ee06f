//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `generate`: Generate conformances and merge the translation table
//! - `entries`: List the localizable entries found under a source root
//! - `init`: Initialize quill configuration file
//!
//! When run as an Xcode build phase, the source and output paths fall back to
//! the phase's environment (`SCRIPT_INPUT_FILE_0`, `SRCROOT`,
//! `SCRIPT_OUTPUT_FILE_0`).

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};

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

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Generate(cmd)) => cmd.args.common.verbose,
            Some(Command::Entries(cmd)) => cmd.args.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by the source-reading commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Structure export file, or root directory containing the exports
    /// [default: $SRCROOT]
    #[arg(env = "SCRIPT_INPUT_FILE_0")]
    pub source: Option<PathBuf>,

    /// Sub-path of the source root to skip (overrides config file; glob allowed)
    #[arg(short = 'x', long)]
    pub exclude: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Parser)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// File (`.swift`) or directory receiving the generated sources
    /// [default: <source>/<marker>.swift]
    #[arg(short, long, env = "SCRIPT_OUTPUT_FILE_0")]
    pub output: Option<PathBuf>,

    /// Translation table (`.strings`) to update; no table is written if omitted
    #[arg(short = 'l', long = "table")]
    pub table: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct GenerateCommand {
    #[command(flatten)]
    pub args: GenerateArgs,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One table identifier per line
    #[default]
    Text,
    /// JSON array of entries
    Json,
}

#[derive(Debug, Parser)]
pub struct EntriesArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Debug, Args)]
pub struct EntriesCommand {
    #[command(flatten)]
    pub args: EntriesArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate localisable string conformances and update the translation table
    Generate(GenerateCommand),
    /// List the localizable entries declared under a source root
    Entries(EntriesCommand),
    /// Initialize a new .quillrc.json configuration file
    Init,
}
