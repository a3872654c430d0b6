use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

pub mod global;

pub use global::{GlobalFlags, OutputFormat};

/// Top-level CLI parser for the `trials` binary.
#[derive(Debug, Parser)]
#[command(name = "trials", version, about = "Clinical trial upload and lookup")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file layered above the default locations
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

impl Cli {
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
            config: self.config.clone(),
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Validate and store a trial document.
    Upload(UploadArgs),
    /// Show a stored trial by its record id.
    Get {
        id: String,
    },
    /// List stored trials.
    List {
        /// Only trials with this status (NotStarted, Ongoing, Completed)
        #[arg(short, long)]
        status: Option<String>,
    },
    /// Print a JSON Schema (all kinds when none is given).
    Schema(SchemaArgs),
}

#[derive(Debug, Args)]
pub struct UploadArgs {
    /// Path to a `.json` trial document
    pub file: PathBuf,
}

#[derive(Debug, Args)]
pub struct SchemaArgs {
    /// clinicaltrial, trial_record, or trial_created
    pub kind: Option<String>,
}
