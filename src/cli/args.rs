//! CLI argument definitions using clap.
//!
//! ```text
//! job-linter <DIRECTORY> [--conf <FILE>] [--format human|json] [-v]
//! ```

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    /// Directory of job configuration XML files, one job per file
    pub directory: PathBuf,

    /// Configuration file (INI, or TOML for .toml files); the [job_linter] section holds linter options
    #[arg(long = "conf", env = "JOB_LINTER_CONF")]
    pub conf: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
}
