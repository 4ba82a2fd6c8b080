//! CLI command definitions and argument parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// SurveySavvy CLI - Import unit survey reports into a SQLite database.
#[derive(Debug, Parser)]
#[command(name = "surveysavvy")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Database file (overrides the configured path)
    #[arg(short, long, global = true, env = "SURVEYSAVVY_DATABASE")]
    pub database: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (one line per item)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create the database and seed the question catalogue
    InitDb,

    /// Import survey report PDFs
    Import(ImportArgs),

    /// Extract one report without touching the database
    Inspect(InspectArgs),

    /// List imported surveys
    List(ListArgs),
}

/// Arguments for the import command.
#[derive(Debug, Parser)]
pub struct ImportArgs {
    /// Report files to import, in order
    pub paths: Vec<PathBuf>,

    /// Also import every PDF in this folder
    #[arg(long)]
    pub dir: Option<PathBuf>,
}

/// Arguments for the inspect command.
#[derive(Debug, Parser)]
pub struct InspectArgs {
    /// Report file to read
    pub pdf: PathBuf,

    /// Write the extracted record as JSON to this file or directory
    #[arg(long)]
    pub save_json: Option<PathBuf>,
}

/// Arguments for the list command.
#[derive(Debug, Parser)]
pub struct ListArgs {
    /// Filter by unit code prefix (e.g. ISYS or ISYS2001)
    #[arg(short, long)]
    pub unit: Option<String>,

    /// Filter by year
    #[arg(short, long)]
    pub year: Option<i32>,

    /// Maximum number of results
    #[arg(short, long)]
    pub limit: Option<usize>,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}
