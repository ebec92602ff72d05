use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Audit property statement PDFs: cash balances, management fees, and
/// rent-roll reconciliation.
#[derive(Debug, Parser)]
#[command(name = "propaudit", about, version)]
pub struct Cli {
    /// Enable debug logging to stderr (see also PROPAUDIT_LOG)
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Audit a statement and report PASS/FAIL/INFO checks per property
    Audit {
        /// Path to the statement PDF
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
        format: ReportFormat,

        /// Maximum number of pages to decode
        #[arg(long)]
        max_pages: Option<usize>,
    },

    /// Print extracted page text (extraction debugging)
    Text {
        /// Path to the statement PDF
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Page range (e.g. '1,3-5'). Default: all pages
        #[arg(long)]
        pages: Option<String>,
    },

    /// Print positioned words with bounding boxes (extraction debugging)
    Words {
        /// Path to the statement PDF
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Page range (e.g. '1,3-5'). Default: all pages
        #[arg(long)]
        pages: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

/// Output format for the audit subcommand.
#[derive(Debug, Clone, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable report
    Text,
    /// JSON report (the transport contract shape)
    Json,
}

/// Output format for the words subcommand.
#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Plain text (tab-separated)
    Text,
    /// JSON output
    Json,
}
