use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// statdeck - animated terminal dashboards
#[derive(Parser)]
#[command(name = "statdeck")]
#[command(about = "A terminal dashboard with entrance, reveal, and counter animations")]
#[command(version)]
pub struct Cli {
    /// Path to a deck configuration file (TOML). Defaults are used when
    /// omitted.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Write logs to this file (the TUI owns the terminal, so logging is
    /// file-only). RUST_LOG controls the filter.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the dashboard viewer (the default when no command is given)
    View {
        /// Path to a page document (TOML); the built-in demo page is used
        /// when omitted
        #[arg(short, long)]
        page: Option<PathBuf>,
    },
    /// Validate a page document
    Validate {
        /// Path to the page document to validate
        page: PathBuf,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        <Self as clap::Parser>::parse()
    }
}
