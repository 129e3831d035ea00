//! CLI argument definitions using clap

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// React component data-flow graph analyzer
#[derive(Parser, Debug)]
#[command(name = "hookflow")]
#[command(about = "Analyze a React component source into a data-flow graph layout")]
#[command(version)]
pub struct Cli {
    /// Path to the component source file (.js, .jsx, .ts, .tsx)
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Output format
    #[arg(short, long, default_value = "json", value_enum)]
    pub format: OutputFormat,

    /// Print the intermediate component analysis instead of the graph layout
    #[arg(long)]
    pub analysis: bool,

    /// Show verbose output on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

/// Output formats for the graph layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
}
