//! CLI argument definitions using clap derive

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// tabletrace - list the physical tables a SQL statement reads
#[derive(Parser, Debug)]
#[command(name = "tt")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Directory searched for tabletrace.yml
    #[arg(short, long, default_value = ".", global = true)]
    pub project_dir: PathBuf,

    /// Explicit config file path (overrides discovery)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve the physical tables referenced by SQL
    Tables(TablesArgs),

    /// List the supported SQL dialects
    Dialects,

    /// Serve table resolution over HTTP
    Serve(ServeArgs),
}

/// Arguments for the tables command
#[derive(Args, Debug)]
pub struct TablesArgs {
    /// SQL files to resolve (reads stdin when neither files nor --sql are given)
    pub files: Vec<PathBuf>,

    /// Inline SQL text
    #[arg(short, long, conflicts_with = "files")]
    pub sql: Option<String>,

    /// SQL dialect (defaults to the configured dialect)
    #[arg(short, long)]
    pub dialect: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,
}

/// Output format for table listings
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// One table per line
    #[default]
    Text,
    /// JSON report per input
    Json,
}

/// Arguments for the serve command
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Interface to bind (overrides server.host)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind (overrides server.port)
    #[arg(long)]
    pub port: Option<u16>,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
