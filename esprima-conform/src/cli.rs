use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "esprima-conform")]
#[command(about = "Check Hermes parser output against the Esprima test suite")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Run the parser over fixture files or directories.
    Run(RunArgs),
    /// Compare a Hermes tree dump against an Esprima tree.
    Compare(CompareArgs),
    /// Print the trimmed, key-sorted rendering of one tree.
    Trim(TrimArgs),
}

#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Test files or directories of tests.
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,
    /// Hermes binary; overrides the config file.
    #[arg(long)]
    pub hermes: Option<PathBuf>,
    /// Runner config TOML. Defaults to the built-in config.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Seconds allowed per parser invocation; overrides the config file.
    #[arg(long)]
    pub timeout: Option<u64>,
    /// Verbose logging plus trimmed trees for every mismatch.
    #[arg(long)]
    pub debug: bool,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Parser, Debug)]
pub struct CompareArgs {
    /// Hermes `-dump-ast` output.
    pub candidate: PathBuf,
    /// Esprima `.tree.json` file.
    pub reference: PathBuf,
    /// Also print both trimmed trees.
    #[arg(long)]
    pub debug: bool,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Parser, Debug)]
pub struct TrimArgs {
    pub file: PathBuf,
    /// Which grammar produced the tree.
    #[arg(long, value_enum)]
    pub side: Side,
}

#[derive(Clone, Copy, Debug, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, ValueEnum, PartialEq, Eq)]
pub enum Side {
    Hermes,
    Esprima,
}
