use anyhow::Result;
use clap::Parser;

mod cli;
mod compare_cmd;
mod run_cmd;
mod trim_cmd;

use cli::{Cli, Command};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Run(args) => run_cmd::run_tests(args),
        Command::Compare(args) => compare_cmd::run_compare(args),
        Command::Trim(args) => trim_cmd::run_trim(args),
    }
}
