use anyhow::{Context, Result};
use ast_diff_core::{parse_file, write_sorted};
use esprima_conform::diagnostics::{trim_esprima, trim_hermes};

use crate::cli::{Side, TrimArgs};

pub fn run_trim(args: TrimArgs) -> Result<()> {
    let node = parse_file(&args.file)
        .with_context(|| format!("failed to parse {}", args.file.display()))?;
    let trimmed = match args.side {
        Side::Hermes => trim_hermes(&node),
        Side::Esprima => trim_esprima(&node),
    };
    println!("{}", write_sorted(&trimmed)?);
    Ok(())
}
