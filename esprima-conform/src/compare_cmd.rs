use std::fs;

use anyhow::{bail, Context, Result};
use ast_diff_core::{format_json, parse};
use esprima_conform::diagnostics::render_trimmed;
use esprima_conform::init_tracing;
use esprima_conform::normalize::compare_to_esprima;
use esprima_conform::report::{render_trimmed as render_trimmed_lines, render_verdict};

use crate::cli::{CompareArgs, OutputFormat};

pub fn run_compare(args: CompareArgs) -> Result<()> {
    init_tracing(args.debug);

    let candidate = fs::read_to_string(&args.candidate)
        .with_context(|| format!("failed to read {}", args.candidate.display()))?;
    let reference = fs::read_to_string(&args.reference)
        .with_context(|| format!("failed to read {}", args.reference.display()))?;

    let hermes = parse(candidate.as_bytes())
        .with_context(|| format!("failed to parse {}", args.candidate.display()))?;
    let esprima = parse(reference.as_bytes())
        .with_context(|| format!("failed to parse {}", args.reference.display()))?;
    let verdict = compare_to_esprima(hermes, esprima);

    match args.format {
        OutputFormat::Text => println!("{}", render_verdict(&verdict)),
        OutputFormat::Json => println!("{}", format_json(&verdict)),
    }
    if args.debug && !verdict.is_equal() {
        let trimmed = render_trimmed(&candidate, &reference)?;
        eprintln!("{}", render_trimmed_lines(&trimmed));
    }

    if let Some(mismatch) = verdict.mismatch() {
        bail!("ast not expected: {mismatch}");
    }
    Ok(())
}
