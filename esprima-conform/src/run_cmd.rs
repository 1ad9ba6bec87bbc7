use anyhow::{bail, Context, Result};
use esprima_conform::config::{default_config, load_config};
use esprima_conform::init_tracing;
use esprima_conform::report::{render_report_line, render_summary, render_trimmed};
use esprima_conform::runner::{RunSummary, Runner, TestReport};
use serde::Serialize;

use crate::cli::{OutputFormat, RunArgs};

#[derive(Serialize)]
struct RunOutput<'a> {
    tests: &'a [TestReport],
    summary: RunSummary,
}

pub fn run_tests(args: RunArgs) -> Result<()> {
    init_tracing(args.debug);

    let config = match &args.config {
        Some(path) => load_config(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => default_config(),
    };
    let command = config.parser_command(args.hermes.as_deref(), args.timeout)?;

    let runner = Runner::new(command, args.debug);
    let reports = runner.run_all(&args.paths)?;
    let summary = RunSummary::from_reports(&reports);

    match args.format {
        OutputFormat::Text => {
            for report in &reports {
                println!("{}", render_report_line(report));
                if let Some(trimmed) = &report.trimmed {
                    eprintln!("{}", render_trimmed(trimmed));
                }
            }
            println!("{}", render_summary(&summary));
        }
        OutputFormat::Json => {
            let output = RunOutput {
                tests: &reports,
                summary,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    if !summary.is_success() {
        bail!(
            "run failed: {} failed, {} timed out",
            summary.failed,
            summary.timeout
        );
    }
    Ok(())
}
