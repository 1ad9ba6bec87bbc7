use ast_diff_core::{format_summary, format_text, Verdict};
use colored::Colorize;

use crate::diagnostics::TrimmedTrees;
use crate::outcome::TestStatus;
use crate::runner::{RunSummary, TestReport};

/// `STATUS path: reason`, colored by status.
pub fn render_report_line(report: &TestReport) -> String {
    let status = report.result.status;
    let label = match status {
        TestStatus::Passed => status.label().green(),
        TestStatus::Failed => status.label().red(),
        TestStatus::Skipped => status.label().yellow(),
        TestStatus::Timeout => status.label().magenta(),
    };
    if report.result.reason.is_empty() {
        format!("{label} {}", report.path.display())
    } else {
        format!("{label} {}: {}", report.path.display(), report.result.reason)
    }
}

/// Render the trimmed trees the way they are printed in debug runs.
pub fn render_trimmed(trimmed: &TrimmedTrees) -> String {
    format!(
        "trimmed hermes ast: {}\ntrimmed expected ast: {}",
        trimmed.hermes, trimmed.expected
    )
}

/// Render run totals.
pub fn render_summary(summary: &RunSummary) -> String {
    format!(
        "total={} passed={} failed={} skipped={} timeout={}",
        summary.total(),
        summary.passed,
        summary.failed,
        summary.skipped,
        summary.timeout
    )
    .cyan()
    .to_string()
}

/// Render a single comparison for terminal output.
pub fn render_verdict(verdict: &Verdict) -> String {
    let text = format_text(verdict);
    let colored = if verdict.is_equal() {
        text.green()
    } else {
        text.red()
    };
    format!("{colored}\n{}", format_summary(verdict).cyan())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::{render_report_line, render_summary, render_trimmed};
    use crate::diagnostics::TrimmedTrees;
    use crate::outcome::TestResult;
    use crate::runner::{RunSummary, TestReport};

    #[test]
    fn report_line_names_status_path_and_reason() {
        colored::control::set_override(false);
        let report = TestReport {
            path: PathBuf::from("es6/arrow.js"),
            result: TestResult::failed("test should fail"),
            trimmed: None,
        };
        assert_eq!(
            render_report_line(&report),
            "FAIL es6/arrow.js: test should fail"
        );
    }

    #[test]
    fn passing_report_without_reason_is_one_word_line() {
        colored::control::set_override(false);
        let report = TestReport {
            path: PathBuf::from("a.js"),
            result: TestResult::passed(""),
            trimmed: None,
        };
        assert_eq!(render_report_line(&report), "PASS a.js");
    }

    #[test]
    fn trimmed_trees_render_as_two_labelled_lines() {
        let trimmed = TrimmedTrees {
            hermes: "{}".to_string(),
            expected: "[]".to_string(),
        };
        assert_eq!(
            render_trimmed(&trimmed),
            "trimmed hermes ast: {}\ntrimmed expected ast: []"
        );
    }

    #[test]
    fn summary_lists_every_count() {
        colored::control::set_override(false);
        let summary = RunSummary {
            passed: 3,
            failed: 1,
            skipped: 0,
            timeout: 2,
        };
        assert_eq!(
            render_summary(&summary),
            "total=6 passed=3 failed=1 skipped=0 timeout=2"
        );
    }
}
