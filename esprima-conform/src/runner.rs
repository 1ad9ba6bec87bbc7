//! Drive the parser over a set of fixtures and collect one report per test.

use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::classify::{classify, ExpectedArtifact};
use crate::diagnostics::{render_trimmed, TrimmedTrees};
use crate::fixture::{collect_tests, load_expected, resolve_expected, FixtureError};
use crate::outcome::{TestResult, TestStatus};
use crate::process::{ParserCommand, ProcessError, ProcessOutcome};

/// Errors that stop a run. Test failures are reported, not raised.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Fixture(#[from] FixtureError),
    #[error(transparent)]
    Process(#[from] ProcessError),
}

/// Outcome of a single fixture.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestReport {
    pub path: PathBuf,
    #[serde(flatten)]
    pub result: TestResult,
    /// Trimmed trees for a mismatch, collected in debug mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trimmed: Option<TrimmedTrees>,
}

/// Per-status totals for a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub timeout: usize,
}

impl RunSummary {
    pub fn from_reports(reports: &[TestReport]) -> Self {
        reports.iter().fold(Self::default(), |mut summary, report| {
            match report.result.status {
                TestStatus::Passed => summary.passed += 1,
                TestStatus::Failed => summary.failed += 1,
                TestStatus::Skipped => summary.skipped += 1,
                TestStatus::Timeout => summary.timeout += 1,
            }
            summary
        })
    }

    pub fn total(&self) -> usize {
        self.passed + self.failed + self.skipped + self.timeout
    }

    /// No test failed or timed out.
    pub fn is_success(&self) -> bool {
        self.failed == 0 && self.timeout == 0
    }
}

pub struct Runner {
    pub command: ParserCommand,
    /// Attach trimmed trees to mismatching reports.
    pub debug: bool,
}

impl Runner {
    pub fn new(command: ParserCommand, debug: bool) -> Self {
        Self { command, debug }
    }

    /// Run one fixture end to end.
    pub fn run_test(&self, test: &Path) -> Result<TestReport, RunError> {
        let (kind, expected_path) = resolve_expected(test)?;
        debug!(test = %test.display(), kind = kind.label(), "running test");

        let process = self.command.run_test(test)?;
        let expected = load_expected(kind, &expected_path)?;
        let result = classify(&expected, &process);
        let trimmed = self.trimmed_trees(&expected, &process, &result);
        debug!(
            test = %test.display(),
            status = %result.status,
            reason = %result.reason,
            "test finished"
        );

        Ok(TestReport {
            path: test.to_path_buf(),
            result,
            trimmed,
        })
    }

    /// Run every fixture under `paths`, expanding directories.
    ///
    /// The first fixture-set error aborts the run.
    pub fn run_all(&self, paths: &[PathBuf]) -> Result<Vec<TestReport>, RunError> {
        let mut tests = Vec::new();
        for path in paths {
            if path.is_dir() {
                tests.extend(collect_tests(path)?);
            } else {
                tests.push(path.clone());
            }
        }
        info!(count = tests.len(), "running tests");

        tests.iter().map(|test| self.run_test(test)).collect()
    }

    fn trimmed_trees(
        &self,
        expected: &ExpectedArtifact,
        process: &ProcessOutcome,
        result: &TestResult,
    ) -> Option<TrimmedTrees> {
        if !self.debug || result.mismatch.is_none() {
            return None;
        }
        let ExpectedArtifact::Tree(contents) = expected else {
            return None;
        };
        match render_trimmed(process.stdout(), contents) {
            Ok(trees) => Some(trees),
            Err(err) => {
                warn!(%err, "could not render trimmed trees");
                None
            }
        }
    }
}
