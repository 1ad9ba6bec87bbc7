use std::fmt::{self, Display, Formatter};

use ast_diff_core::Mismatch;
use serde::Serialize;

/// Terminal status of one test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TestStatus {
    Passed,
    Failed,
    Skipped,
    Timeout,
}

impl TestStatus {
    pub fn label(self) -> &'static str {
        match self {
            TestStatus::Passed => "PASS",
            TestStatus::Failed => "FAIL",
            TestStatus::Skipped => "SKIP",
            TestStatus::Timeout => "TIMEOUT",
        }
    }
}

impl Display for TestStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Status plus a short reason, produced once per test.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestResult {
    pub status: TestStatus,
    pub reason: String,
    /// Set when the failure came from a tree mismatch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mismatch: Option<Mismatch>,
}

impl TestResult {
    pub fn passed(reason: &str) -> Self {
        Self::new(TestStatus::Passed, reason)
    }

    pub fn failed(reason: &str) -> Self {
        Self::new(TestStatus::Failed, reason)
    }

    pub fn skipped(reason: &str) -> Self {
        Self::new(TestStatus::Skipped, reason)
    }

    pub fn timeout() -> Self {
        Self::new(TestStatus::Timeout, "test time out")
    }

    /// A failure caused by the first divergence between two trees.
    pub fn mismatched(mismatch: Mismatch) -> Self {
        TestResult {
            status: TestStatus::Failed,
            reason: format!("ast not expected: {mismatch}"),
            mismatch: Some(mismatch),
        }
    }

    fn new(status: TestStatus, reason: &str) -> Self {
        TestResult {
            status,
            reason: reason.to_string(),
            mismatch: None,
        }
    }
}
