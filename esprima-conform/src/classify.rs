//! Fold the parser's exit status and output together with the expected
//! artifact into a test status.
//!
//! - A `.tree.json` artifact is diffed against the Hermes dump, unless Esprima
//!   recorded `"errors":` while building it; Esprima keeps parsing past errors
//!   but Hermes is expected to reject the input.
//! - A `.failure.json` artifact means Hermes must exit non-zero.
//! - Anything else (token streams) is skipped.
//! - A parser that ran past its time bound is a timeout whatever was expected.

use ast_diff_core::{parse, Verdict};
use tracing::debug;

use crate::fixture::ArtifactKind;
use crate::normalize::compare_to_esprima;
use crate::outcome::TestResult;
use crate::process::ProcessOutcome;

/// Marker Esprima leaves in a tree artifact when it recovered from errors.
pub const ERROR_MARKER: &str = "\"errors\":";

/// What a fixture expects from the parser under test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpectedArtifact {
    /// Serialized Esprima tree.
    Tree(String),
    /// The input must be rejected.
    Failure,
    /// An artifact Hermes cannot produce.
    Unsupported(ArtifactKind),
}

impl ExpectedArtifact {
    pub fn kind(&self) -> ArtifactKind {
        match self {
            ExpectedArtifact::Tree(_) => ArtifactKind::Tree,
            ExpectedArtifact::Failure => ArtifactKind::Failure,
            ExpectedArtifact::Unsupported(kind) => *kind,
        }
    }
}

/// Decide the status of one test.
pub fn classify(expected: &ExpectedArtifact, process: &ProcessOutcome) -> TestResult {
    let ProcessOutcome::Exited { code, stdout, .. } = process else {
        return TestResult::timeout();
    };
    let exited_ok = *code == Some(0);

    match expected {
        ExpectedArtifact::Tree(contents) if contents.contains(ERROR_MARKER) => {
            debug!("expected tree records errors; parser must reject the input");
            expect_rejection(exited_ok)
        }
        ExpectedArtifact::Tree(contents) => diff_tree_output(stdout, contents),
        ExpectedArtifact::Failure => expect_rejection(exited_ok),
        ExpectedArtifact::Unsupported(kind) => {
            TestResult::skipped(&format!("skip unsupported {} test", kind.label()))
        }
    }
}

/// Compare a Hermes dump against an Esprima tree, both still serialized.
pub fn diff_tree_output(output: &str, expected: &str) -> TestResult {
    let hermes = match parse(output.as_bytes()) {
        Ok(node) => node,
        Err(err) => {
            debug!(%err, "hermes output is not a JSON tree");
            return TestResult::failed(&format!("parse error: hermes output: {err}"));
        }
    };
    let esprima = match parse(expected.as_bytes()) {
        Ok(node) => node,
        Err(err) => {
            debug!(%err, "expected artifact is not a JSON tree");
            return TestResult::failed(&format!("parse error: expected tree: {err}"));
        }
    };

    match compare_to_esprima(hermes, esprima) {
        Verdict::Equal => TestResult::passed(""),
        Verdict::Unequal(mismatch) => {
            debug!(%mismatch, "ast not expected");
            TestResult::mismatched(mismatch)
        }
    }
}

fn expect_rejection(exited_ok: bool) -> TestResult {
    if exited_ok {
        TestResult::failed("test should fail")
    } else {
        TestResult::passed("expected failure")
    }
}
