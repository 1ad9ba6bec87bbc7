//! Locate and load the expected artifact of an Esprima fixture.
//!
//! A test `foo.js` (or `foo.source.js`) is paired with the first of
//! `foo.tree.json`, `foo.failure.json`, `foo.tokens.json` that exists.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::classify::ExpectedArtifact;

const SOURCE_SUFFIX: &str = ".source.js";
const SCRIPT_SUFFIX: &str = ".js";

/// The kinds of expected artifact, in lookup priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    Tree,
    Failure,
    Tokens,
}

impl ArtifactKind {
    pub const PRIORITY: [ArtifactKind; 3] =
        [ArtifactKind::Tree, ArtifactKind::Failure, ArtifactKind::Tokens];

    pub fn suffix(self) -> &'static str {
        match self {
            ArtifactKind::Tree => ".tree.json",
            ArtifactKind::Failure => ".failure.json",
            ArtifactKind::Tokens => ".tokens.json",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ArtifactKind::Tree => "tree",
            ArtifactKind::Failure => "failure",
            ArtifactKind::Tokens => "tokens",
        }
    }
}

/// Errors in the fixture set itself. These abort the run instead of
/// becoming a test status.
#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("not a valid test case: {path}")]
    NotATestCase { path: PathBuf },
    #[error("can't find expected file for {path}")]
    MissingExpected { path: PathBuf },
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// A test whose source is a `var source = "...";` wrapper around the real input.
pub fn is_source_test(path: &Path) -> bool {
    path.to_str()
        .is_some_and(|name| name.ends_with(SOURCE_SUFFIX))
}

/// The fixture path without its test suffix, e.g. `dir/foo` for `dir/foo.source.js`.
pub fn test_stem(path: &Path) -> Result<String, FixtureError> {
    let name = path.to_str().ok_or_else(|| FixtureError::NotATestCase {
        path: path.to_path_buf(),
    })?;
    name.strip_suffix(SOURCE_SUFFIX)
        .or_else(|| name.strip_suffix(SCRIPT_SUFFIX))
        .map(ToOwned::to_owned)
        .ok_or_else(|| FixtureError::NotATestCase {
            path: path.to_path_buf(),
        })
}

/// Find the expected artifact for a test file.
pub fn resolve_expected(test: &Path) -> Result<(ArtifactKind, PathBuf), FixtureError> {
    let stem = test_stem(test)?;
    for kind in ArtifactKind::PRIORITY {
        let candidate = PathBuf::from(format!("{stem}{}", kind.suffix()));
        if candidate.is_file() {
            debug!(expected = %candidate.display(), kind = kind.label(), "resolved expected artifact");
            return Ok((kind, candidate));
        }
    }
    debug!(test = %test.display(), "no expected file");
    Err(FixtureError::MissingExpected {
        path: test.to_path_buf(),
    })
}

/// Load the artifact; only tree artifacts need their contents.
pub fn load_expected(kind: ArtifactKind, path: &Path) -> Result<ExpectedArtifact, FixtureError> {
    match kind {
        ArtifactKind::Tree => fs::read_to_string(path)
            .map(ExpectedArtifact::Tree)
            .map_err(|source| FixtureError::Io {
                path: path.to_path_buf(),
                source,
            }),
        ArtifactKind::Failure => Ok(ExpectedArtifact::Failure),
        ArtifactKind::Tokens => Ok(ExpectedArtifact::Unsupported(kind)),
    }
}

/// Collect every `*.js` test under `dir`, sorted by path.
pub fn collect_tests(dir: &Path) -> Result<Vec<PathBuf>, FixtureError> {
    let mut out = Vec::new();
    walk(dir, &mut out)?;
    out.sort();
    Ok(out)
}

fn walk(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), FixtureError> {
    let io_err = |source| FixtureError::Io {
        path: dir.to_path_buf(),
        source,
    };
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if path.is_dir() {
            walk(&path, out)?;
        } else if path.extension().is_some_and(|ext| ext == "js") {
            out.push(path);
        }
    }
    Ok(())
}
