use std::fmt::{self, Display, Formatter};

use serde::Serialize;

use crate::tree::{Scalar, Shape};

/// Outcome of comparing a candidate tree against a reference tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum Verdict {
    Equal,
    /// The first divergence found; comparison stops there.
    Unequal(Mismatch),
}

impl Verdict {
    pub fn is_equal(&self) -> bool {
        matches!(self, Verdict::Equal)
    }

    pub fn mismatch(&self) -> Option<&Mismatch> {
        match self {
            Verdict::Equal => None,
            Verdict::Unequal(mismatch) => Some(mismatch),
        }
    }

    pub fn into_result(self) -> Result<(), Mismatch> {
        match self {
            Verdict::Equal => Ok(()),
            Verdict::Unequal(mismatch) => Err(mismatch),
        }
    }
}

/// Where and how two trees diverged.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mismatch {
    /// Steps from the root to the diverging value.
    pub path: Vec<PathSegment>,
    #[serde(flatten)]
    pub kind: MismatchKind,
}

/// One step into a tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PathSegment {
    Field(String),
    Index(usize),
}

/// The kind of divergence.
///
/// `expected` always describes the reference side and `found` the candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mismatch", rename_all = "snake_case")]
pub enum MismatchKind {
    /// The two values have different dynamic shapes.
    TypeMismatch { expected: Shape, found: Shape },
    /// A reference field that is not suppressed is absent from the candidate.
    MissingField {
        node_kind: Option<String>,
        field: String,
    },
    /// The candidate carries fields the reference does not account for.
    FieldCountMismatch {
        node_kind: Option<String>,
        expected: usize,
        found: usize,
    },
    /// Arrays of different length.
    LengthMismatch { expected: usize, found: usize },
    /// Leaf values differ.
    ValueMismatch { expected: Scalar, found: Scalar },
}

/// Render a path as `$.body[0].expression`.
pub fn format_path(path: &[PathSegment]) -> String {
    let mut out = String::from("$");
    for segment in path {
        match segment {
            PathSegment::Field(name) => {
                out.push('.');
                out.push_str(name);
            }
            PathSegment::Index(idx) => out.push_str(&format!("[{idx}]")),
        }
    }
    out
}

impl Display for Mismatch {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.kind, format_path(&self.path))
    }
}

impl Display for MismatchKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            MismatchKind::TypeMismatch { expected, found } => {
                write!(f, "type mismatch: expected {expected}, found {found}")
            }
            MismatchKind::MissingField { node_kind, field } => write!(
                f,
                "{} missing property: {field}",
                node_kind.as_deref().unwrap_or("node")
            ),
            MismatchKind::FieldCountMismatch {
                node_kind,
                expected,
                found,
            } => write!(
                f,
                "element count mismatch in {}: expected {expected}, found {found}",
                node_kind.as_deref().unwrap_or("node")
            ),
            MismatchKind::LengthMismatch { expected, found } => {
                write!(f, "list expected {expected} elements, found {found}")
            }
            MismatchKind::ValueMismatch { expected, found } => {
                write!(f, "value mismatch: expected {expected}, found {found}")
            }
        }
    }
}
