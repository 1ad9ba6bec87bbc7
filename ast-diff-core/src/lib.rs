//! JSON syntax tree parsing, normalization, and grammar-aware comparison.

pub mod diff;
pub mod format;
pub mod parser;
pub mod tree;
pub mod trim;
pub mod writer;

pub use diff::{
    compare, compare_owned, compare_with, normalize, Grammar, Mismatch, MismatchKind, PathSegment, PlainGrammar,
    Suppression, Verdict,
};
pub use format::{format_json, format_summary, format_text};
pub use parser::{parse, parse_file, ParseError, MAX_DEPTH};
pub use tree::{AstNode, Fields, Scalar, Shape, KIND_FIELD};
pub use trim::trim;
pub use writer::{write, write_file, write_sorted, WriteError};
