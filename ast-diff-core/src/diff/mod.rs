//! Grammar-aware structural comparison of syntax trees.

pub mod engine;
pub mod grammar;
pub mod result;

pub use engine::{compare, compare_owned, compare_with};
pub use grammar::{normalize, Grammar, PlainGrammar, Suppression};
pub use result::{format_path, Mismatch, MismatchKind, PathSegment, Verdict};
