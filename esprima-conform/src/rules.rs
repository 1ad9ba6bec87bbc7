//! Fields each tree grammar carries that must not take part in comparison.
//!
//! Hermes dumps carry type annotations the ESTree fixtures never have; the
//! Esprima fixtures carry source locations, token lists, and a handful of
//! ES2015+ flags Hermes does not emit. The tables are built once per process
//! and never change afterwards.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use ast_diff_core::Suppression;

use crate::kind::NodeKind;

/// Suppressed field names, either for every node or per node kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuppressionRules {
    common: BTreeSet<&'static str>,
    by_kind: BTreeMap<NodeKind, BTreeSet<&'static str>>,
}

impl SuppressionRules {
    pub fn new(common: &[&'static str], by_kind: &[(NodeKind, &[&'static str])]) -> Self {
        let mut rules = SuppressionRules {
            common: common.iter().copied().collect(),
            by_kind: BTreeMap::new(),
        };
        for (kind, fields) in by_kind {
            rules
                .by_kind
                .entry(*kind)
                .or_default()
                .extend(fields.iter().copied());
        }
        rules
    }

    /// Rules that suppress whatever either input suppresses.
    pub fn union(&self, other: &SuppressionRules) -> SuppressionRules {
        let mut merged = self.clone();
        merged.common.extend(other.common.iter().copied());
        for (kind, fields) in &other.by_kind {
            merged
                .by_kind
                .entry(*kind)
                .or_default()
                .extend(fields.iter().copied());
        }
        merged
    }

    pub fn is_suppressed(&self, kind: Option<NodeKind>, field: &str) -> bool {
        if self.common.contains(field) {
            return true;
        }
        kind.and_then(|k| self.by_kind.get(&k))
            .is_some_and(|fields| fields.contains(field))
    }
}

impl Suppression for SuppressionRules {
    fn suppresses(&self, kind: Option<&str>, field: &str) -> bool {
        self.is_suppressed(NodeKind::from_kind(kind), field)
    }
}

/// Candidate-side rules for Hermes `-dump-ast` output.
pub static HERMES_RULES: LazyLock<SuppressionRules> = LazyLock::new(|| {
    SuppressionRules::new(
        &["typeAnnotation"],
        &[
            (NodeKind::FunctionDeclaration, &["returnType"]),
            (NodeKind::ArrayExpression, &["trailingComma"]),
        ],
    )
});

/// Reference-side rules for Esprima `.tree.json` fixtures.
pub static ESPRIMA_RULES: LazyLock<SuppressionRules> = LazyLock::new(|| {
    SuppressionRules::new(
        &["loc", "range", "errors"],
        &[
            (NodeKind::Program, &["tokens", "sourceType", "comments"]),
            (NodeKind::Literal, &["raw"]),
            // ES2015+ additions to ESTree that Hermes does not report yet.
            (NodeKind::FunctionDeclaration, &["async", "expression"]),
            (NodeKind::FunctionExpression, &["async", "expression"]),
            (NodeKind::ArrowFunctionExpression, &["async", "generator"]),
            (NodeKind::Property, &["method", "shorthand"]),
            (NodeKind::ForInStatement, &["each"]),
        ],
    )
});

/// Union of both tables, used when trimming either side for debug output.
pub static TRIM_RULES: LazyLock<SuppressionRules> =
    LazyLock::new(|| HERMES_RULES.union(&ESPRIMA_RULES));
