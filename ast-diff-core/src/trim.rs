//! Reduced renderings of trees for human inspection.

use crate::diff::{Grammar, Suppression};
use crate::tree::AstNode;

/// Normalize a tree under `grammar` and drop every field `omit` suppresses, at every depth.
///
/// Only used for diagnostics; the comparator never trims.
pub fn trim(node: &AstNode, grammar: &dyn Grammar, omit: &dyn Suppression) -> AstNode {
    trim_owned(node.clone(), grammar, omit)
}

fn trim_owned(node: AstNode, grammar: &dyn Grammar, omit: &dyn Suppression) -> AstNode {
    match grammar.normalize_node(node) {
        AstNode::Object(fields) => {
            let kind = fields.kind().map(ToOwned::to_owned);
            AstNode::Object(
                fields
                    .into_iter()
                    .filter(|(key, _)| !omit.suppresses(kind.as_deref(), key))
                    .map(|(key, value)| (key, trim_owned(value, grammar, omit)))
                    .collect(),
            )
        }
        AstNode::Array(items) => AstNode::Array(
            items
                .into_iter()
                .map(|item| trim_owned(item, grammar, omit))
                .collect(),
        ),
        scalar @ AstNode::Scalar(_) => scalar,
    }
}
