use crate::tree::AstNode;

/// Fields a tree grammar carries that never take part in comparison.
pub trait Suppression {
    /// Whether `field` is ignored on a node whose kind is `kind`.
    fn suppresses(&self, kind: Option<&str>, field: &str) -> bool;
}

/// A tree grammar: how one parser shapes its dumps, and which of its fields are noise.
///
/// Implementations rewrite a single node into the shape shared with the other
/// grammar. Children are left alone; callers that need a fully converged tree
/// use [`normalize`], while the comparator normalizes each node as it visits it.
///
/// `normalize_node` must be idempotent.
pub trait Grammar: Suppression {
    fn normalize_node(&self, node: AstNode) -> AstNode;
}

/// A grammar with no rewrites and no suppressed fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainGrammar;

impl Suppression for PlainGrammar {
    fn suppresses(&self, _kind: Option<&str>, _field: &str) -> bool {
        false
    }
}

impl Grammar for PlainGrammar {
    fn normalize_node(&self, node: AstNode) -> AstNode {
        node
    }
}

/// Normalize every node of a tree, parents before children.
pub fn normalize(node: AstNode, grammar: &dyn Grammar) -> AstNode {
    match grammar.normalize_node(node) {
        AstNode::Object(fields) => AstNode::Object(
            fields
                .into_iter()
                .map(|(key, value)| (key, normalize(value, grammar)))
                .collect(),
        ),
        AstNode::Array(items) => AstNode::Array(
            items
                .into_iter()
                .map(|item| normalize(item, grammar))
                .collect(),
        ),
        scalar @ AstNode::Scalar(_) => scalar,
    }
}
