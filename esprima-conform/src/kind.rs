use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Node kinds that the normalizers and suppression tables refer to.
///
/// Kinds outside this list still compare structurally; they simply have no
/// kind-specific rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeKind {
    // Shared ESTree kinds.
    Program,
    ExpressionStatement,
    FunctionDeclaration,
    FunctionExpression,
    ArrowFunctionExpression,
    ArrayExpression,
    Property,
    ForInStatement,
    TemplateLiteral,
    Literal,
    // Hermes-only kinds.
    File,
    Empty,
    NullLiteral,
    BooleanLiteral,
    StringLiteral,
    NumericLiteral,
    RegExpLiteral,
}

impl NodeKind {
    pub const ALL: [NodeKind; 17] = [
        NodeKind::Program,
        NodeKind::ExpressionStatement,
        NodeKind::FunctionDeclaration,
        NodeKind::FunctionExpression,
        NodeKind::ArrowFunctionExpression,
        NodeKind::ArrayExpression,
        NodeKind::Property,
        NodeKind::ForInStatement,
        NodeKind::TemplateLiteral,
        NodeKind::Literal,
        NodeKind::File,
        NodeKind::Empty,
        NodeKind::NullLiteral,
        NodeKind::BooleanLiteral,
        NodeKind::StringLiteral,
        NodeKind::NumericLiteral,
        NodeKind::RegExpLiteral,
    ];

    /// The `"type"` string this kind is dumped as.
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Program => "Program",
            NodeKind::ExpressionStatement => "ExpressionStatement",
            NodeKind::FunctionDeclaration => "FunctionDeclaration",
            NodeKind::FunctionExpression => "FunctionExpression",
            NodeKind::ArrowFunctionExpression => "ArrowFunctionExpression",
            NodeKind::ArrayExpression => "ArrayExpression",
            NodeKind::Property => "Property",
            NodeKind::ForInStatement => "ForInStatement",
            NodeKind::TemplateLiteral => "TemplateLiteral",
            NodeKind::Literal => "Literal",
            NodeKind::File => "File",
            NodeKind::Empty => "Empty",
            NodeKind::NullLiteral => "NullLiteral",
            NodeKind::BooleanLiteral => "BooleanLiteral",
            NodeKind::StringLiteral => "StringLiteral",
            NodeKind::NumericLiteral => "NumericLiteral",
            NodeKind::RegExpLiteral => "RegExpLiteral",
        }
    }

    /// Hermes literal kinds that converge on ESTree `Literal`.
    pub fn is_hermes_literal(self) -> bool {
        matches!(
            self,
            NodeKind::NullLiteral
                | NodeKind::BooleanLiteral
                | NodeKind::StringLiteral
                | NodeKind::NumericLiteral
                | NodeKind::RegExpLiteral
        )
    }

    /// Resolve an optional `"type"` string; unknown kinds yield `None`.
    pub fn from_kind(kind: Option<&str>) -> Option<NodeKind> {
        kind.and_then(|k| k.parse().ok())
    }
}

/// Returned when a `"type"` string names no [`NodeKind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownKind;

impl FromStr for NodeKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NodeKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or(UnknownKind)
    }
}

impl Display for NodeKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::NodeKind;

    #[test]
    fn every_kind_round_trips_through_its_name() {
        for kind in NodeKind::ALL {
            assert_eq!(kind.as_str().parse::<NodeKind>(), Ok(kind));
        }
    }

    #[test]
    fn unknown_kinds_do_not_resolve() {
        assert_eq!(NodeKind::from_kind(Some("BinaryExpression")), None);
        assert_eq!(NodeKind::from_kind(None), None);
    }
}
