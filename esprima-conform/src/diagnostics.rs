//! Trimmed renderings of both trees, printed when a comparison fails under `--debug`.

use ast_diff_core::{parse, trim, write_sorted, AstNode, ParseError, WriteError};
use serde::Serialize;
use thiserror::Error;

use crate::normalize::{EsprimaGrammar, HermesGrammar};
use crate::rules::TRIM_RULES;

#[derive(Debug, Error)]
pub enum TrimError {
    #[error("failed to parse tree: {0}")]
    Parse(#[from] ParseError),
    #[error("failed to render tree: {0}")]
    Write(#[from] WriteError),
}

/// Both sides of a failed comparison, normalized and stripped of ignored fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrimmedTrees {
    pub hermes: String,
    pub expected: String,
}

/// Normalize a Hermes tree and drop every field either side ignores.
pub fn trim_hermes(node: &AstNode) -> AstNode {
    trim(node, &HermesGrammar, &*TRIM_RULES)
}

/// Normalize an Esprima tree and drop every field either side ignores.
pub fn trim_esprima(node: &AstNode) -> AstNode {
    trim(node, &EsprimaGrammar, &*TRIM_RULES)
}

/// Render both serialized trees trimmed, with keys sorted so they line up.
pub fn render_trimmed(output: &str, expected: &str) -> Result<TrimmedTrees, TrimError> {
    let hermes = trim_hermes(&parse(output.as_bytes())?);
    let esprima = trim_esprima(&parse(expected.as_bytes())?);
    Ok(TrimmedTrees {
        hermes: write_sorted(&hermes)?,
        expected: write_sorted(&esprima)?,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{render_trimmed, TrimError};

    #[test]
    fn trimmed_trees_drop_ignored_fields_on_both_sides() {
        let hermes = r#"{"type":"File","program":{"type":"Program","body":[
            {"type":"ExpressionStatement","expression":{"type":"NumericLiteral","value":1},"directive":null}
        ]}}"#;
        let esprima = r#"{"type":"Program","sourceType":"script","range":[0,2],"body":[
            {"type":"ExpressionStatement","expression":{"type":"Literal","value":1,"raw":"1"}}
        ]}"#;

        let trimmed = render_trimmed(hermes, esprima).expect("trim");
        let expected = r#"{"body":[{"expression":{"type":"Literal","value":1},"type":"ExpressionStatement"}],"type":"Program"}"#;
        assert_eq!(trimmed.hermes, expected);
        assert_eq!(trimmed.expected, expected);
    }

    #[test]
    fn malformed_side_is_reported() {
        let err = render_trimmed("{", r#"{"type":"Program"}"#).expect_err("should fail");
        assert!(matches!(err, TrimError::Parse(_)));
    }
}
