use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::tree::AstNode;

/// Errors that can occur while reading a serialized tree into an [`AstNode`].
#[derive(Debug, Error)]
pub enum ParseError {
    /// Input was not well-formed JSON.
    #[error("failed to parse JSON tree: {0}")]
    Json(#[from] serde_json::Error),
    /// Input nests deeper than [`MAX_DEPTH`].
    #[error("JSON tree nests deeper than {limit} levels")]
    TooDeep { limit: usize },
    /// Failed to read input file.
    #[error("failed to read JSON tree file: {0}")]
    Io(#[from] std::io::Error),
}

/// Deepest object/array nesting accepted by [`parse`].
///
/// Every tree walk in this crate recurses once per level, so the cap keeps
/// parsing, comparison, trimming and drop within a default thread stack.
pub const MAX_DEPTH: usize = 256;

/// Parse JSON bytes into an [`AstNode`] tree.
///
/// Field order is preserved. Nesting up to [`MAX_DEPTH`] is accepted, which is
/// deeper than serde_json's default limit; anything deeper is rejected before
/// a tree is built.
pub fn parse(json: &[u8]) -> Result<AstNode, ParseError> {
    check_depth(json, MAX_DEPTH)?;
    let mut de = serde_json::Deserializer::from_slice(json);
    de.disable_recursion_limit();
    let value = Value::deserialize(&mut de)?;
    de.end()?;
    Ok(AstNode::from(value))
}

/// Reject input nesting deeper than `limit` without recursing.
///
/// Brackets inside strings are skipped. Malformed input is left for the
/// JSON parser to report.
fn check_depth(json: &[u8], limit: usize) -> Result<(), ParseError> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for &byte in json {
        if in_string {
            match byte {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match byte {
            b'"' => in_string = true,
            b'{' | b'[' => {
                depth += 1;
                if depth > limit {
                    return Err(ParseError::TooDeep { limit });
                }
            }
            b'}' | b']' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    Ok(())
}

/// Parse a JSON file into an [`AstNode`] tree.
pub fn parse_file(path: &Path) -> Result<AstNode, ParseError> {
    let bytes = fs::read(path)?;
    parse(&bytes)
}

#[cfg(test)]
mod tests {
    use super::{parse, ParseError, MAX_DEPTH};

    fn nested(depth: usize) -> String {
        let mut json = String::new();
        for _ in 0..depth {
            json.push_str(r#"{"type":"UnaryExpression","argument":"#);
        }
        json.push_str("null");
        for _ in 0..depth {
            json.push('}');
        }
        json
    }

    #[test]
    fn rejects_trailing_garbage() {
        let err = parse(br#"{"type":"Program"} trailing"#).expect_err("should fail");
        assert!(matches!(err, ParseError::Json(_)));
    }

    #[test]
    fn accepts_nesting_deeper_than_serde_json_default() {
        let node = parse(nested(MAX_DEPTH).as_bytes()).expect("deep tree should parse");
        assert_eq!(node.kind(), Some("UnaryExpression"));
    }

    #[test]
    fn rejects_nesting_past_max_depth() {
        let err = parse(nested(MAX_DEPTH + 1).as_bytes()).expect_err("should fail");
        assert!(matches!(err, ParseError::TooDeep { limit: MAX_DEPTH }));

        let err = parse(nested(20_000).as_bytes()).expect_err("should fail");
        assert!(matches!(err, ParseError::TooDeep { .. }));
    }

    #[test]
    fn brackets_inside_strings_do_not_count() {
        let json = format!(r#"{{"type":"Literal","value":"{}"}}"#, "[{".repeat(MAX_DEPTH));
        let node = parse(json.as_bytes()).expect("string brackets are not nesting");
        assert_eq!(node.kind(), Some("Literal"));
    }
}
