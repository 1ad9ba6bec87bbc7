use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::tree::AstNode;

/// Errors that can occur while writing an [`AstNode`] tree as JSON.
#[derive(Debug, Error)]
pub enum WriteError {
    /// Failed to serialize the tree.
    #[error("failed to serialize JSON tree: {0}")]
    Json(#[from] serde_json::Error),
    /// Failed to write output file.
    #[error("failed to write JSON tree file: {0}")]
    Io(#[from] std::io::Error),
}

/// Serialize a tree as compact JSON, keeping field order.
pub fn write(node: &AstNode) -> Result<String, WriteError> {
    Ok(serde_json::to_string(node)?)
}

/// Serialize a tree as compact JSON with every object's keys sorted.
///
/// Two trees that differ only in field order render identically, which is what
/// side-by-side debug output needs.
pub fn write_sorted(node: &AstNode) -> Result<String, WriteError> {
    Ok(serde_json::to_string(&sort_keys(node))?)
}

/// Serialize a tree as indented JSON and write it to `path`.
pub fn write_file(node: &AstNode, path: &Path) -> Result<(), WriteError> {
    let json = serde_json::to_string_pretty(node)?;
    fs::write(path, json)?;
    Ok(())
}

fn sort_keys(node: &AstNode) -> AstNode {
    match node {
        AstNode::Object(fields) => {
            let mut entries: Vec<(&str, &AstNode)> = fields.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            AstNode::object(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, sort_keys(value))),
            )
        }
        AstNode::Array(items) => AstNode::Array(items.iter().map(sort_keys).collect()),
        AstNode::Scalar(_) => node.clone(),
    }
}
