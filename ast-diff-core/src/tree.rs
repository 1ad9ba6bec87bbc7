use std::fmt::{self, Display, Formatter};

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use serde_json::{Number, Value};

/// Field that names a node's grammar type in ESTree-shaped trees.
pub const KIND_FIELD: &str = "type";

/// A syntax tree value as dumped by a parser.
#[derive(Debug, Clone, PartialEq)]
pub enum AstNode {
    /// Mapping from field name to child, in document order.
    Object(Fields),
    /// Positional children.
    Array(Vec<AstNode>),
    /// Leaf value.
    Scalar(Scalar),
}

/// A leaf value.
///
/// Numbers keep the integer/float distinction they were parsed with, so `1`
/// and `1.0` are different values.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
}

/// Dynamic shape of a value, used when reporting type mismatches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    Object,
    Array,
    Null,
    Bool,
    Number,
    String,
}

/// Ordered field map with unique keys.
///
/// Syntax tree nodes carry a handful of fields, so a vector keeps insertion
/// order without the cost of hashing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fields {
    entries: Vec<(String, AstNode)>,
}

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&AstNode> {
        self.entries
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut AstNode> {
        self.entries
            .iter_mut()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(name, _)| name == key)
    }

    /// Insert a field, replacing an existing value in place or appending a new key.
    pub fn insert(&mut self, key: impl Into<String>, value: AstNode) -> Option<AstNode> {
        let key = key.into();
        if let Some(slot) = self.get_mut(&key) {
            return Some(std::mem::replace(slot, value));
        }
        self.entries.push((key, value));
        None
    }

    /// Remove a field, keeping the relative order of the rest.
    pub fn remove(&mut self, key: &str) -> Option<AstNode> {
        let idx = self.entries.iter().position(|(name, _)| name == key)?;
        Some(self.entries.remove(idx).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AstNode)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// The node kind, when the kind field holds a string.
    pub fn kind(&self) -> Option<&str> {
        self.get(KIND_FIELD).and_then(AstNode::as_str)
    }

    /// Rename the node kind, or set it when absent.
    pub fn set_kind(&mut self, kind: &str) {
        self.insert(KIND_FIELD, AstNode::string(kind));
    }
}

impl IntoIterator for Fields {
    type Item = (String, AstNode);
    type IntoIter = std::vec::IntoIter<(String, AstNode)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<K: Into<String>> FromIterator<(K, AstNode)> for Fields {
    fn from_iter<I: IntoIterator<Item = (K, AstNode)>>(iter: I) -> Self {
        let mut fields = Fields::new();
        for (key, value) in iter {
            fields.insert(key, value);
        }
        fields
    }
}

impl AstNode {
    pub fn null() -> Self {
        AstNode::Scalar(Scalar::Null)
    }

    pub fn string(value: impl Into<String>) -> Self {
        AstNode::Scalar(Scalar::String(value.into()))
    }

    pub fn bool(value: bool) -> Self {
        AstNode::Scalar(Scalar::Bool(value))
    }

    pub fn number(value: impl Into<Number>) -> Self {
        AstNode::Scalar(Scalar::Number(value.into()))
    }

    /// Build an object node from `(field, value)` pairs.
    pub fn object<K, I>(fields: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, AstNode)>,
    {
        AstNode::Object(fields.into_iter().collect())
    }

    pub fn shape(&self) -> Shape {
        match self {
            AstNode::Object(_) => Shape::Object,
            AstNode::Array(_) => Shape::Array,
            AstNode::Scalar(scalar) => scalar.shape(),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AstNode::Scalar(Scalar::String(value)) => Some(value),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Fields> {
        match self {
            AstNode::Object(fields) => Some(fields),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut Fields> {
        match self {
            AstNode::Object(fields) => Some(fields),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[AstNode]> {
        match self {
            AstNode::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Field lookup on object nodes.
    pub fn get(&self, key: &str) -> Option<&AstNode> {
        self.as_object().and_then(|fields| fields.get(key))
    }

    /// The node kind of an object node.
    pub fn kind(&self) -> Option<&str> {
        self.as_object().and_then(Fields::kind)
    }
}

impl Scalar {
    pub fn shape(&self) -> Shape {
        match self {
            Scalar::Null => Shape::Null,
            Scalar::Bool(_) => Shape::Bool,
            Scalar::Number(_) => Shape::Number,
            Scalar::String(_) => Shape::String,
        }
    }
}

impl From<Value> for AstNode {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => AstNode::null(),
            Value::Bool(b) => AstNode::bool(b),
            Value::Number(n) => AstNode::Scalar(Scalar::Number(n)),
            Value::String(s) => AstNode::string(s),
            Value::Array(items) => AstNode::Array(items.into_iter().map(AstNode::from).collect()),
            Value::Object(map) => AstNode::Object(
                map.into_iter()
                    .map(|(key, value)| (key, AstNode::from(value)))
                    .collect(),
            ),
        }
    }
}

impl Serialize for AstNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            AstNode::Object(fields) => fields.serialize(serializer),
            AstNode::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            AstNode::Scalar(scalar) => scalar.serialize(serializer),
        }
    }
}

impl Serialize for Fields {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Scalar::Null => serializer.serialize_unit(),
            Scalar::Bool(b) => serializer.serialize_bool(*b),
            Scalar::Number(n) => n.serialize(serializer),
            Scalar::String(s) => serializer.serialize_str(s),
        }
    }
}

impl Display for Shape {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            Shape::Object => "object",
            Shape::Array => "array",
            Shape::Null => "null",
            Shape::Bool => "bool",
            Shape::Number => "number",
            Shape::String => "string",
        };
        f.write_str(name)
    }
}

impl Display for Scalar {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => f.write_str("null"),
            Scalar::Bool(b) => write!(f, "{b}"),
            Scalar::Number(n) => write!(f, "{n}"),
            Scalar::String(s) => write!(f, "{s:?}"),
        }
    }
}

impl Display for AstNode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let rendered = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::{AstNode, Fields, Shape};

    #[test]
    fn insert_replaces_in_place_and_remove_keeps_order() {
        let mut fields: Fields = [
            ("type", AstNode::string("Literal")),
            ("value", AstNode::number(1)),
            ("raw", AstNode::string("1")),
        ]
        .into_iter()
        .collect();

        fields.insert("value", AstNode::number(2));
        assert_eq!(fields.keys().collect::<Vec<_>>(), ["type", "value", "raw"]);

        fields.remove("value");
        fields.insert("value", AstNode::null());
        assert_eq!(fields.keys().collect::<Vec<_>>(), ["type", "raw", "value"]);
    }

    #[test]
    fn integer_and_float_are_distinct_numbers() {
        let int: AstNode = serde_json::json!(1).into();
        let float: AstNode = serde_json::json!(1.0).into();
        assert_ne!(int, float);
        assert_eq!(int.shape(), Shape::Number);
        assert_eq!(float.shape(), Shape::Number);
    }

    #[test]
    fn field_lookup_reaches_nested_nodes() {
        let node: AstNode = serde_json::json!({
            "type": "ExpressionStatement",
            "expression": {"type": "Literal", "value": "use strict"}
        })
        .into();

        assert_eq!(
            node.get("expression")
                .and_then(|expression| expression.get("value"))
                .and_then(AstNode::as_str),
            Some("use strict")
        );
        assert_eq!(node.kind(), Some("ExpressionStatement"));
    }

    #[test]
    fn display_renders_compact_json_in_field_order() {
        let node = AstNode::object([("b", AstNode::number(2)), ("a", AstNode::null())]);
        assert_eq!(node.to_string(), r#"{"b":2,"a":null}"#);
    }
}
