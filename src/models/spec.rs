use serde_json::{Map, Value};

/// A parsed OpenAPI/Swagger document.
///
/// The tree is held as a generic `serde_json::Value` so both accepted encodings
/// (JSON and YAML) land in the same representation. Key order is preserved.
/// Construct it through [`crate::loader::normalize`], which guarantees the root is a
/// mapping carrying a version marker and a `paths` mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalSpec {
    root: Value,
}

impl CanonicalSpec {
    pub(crate) fn new(root: Value) -> Self {
        Self { root }
    }

    /// The whole document tree
    pub fn root(&self) -> &Value {
        &self.root
    }

    /// The `openapi` or `swagger` version marker, rendered as text
    pub fn version(&self) -> Option<String> {
        match self.root.get("openapi").or_else(|| self.root.get("swagger"))? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Whether the document is a Swagger 2.x document
    pub fn is_swagger(&self) -> bool {
        self.root.get("swagger").is_some() && self.root.get("openapi").is_none()
    }

    /// Entries of the `paths` mapping in document order
    pub fn paths(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.root
            .get("paths")
            .and_then(Value::as_object)
            .into_iter()
            .flatten()
    }
}

/// Typed view over one node of the document when read as a schema.
///
/// Every traversal matches on this instead of probing the raw tree, so a
/// reference marker is never mistaken for a literal mapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SchemaNode<'a> {
    /// `{ "$ref": "#/..." }`
    Reference(&'a str),
    Mapping(&'a Map<String, Value>),
    Sequence(&'a [Value]),
    Scalar(&'a Value),
}

impl<'a> SchemaNode<'a> {
    pub fn classify(value: &'a Value) -> Self {
        match value {
            Value::Object(map) => match map.get("$ref").and_then(Value::as_str) {
                Some(pointer) => SchemaNode::Reference(pointer),
                None => SchemaNode::Mapping(map),
            },
            Value::Array(items) => SchemaNode::Sequence(items),
            other => SchemaNode::Scalar(other),
        }
    }

    pub fn is_reference(&self) -> bool {
        matches!(self, SchemaNode::Reference(_))
    }
}
