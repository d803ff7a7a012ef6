use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Number, Value};

/// A synthesized value for one schema node.
///
/// Mappings keep insertion order so serialized bodies list properties in
/// declaration order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SampleValue {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Sequence(Vec<SampleValue>),
    Mapping(IndexMap<String, SampleValue>),
}

impl SampleValue {
    pub fn integer(value: i64) -> Self {
        SampleValue::Number(Number::from(value))
    }

    /// Non-finite floats have no JSON form and become `Null`
    pub fn float(value: f64) -> Self {
        Number::from_f64(value)
            .map(SampleValue::Number)
            .unwrap_or(SampleValue::Null)
    }

    pub fn string(value: impl Into<String>) -> Self {
        SampleValue::String(value.into())
    }
}

impl From<&Value> for SampleValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => SampleValue::Null,
            Value::Bool(b) => SampleValue::Bool(*b),
            Value::Number(n) => SampleValue::Number(n.clone()),
            Value::String(s) => SampleValue::String(s.clone()),
            Value::Array(items) => SampleValue::Sequence(items.iter().map(Into::into).collect()),
            Value::Object(map) => SampleValue::Mapping(
                map.iter()
                    .map(|(k, v)| (k.clone(), SampleValue::from(v)))
                    .collect(),
            ),
        }
    }
}
