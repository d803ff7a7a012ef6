//! Sample value synthesis for schema nodes
//!
//! Values are chosen in priority order: an explicit `example`, the first of
//! `examples`, then a type-specific value (enum member, property-name
//! heuristic, declared bounds, fixed default).

pub mod heuristics;

use crate::error::Result;
use crate::loader::{ReferenceResolver, Resolution};
use crate::models::{RequestBodySchema, SampleValue, SchemaNode};
use chrono::Datelike;
use heuristics::{IntegerHint, StringHint};
use indexmap::IndexMap;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde_json::{Map, Value};

/// Produces sample values for the schemas of one document.
///
/// Identifier counters live in the synthesizer and restart at 1 for every
/// [`Synthesizer::synthesize_body`] call, so ids within one body are distinct
/// and independent bodies never share counter state.
pub struct Synthesizer<'a, R = SmallRng> {
    resolver: ReferenceResolver<'a>,
    rng: R,
    year: i64,
    next_id: u64,
    /// Pointers currently being expanded
    path: Vec<String>,
}

impl<'a> Synthesizer<'a> {
    pub fn new(resolver: ReferenceResolver<'a>) -> Self {
        Self::with_rng(resolver, SmallRng::from_os_rng())
    }
}

impl<'a, R: Rng> Synthesizer<'a, R> {
    pub fn with_rng(resolver: ReferenceResolver<'a>, rng: R) -> Self {
        Self {
            resolver,
            rng,
            year: i64::from(chrono::Local::now().year()),
            next_id: 1,
            path: Vec::new(),
        }
    }

    /// Synthesize the value for one operation's request body
    pub fn synthesize_body(&mut self, body: &'a RequestBodySchema) -> Result<SampleValue> {
        self.next_id = 1;
        self.path = body.via.clone();
        let value = self.synthesize(&body.schema, None);
        self.path.clear();
        value
    }

    /// Synthesize a value for `node`, which may be a reference marker.
    ///
    /// A reference back to a pointer already being expanded yields `Null`.
    pub fn synthesize(&mut self, node: &'a Value, property: Option<&str>) -> Result<SampleValue> {
        match self.resolver.follow(node, &self.path)? {
            Resolution::Cycle { .. } => Ok(SampleValue::Null),
            Resolution::Literal { node, via } => {
                let depth = self.path.len();
                self.path.extend(via);
                let value = self.synthesize_literal(node, property);
                self.path.truncate(depth);
                value
            }
        }
    }

    fn synthesize_literal(&mut self, node: &'a Value, property: Option<&str>) -> Result<SampleValue> {
        let SchemaNode::Mapping(schema) = SchemaNode::classify(node) else {
            return Ok(SampleValue::Null);
        };

        if let Some(example) = schema.get("example") {
            return Ok(example.into());
        }
        if let Some(first) = schema
            .get("examples")
            .and_then(Value::as_array)
            .and_then(|examples| examples.first())
        {
            return Ok(first.into());
        }

        let value = match schema_type(schema) {
            Some("object") => self.object(schema)?,
            Some("array") => match schema.get("items") {
                Some(items) => SampleValue::Sequence(vec![self.synthesize(items, property)?]),
                None => SampleValue::Sequence(Vec::new()),
            },
            Some("string") => first_enum(schema).unwrap_or_else(|| self.string(schema, property)),
            Some("integer") => first_enum(schema).unwrap_or_else(|| self.integer(schema, property)),
            Some("number") => first_enum(schema).unwrap_or_else(|| number(schema, property)),
            Some("boolean") => first_enum(schema).unwrap_or_else(|| {
                SampleValue::Bool(
                    heuristics::lookup(heuristics::BOOLEAN_HINTS, property).unwrap_or(true),
                )
            }),
            _ => SampleValue::Null,
        };
        Ok(value)
    }

    fn object(&mut self, schema: &'a Map<String, Value>) -> Result<SampleValue> {
        let mut fields = IndexMap::new();
        if let Some(properties) = schema.get("properties").and_then(Value::as_object) {
            for (name, property) in properties {
                let value = self.synthesize(property, Some(name))?;
                fields.insert(name.clone(), value);
            }
        }
        Ok(SampleValue::Mapping(fields))
    }

    fn string(&mut self, schema: &Map<String, Value>, property: Option<&str>) -> SampleValue {
        let text = match heuristics::lookup(heuristics::STRING_HINTS, property) {
            Some(StringHint::Identifier) => self.next_identifier().to_string(),
            Some(StringHint::Name) => heuristics::sample_name(property.unwrap_or_default()),
            Some(StringHint::Fixed(text)) => text.to_string(),
            None => "sample".to_string(),
        };
        SampleValue::String(fit_length(text, schema))
    }

    fn integer(&mut self, schema: &Map<String, Value>, property: Option<&str>) -> SampleValue {
        let value = match heuristics::lookup(heuristics::INTEGER_HINTS, property) {
            Some(IntegerHint::Identifier) => {
                i64::try_from(self.next_identifier()).unwrap_or(i64::MAX)
            }
            Some(IntegerHint::Fixed(value)) => value,
            Some(IntegerHint::CurrentYear) => self.year,
            Some(IntegerHint::Between(low, high)) => self.rng.random_range(low..=high),
            None => {
                let minimum = bound(schema, "minimum").map(f64::ceil);
                let maximum = bound(schema, "maximum").map(f64::floor);
                clamp(minimum.unwrap_or(1.0), maximum) as i64
            }
        };
        SampleValue::integer(value)
    }

    fn next_identifier(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

fn number(schema: &Map<String, Value>, property: Option<&str>) -> SampleValue {
    let value = heuristics::lookup(heuristics::NUMBER_HINTS, property).unwrap_or_else(|| {
        let minimum = bound(schema, "minimum");
        clamp(minimum.unwrap_or(1.0), bound(schema, "maximum"))
    });
    SampleValue::float(value)
}

/// The declared type; for 3.1 type lists, the first one that isn't `null`
fn schema_type(schema: &Map<String, Value>) -> Option<&str> {
    match schema.get("type")? {
        Value::String(t) => Some(t),
        Value::Array(types) => types
            .iter()
            .filter_map(Value::as_str)
            .find(|t| *t != "null"),
        _ => None,
    }
}

fn first_enum(schema: &Map<String, Value>) -> Option<SampleValue> {
    schema
        .get("enum")
        .and_then(Value::as_array)
        .and_then(|values| values.first())
        .map(SampleValue::from)
}

fn bound(schema: &Map<String, Value>, key: &str) -> Option<f64> {
    schema.get(key).and_then(Value::as_f64)
}

// The minimum wins over the default, then the maximum caps it
fn clamp(value: f64, maximum: Option<f64>) -> f64 {
    match maximum {
        Some(maximum) if value > maximum => maximum,
        _ => value,
    }
}

/// Upper bound on padding added to satisfy `minLength`
const MAX_SYNTHESIZED_LENGTH: u64 = 1024;

fn fit_length(mut text: String, schema: &Map<String, Value>) -> String {
    let max = schema.get("maxLength").and_then(Value::as_u64);
    let min = schema
        .get("minLength")
        .and_then(Value::as_u64)
        .map(|min| min.min(max.unwrap_or(u64::MAX)).min(MAX_SYNTHESIZED_LENGTH));

    if let Some(min) = min {
        let len = text.chars().count() as u64;
        if len < min {
            text.extend(std::iter::repeat_n('x', (min - len) as usize));
        }
    }
    if let Some(max) = max.map(|max| usize::try_from(max).unwrap_or(usize::MAX))
        && let Some((idx, _)) = text.char_indices().nth(max)
    {
        text.truncate(idx);
    }
    text
}
