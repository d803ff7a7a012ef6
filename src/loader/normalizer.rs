//! Parsing raw spec text into a [`CanonicalSpec`]

use crate::error::{CompileError, Result};
use crate::models::CanonicalSpec;
use serde_json::{Map, Number, Value};
use std::path::Path;

/// Textual encodings accepted for spec documents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecEncoding {
    Json,
    Yaml,
}

impl SpecEncoding {
    /// Guess the encoding from a filename extension
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?;
        if ext.eq_ignore_ascii_case("json") {
            Some(SpecEncoding::Json)
        } else if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") {
            Some(SpecEncoding::Yaml)
        } else {
            None
        }
    }

    fn name(&self) -> &'static str {
        match self {
            SpecEncoding::Json => "JSON",
            SpecEncoding::Yaml => "YAML",
        }
    }

    fn other(&self) -> Self {
        match self {
            SpecEncoding::Json => SpecEncoding::Yaml,
            SpecEncoding::Yaml => SpecEncoding::Json,
        }
    }

    fn parse(&self, raw: &str) -> std::result::Result<Value, String> {
        match self {
            SpecEncoding::Json => serde_json::from_str(raw).map_err(|e| e.to_string()),
            SpecEncoding::Yaml => {
                let mut value: serde_yaml::Value =
                    serde_yaml::from_str(raw).map_err(|e| e.to_string())?;
                value.apply_merge().map_err(|e| e.to_string())?;
                Ok(yaml_to_json(value))
            }
        }
    }
}

/// Parse raw spec text and check the structural preconditions.
///
/// The hinted encoding is tried first, then the other one. Without a hint JSON
/// is tried first.
pub fn normalize(raw: &str, hint: Option<SpecEncoding>) -> Result<CanonicalSpec> {
    let primary = hint.unwrap_or(SpecEncoding::Json);
    let secondary = primary.other();

    let root = match primary.parse(raw) {
        Ok(value) => value,
        Err(primary_err) => {
            tracing::debug!(
                "{} parse failed, retrying as {}: {}",
                primary.name(),
                secondary.name(),
                primary_err
            );
            secondary
                .parse(raw)
                .map_err(|secondary_err| CompileError::MalformedSpec {
                    primary_name: primary.name(),
                    primary: primary_err,
                    secondary_name: secondary.name(),
                    secondary: secondary_err,
                })?
        }
    };

    validate_shape(&root)?;
    Ok(CanonicalSpec::new(root))
}

fn validate_shape(root: &Value) -> Result<()> {
    let Value::Object(map) = root else {
        return Err(CompileError::InvalidSpecShape(kind_of(root)));
    };

    if !map.contains_key("openapi") && !map.contains_key("swagger") {
        return Err(CompileError::MissingVersionMarker);
    }

    match map.get("paths") {
        Some(Value::Object(_)) => Ok(()),
        _ => Err(CompileError::MissingPaths),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}

fn yaml_to_json(value: serde_yaml::Value) -> Value {
    match value {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Bool(b),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::from(i)
            } else if let Some(u) = n.as_u64() {
                Value::from(u)
            } else {
                n.as_f64()
                    .and_then(Number::from_f64)
                    .map(Value::Number)
                    .unwrap_or(Value::Null)
            }
        }
        serde_yaml::Value::String(s) => Value::String(s),
        serde_yaml::Value::Sequence(items) => {
            Value::Array(items.into_iter().map(yaml_to_json).collect())
        }
        serde_yaml::Value::Mapping(mapping) => {
            let mut map = Map::with_capacity(mapping.len());
            for (key, value) in mapping {
                map.insert(yaml_key(key), yaml_to_json(value));
            }
            Value::Object(map)
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json(tagged.value),
    }
}

// Unquoted response codes (`200:`) arrive as numbers
fn yaml_key(key: serde_yaml::Value) -> String {
    match key {
        serde_yaml::Value::String(s) => s,
        serde_yaml::Value::Number(n) => n.to_string(),
        serde_yaml::Value::Bool(b) => b.to_string(),
        serde_yaml::Value::Null => "null".to_string(),
        other => serde_yaml::to_string(&other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

/// Base URL declared by the document itself, if any.
///
/// OpenAPI 3 uses the first `servers` entry (server variables replaced by
/// their defaults); Swagger 2 combines `schemes[0]`, `host` and `basePath`.
/// The result is only a suggestion for callers that have no base URL of
/// their own.
pub fn derive_base_url(spec: &CanonicalSpec) -> Option<String> {
    let root = spec.root();

    if let Some(server) = root
        .get("servers")
        .and_then(Value::as_array)
        .and_then(|servers| servers.first())
        && let Some(url) = server.get("url").and_then(Value::as_str)
    {
        return Some(substitute_server_variables(url, server.get("variables")));
    }

    let host = root.get("host").and_then(Value::as_str)?;
    let scheme = root
        .get("schemes")
        .and_then(Value::as_array)
        .and_then(|schemes| schemes.first())
        .and_then(Value::as_str)
        .unwrap_or("https");
    let base_path = root
        .get("basePath")
        .and_then(Value::as_str)
        .filter(|p| *p != "/")
        .unwrap_or("");

    Some(format!("{}://{}{}", scheme, host, base_path))
}

fn substitute_server_variables(url: &str, variables: Option<&Value>) -> String {
    let Some(Value::Object(vars)) = variables else {
        return url.to_string();
    };

    let mut resolved = url.to_string();
    for (name, var) in vars {
        if let Some(default) = var.get("default").and_then(Value::as_str) {
            resolved = resolved.replace(&format!("{{{}}}", name), default);
        }
    }
    resolved
}
