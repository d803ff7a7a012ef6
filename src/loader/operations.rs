//! Operation extraction from the `paths` table

use super::resolver::{ReferenceResolver, Resolution};
use crate::error::Result;
use crate::models::{CanonicalSpec, HttpMethod, OperationDescriptor, RequestBodySchema};
use serde_json::{Map, Value};

const JSON_MEDIA_TYPE: &str = "application/json";

/// Build one descriptor per (path, method) pair, in document order.
///
/// Keys under a path item that are not HTTP methods (`parameters`,
/// `summary`, `x-*`, ...) are skipped, as are method entries whose value is
/// not a mapping.
pub fn extract_operations(spec: &CanonicalSpec) -> Result<Vec<OperationDescriptor>> {
    let resolver = ReferenceResolver::new(spec);
    let mut operations = Vec::new();

    for (path, item) in spec.paths() {
        // path items may themselves be references
        let (item, _) = resolver.resolve(item)?;
        let Some(item) = item.as_object() else {
            tracing::debug!("skipping non-mapping path item {}", path);
            continue;
        };

        for (key, operation) in item {
            let Some(method) = HttpMethod::from_key(key) else {
                continue;
            };
            let Some(operation) = operation.as_object() else {
                tracing::debug!("skipping {} {}: operation is not a mapping", method, path);
                continue;
            };

            operations.push(OperationDescriptor {
                path: path.clone(),
                method,
                operation_id: string_field(operation, "operationId"),
                summary: string_field(operation, "summary"),
                tags: tags(operation),
                request_body_schema: request_body_schema(&resolver, operation)?,
            });
        }
    }

    tracing::debug!("extracted {} operations", operations.len());
    Ok(operations)
}

fn string_field(operation: &Map<String, Value>, key: &str) -> Option<String> {
    operation.get(key).and_then(Value::as_str).map(str::to_string)
}

fn tags(operation: &Map<String, Value>) -> Vec<String> {
    operation
        .get("tags")
        .and_then(Value::as_array)
        .map(|tags| {
            tags.iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// `requestBody.content["application/json"].schema`, or a Swagger 2 body
/// parameter's `schema`, with references followed.
fn request_body_schema(
    resolver: &ReferenceResolver<'_>,
    operation: &Map<String, Value>,
) -> Result<Option<RequestBodySchema>> {
    let schema = match operation.get("requestBody") {
        Some(body) => {
            let (body, _) = resolver.resolve(body)?;
            body.get("content")
                .and_then(|content| content.get(JSON_MEDIA_TYPE))
                .and_then(|media| media.get("schema"))
        }
        None => swagger_body_parameter(resolver, operation)?,
    };

    let Some(schema) = schema else {
        return Ok(None);
    };

    let body_schema = match resolver.follow(schema, &[])? {
        Resolution::Literal { node, via } => RequestBodySchema {
            schema: node.clone(),
            via,
        },
        Resolution::Cycle { pointer } => {
            tracing::debug!("request body schema {} never reaches a literal", pointer);
            RequestBodySchema {
                schema: Value::Null,
                via: vec![pointer],
            }
        }
    };
    Ok(Some(body_schema))
}

fn swagger_body_parameter<'a>(
    resolver: &ReferenceResolver<'a>,
    operation: &'a Map<String, Value>,
) -> Result<Option<&'a Value>> {
    let Some(parameters) = operation.get("parameters").and_then(Value::as_array) else {
        return Ok(None);
    };

    for parameter in parameters {
        let (parameter, _) = resolver.resolve(parameter)?;
        if parameter.get("in").and_then(Value::as_str) == Some("body")
            && let Some(schema) = parameter.get("schema")
        {
            return Ok(Some(schema));
        }
    }
    Ok(None)
}
