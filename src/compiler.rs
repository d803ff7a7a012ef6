//! The spec-to-plan pipeline
//!
//! raw text → [`normalize`] → [`extract_operations`] → body synthesis for
//! POST/PUT/PATCH operations → [`JmeterConverter`]. Every call owns all of its
//! state, so independent compiles never interact.

use crate::config::TestPlanConfig;
use crate::converters::{Converter, JmeterConverter, body};
use crate::error::Result;
use crate::loader::{ReferenceResolver, SpecEncoding, derive_base_url, extract_operations, normalize};
use crate::models::{CanonicalSpec, OperationDescriptor, PlannedOperation, TestPlanDocument};
use crate::synthesis::Synthesizer;
use std::borrow::Cow;

/// Compile raw spec text, trying JSON first and YAML second
pub fn compile(raw: &str, config: &TestPlanConfig) -> Result<TestPlanDocument> {
    compile_with_hint(raw, None, config)
}

/// Compile raw spec text, trying the hinted encoding first
pub fn compile_with_hint(
    raw: &str,
    hint: Option<SpecEncoding>,
    config: &TestPlanConfig,
) -> Result<TestPlanDocument> {
    config.validate()?;

    let spec = normalize(raw, hint)?;
    tracing::debug!(
        "parsed spec version {}",
        spec.version().unwrap_or_default()
    );

    let operations = extract_operations(&spec)?;
    let planned = plan_operations(&spec, operations)?;
    let config = effective_config(config, &spec);

    let document = JmeterConverter::new().convert(&config, &planned)?;
    tracing::debug!("assembled plan with {} samplers", planned.len());
    Ok(document)
}

/// Pair each operation with its serialized body.
///
/// Only POST/PUT/PATCH operations with a JSON request body schema get one.
pub fn plan_operations(
    spec: &CanonicalSpec,
    operations: Vec<OperationDescriptor>,
) -> Result<Vec<PlannedOperation>> {
    let bodies = {
        let mut synthesizer = Synthesizer::new(ReferenceResolver::new(spec));
        operations
            .iter()
            .map(|op| match &op.request_body_schema {
                Some(schema) if op.method.carries_body() => {
                    let value = synthesizer.synthesize_body(schema)?;
                    Ok(Some(body::serialize(&value)))
                }
                _ => Ok(None),
            })
            .collect::<Result<Vec<_>>>()?
    };

    Ok(operations
        .into_iter()
        .zip(bodies)
        .map(|(descriptor, body)| PlannedOperation { descriptor, body })
        .collect())
}

/// An explicit base URL wins; an empty one is replaced by the server the
/// spec declares, when it declares one.
fn effective_config<'c>(config: &'c TestPlanConfig, spec: &CanonicalSpec) -> Cow<'c, TestPlanConfig> {
    if !config.base_url.trim().is_empty() {
        return Cow::Borrowed(config);
    }
    match derive_base_url(spec) {
        Some(base_url) => {
            tracing::debug!("using base URL declared by the spec: {}", base_url);
            Cow::Owned(TestPlanConfig {
                base_url,
                ..config.clone()
            })
        }
        None => Cow::Borrowed(config),
    }
}
