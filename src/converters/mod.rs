//! Converters for generating load-test plans from extracted operations
//!
//! This module provides the converter trait, the JMeter implementation and
//! the pieces it is built from: request body serialization and a small XML
//! element builder.

pub mod body;
pub mod jmeter;
pub mod xml;

pub use jmeter::{JmeterConverter, UrlParts, restore_placeholders, rewrite_placeholders};

use crate::config::TestPlanConfig;
use crate::error::Result;
use crate::models::PlannedOperation;

/// Trait for converting planned operations into a test plan
pub trait Converter {
    /// The output type of the conversion
    type Output;

    /// Assemble one plan containing every operation, in the order given
    fn convert(
        &self,
        config: &TestPlanConfig,
        operations: &[PlannedOperation],
    ) -> Result<Self::Output>;
}
