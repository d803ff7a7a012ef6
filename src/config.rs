use crate::error::{CompileError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Parameters of the generated test plan.
///
/// The compiler only reads this; every field is required and no defaults are
/// applied here. An empty `base_url` lets the compiler fall back to the
/// server declared by the spec.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestPlanConfig {
    pub thread_count: u32,
    pub ramp_up_seconds: u32,
    pub loop_count: u32,
    pub base_url: String,
    pub test_plan_name: String,
}

impl TestPlanConfig {
    /// Check that all counts are positive
    pub fn validate(&self) -> Result<()> {
        let counts = [
            ("threadCount", self.thread_count),
            ("rampUpSeconds", self.ramp_up_seconds),
            ("loopCount", self.loop_count),
        ];
        for (name, value) in counts {
            if value == 0 {
                return Err(CompileError::InvalidConfig(format!(
                    "{} must be a positive integer",
                    name
                )));
            }
        }
        Ok(())
    }
}

/// Partial configuration as stored in a config file; missing fields are
/// filled in by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ConfigFile {
    pub thread_count: Option<u32>,
    pub ramp_up_seconds: Option<u32>,
    pub loop_count: Option<u32>,
    pub base_url: Option<String>,
    pub test_plan_name: Option<String>,
}

/// Load a YAML or JSON config file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<ConfigFile> {
    let path = path.as_ref();

    let content = fs::read_to_string(path).map_err(|e| {
        CompileError::ConfigLoad(format!("Failed to read file {}: {}", path.display(), e))
    })?;

    // JSON is a subset of the YAML grammar serde_yaml accepts
    serde_yaml::from_str(&content).map_err(|e| {
        CompileError::ConfigLoad(format!("Failed to parse {}: {}", path.display(), e))
    })
}
