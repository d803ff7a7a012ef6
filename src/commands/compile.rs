//! Compile command implementation
//!
//! Compiles an OpenAPI/Swagger file into a JMeter test plan.

use crate::config::{ConfigFile, TestPlanConfig, load_config};
use crate::loader::SpecEncoding;
use anyhow::Context;
use colored::Colorize;
use std::fs;
use std::path::Path;

pub const DEFAULT_THREADS: u32 = 10;
pub const DEFAULT_RAMP_UP_SECONDS: u32 = 1;
pub const DEFAULT_LOOPS: u32 = 1;
pub const DEFAULT_PLAN_NAME: &str = "API Test Plan";

/// Arguments for the compile command
#[derive(Debug, Clone)]
pub struct CompileCommandArgs<'a> {
    pub spec_path: &'a Path,
    pub output_path: Option<&'a Path>,
    pub config_path: Option<&'a Path>,
    pub threads: Option<u32>,
    pub ramp_up: Option<u32>,
    pub loops: Option<u32>,
    pub base_url: Option<&'a str>,
    pub name: Option<&'a str>,
}

/// Flags win over the config file, which wins over the defaults
pub fn build_config(args: &CompileCommandArgs<'_>) -> crate::Result<TestPlanConfig> {
    let file = match args.config_path {
        Some(path) => load_config(path)?,
        None => ConfigFile::default(),
    };

    Ok(TestPlanConfig {
        thread_count: args
            .threads
            .or(file.thread_count)
            .unwrap_or(DEFAULT_THREADS),
        ramp_up_seconds: args
            .ramp_up
            .or(file.ramp_up_seconds)
            .unwrap_or(DEFAULT_RAMP_UP_SECONDS),
        loop_count: args.loops.or(file.loop_count).unwrap_or(DEFAULT_LOOPS),
        base_url: args
            .base_url
            .map(str::to_string)
            .or(file.base_url)
            .unwrap_or_default(),
        test_plan_name: args
            .name
            .map(str::to_string)
            .or(file.test_plan_name)
            .unwrap_or_else(|| DEFAULT_PLAN_NAME.to_string()),
    })
}

/// Execute the compile command
pub fn execute_compile(args: CompileCommandArgs<'_>) -> anyhow::Result<()> {
    let config = build_config(&args)?;

    let raw = fs::read_to_string(args.spec_path)
        .with_context(|| format!("Failed to read spec file {}", args.spec_path.display()))?;
    eprintln!(
        "{} Loaded spec file: {}",
        "✓".green(),
        args.spec_path.display()
    );

    let hint = SpecEncoding::from_path(args.spec_path);
    let document = crate::compile_with_hint(&raw, hint, &config)?;

    if let Some(path) = args.output_path {
        fs::write(path, document.as_str())
            .with_context(|| format!("Failed to write test plan {}", path.display()))?;
        eprintln!(
            "{} Generated JMeter test plan: {}",
            "✓".green(),
            path.display()
        );
    } else {
        print!("{}", document);
    }

    Ok(())
}
