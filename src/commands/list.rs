use crate::loader::{self, SpecEncoding};
use anyhow::Context;
use colored::*;
use std::fs;
use std::path::Path;

pub fn execute_list(spec_path: &Path) -> anyhow::Result<()> {
    println!("{}", "Loading spec file...".bright_blue());
    println!("  Path: {}", spec_path.display());

    let raw = fs::read_to_string(spec_path)
        .with_context(|| format!("Failed to read spec file {}", spec_path.display()))?;
    let spec = loader::normalize(&raw, SpecEncoding::from_path(spec_path))?;
    let operations = loader::extract_operations(&spec)?;

    println!("\n{}", "✓ Spec loaded successfully".green());
    if let Some(version) = spec.version() {
        let label = if spec.is_swagger() { "Swagger" } else { "OpenAPI" };
        println!("  {} Version: {}", label, version);
    }
    if let Some(base_url) = loader::derive_base_url(&spec) {
        println!("  Declared Server: {}", base_url);
    }
    println!();

    if operations.is_empty() {
        println!("{}", "No operations found".yellow());
        return Ok(());
    }

    println!("{}", format!("Operations ({}):", operations.len()).bold());
    for (idx, op) in operations.iter().enumerate() {
        println!(
            "  {}. {} {}",
            idx + 1,
            op.method.as_str().bright_cyan(),
            op.path.bold()
        );
        println!("     Name: {}", op.display_name());

        if !op.tags.is_empty() {
            println!("     Tags: {}", op.tags.join(", "));
        }

        if op.method.carries_body() && op.request_body_schema.is_some() {
            println!("     Body: {}", "synthesized JSON".bright_yellow());
        }
    }

    Ok(())
}
