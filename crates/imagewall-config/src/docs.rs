// crates/imagewall-config/src/docs.rs
// ============================================================================
// Module: Config Docs Generator
// Description: Markdown generator for imagewall.toml documentation.
// Purpose: Keep config docs in sync with schema and validation.
// Dependencies: serde_json, std
// ============================================================================

//! ## Overview
//! Generates `docs/imagewall.toml.md` from the canonical configuration schema.
//! The output is deterministic; `verify_config_docs` detects drift between the
//! committed file and the generator.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde_json::Value;
use thiserror::Error;

use crate::examples::config_toml_example;
use crate::schema::config_schema;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default output path for generated configuration docs.
const DOCS_PATH: &str = "docs/imagewall.toml.md";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised when generating or verifying config docs.
#[derive(Debug, Error)]
pub enum DocsError {
    /// IO failure while writing docs.
    #[error("docs io error: {0}")]
    Io(String),
    /// Schema traversal or rendering error.
    #[error("docs schema error: {0}")]
    Schema(String),
    /// Generated docs do not match the committed file.
    #[error("docs drift: {0}")]
    Drift(String),
}

// ============================================================================
// SECTION: Public API
// ============================================================================

/// Generates the configuration markdown documentation.
///
/// # Errors
///
/// Returns [`DocsError`] when schema traversal fails.
pub fn config_docs_markdown() -> Result<String, DocsError> {
    let schema = config_schema();
    let images = schema
        .pointer("/properties/images")
        .ok_or_else(|| DocsError::Schema("schema missing images section".to_string()))?;
    let pattern_items = images
        .pointer("/properties/remote_patterns/items")
        .ok_or_else(|| DocsError::Schema("schema missing remote_patterns items".to_string()))?;

    let mut out = String::new();

    out.push_str("<!--\n");
    out.push_str("docs/imagewall.toml.md\n");
    out.push_str("============================================================================\n");
    out.push_str("Document: Imagewall Configuration\n");
    out.push_str("Description: Reference for imagewall.toml configuration fields.\n");
    out.push_str("Purpose: Document the remote image origin allow-list settings.\n");
    out.push_str("Generated: This file is auto-generated; do not edit manually.\n");
    out.push_str("============================================================================\n");
    out.push_str("-->\n\n");

    out.push_str("# imagewall.toml Configuration\n\n");
    out.push_str("## Overview\n\n");
    out.push_str("`imagewall.toml` declares which remote image origins are permitted. The\n");
    out.push_str("configuration is read once at startup, validated fail-closed, and never\n");
    out.push_str("mutated afterwards. An empty allow-list permits nothing.\n\n");

    out.push_str("## [images]\n\n");
    render_field_table(&mut out, images)?;

    out.push_str("\n## [[images.remote_patterns]]\n\n");
    render_field_table(&mut out, pattern_items)?;

    out.push_str("\n## Example\n\n");
    out.push_str("```toml\n");
    out.push_str(&config_toml_example());
    out.push_str("```\n");

    Ok(out)
}

/// Writes the generated docs to the given path, or the default path.
///
/// # Errors
///
/// Returns [`DocsError`] when generation or the filesystem write fails.
pub fn write_config_docs(path: Option<&Path>) -> Result<(), DocsError> {
    let markdown = config_docs_markdown()?;
    let target = path.unwrap_or_else(|| Path::new(DOCS_PATH));
    if let Some(parent) = target.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|err| DocsError::Io(err.to_string()))?;
    }
    fs::write(target, markdown).map_err(|err| DocsError::Io(err.to_string()))
}

/// Verifies the committed docs match the generator output.
///
/// # Errors
///
/// Returns [`DocsError::Drift`] when the file differs from the generated
/// markdown, and [`DocsError::Io`] when the file cannot be read.
pub fn verify_config_docs(path: Option<&Path>) -> Result<(), DocsError> {
    let markdown = config_docs_markdown()?;
    let target = path.unwrap_or_else(|| Path::new(DOCS_PATH));
    let existing = fs::read_to_string(target).map_err(|err| DocsError::Io(err.to_string()))?;
    if existing != markdown {
        return Err(DocsError::Drift(format!(
            "{} does not match generated docs",
            target.display()
        )));
    }
    Ok(())
}

// ============================================================================
// SECTION: Rendering
// ============================================================================

/// Renders the field table for an object schema.
fn render_field_table(out: &mut String, schema: &Value) -> Result<(), DocsError> {
    let properties = schema
        .get("properties")
        .and_then(Value::as_object)
        .ok_or_else(|| DocsError::Schema("object schema missing properties".to_string()))?;
    let required: BTreeSet<&str> = schema
        .get("required")
        .and_then(Value::as_array)
        .map(|values| values.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();

    out.push_str("| Field | Type | Required | Default | Description |\n");
    out.push_str("| ----- | ---- | -------- | ------- | ----------- |\n");
    for (name, field) in properties {
        let field_type = field.get("type").and_then(Value::as_str).unwrap_or("object");
        let required_label = if required.contains(name.as_str()) { "yes" } else { "no" };
        let default = field
            .get("default")
            .map_or_else(|| "(none)".to_string(), |value| format!("`{value}`"));
        let description = field.get("description").and_then(Value::as_str).unwrap_or("");
        out.push_str(&format!(
            "| `{name}` | {field_type} | {required_label} | {default} | {description} |\n"
        ));
    }
    Ok(())
}

// ============================================================================
// SECTION: Tests
// ============================================================================
