// crates/imagewall-config/src/schema.rs
// ============================================================================
// Module: Config Schemas
// Description: JSON schema builders for imagewall.toml.
// Purpose: Provide canonical validation schema for config artifacts.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! This module defines the JSON Schema for the Imagewall configuration. The
//! schema is generated from the canonical config model and is used by tooling,
//! docs, and validation pipelines.

use serde_json::Value;
use serde_json::json;

use crate::config::MAX_DOMAIN_ENTRIES;
use crate::config::MAX_HOSTNAME_LENGTH;
use crate::config::MAX_PATHNAME_LENGTH;
use crate::config::MAX_REMOTE_PATTERNS;

/// Regex for a literal DNS hostname: dot-separated alphanumeric labels with
/// interior hyphens, each at most 63 characters.
const LITERAL_HOSTNAME_PATTERN: &str = "^[A-Za-z0-9]([A-Za-z0-9-]{0,61}[A-Za-z0-9])?(\\.[A-Za-z0-9]([A-Za-z0-9-]{0,61}[A-Za-z0-9])?)*$";

/// Regex for a pattern hostname: a literal hostname with an optional leftmost
/// `*.` or `**.` wildcard label.
const PATTERN_HOSTNAME_PATTERN: &str = "^(\\*\\*?\\.)?[A-Za-z0-9]([A-Za-z0-9-]{0,61}[A-Za-z0-9])?(\\.[A-Za-z0-9]([A-Za-z0-9-]{0,61}[A-Za-z0-9])?)*$";

/// Returns the JSON schema for `imagewall.toml`.
#[must_use]
pub fn config_schema() -> Value {
    json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "$id": "imagewall://schemas/config.schema.json",
        "title": "Imagewall Configuration",
        "description": "Remote image origin allow-list configuration.",
        "type": "object",
        "properties": {
            "images": images_config_schema(),
        },
        "additionalProperties": false
    })
}

/// Builds the `[images]` section schema.
fn images_config_schema() -> Value {
    json!({
        "type": "object",
        "description": "Remote image origin allow-list.",
        "properties": {
            "domains": {
                "type": "array",
                "description": "Legacy literal hostname allow-list. Deprecated; prefer remote_patterns.",
                "items": {
                    "type": "string",
                    "minLength": 1,
                    "maxLength": MAX_HOSTNAME_LENGTH,
                    "pattern": LITERAL_HOSTNAME_PATTERN,
                    "description": "Literal hostname permitted as an image source."
                },
                "maxItems": MAX_DOMAIN_ENTRIES,
                "default": []
            },
            "remote_patterns": {
                "type": "array",
                "description": "Remote pattern rules describing permitted image origins.",
                "items": remote_pattern_schema(),
                "maxItems": MAX_REMOTE_PATTERNS,
                "default": []
            }
        },
        "additionalProperties": false
    })
}

/// Builds the schema for one `[[images.remote_patterns]]` entry.
fn remote_pattern_schema() -> Value {
    json!({
        "type": "object",
        "description": "Remote pattern rule for a permitted image origin.",
        "properties": {
            "protocol": {
                "type": "string",
                "enum": ["http", "https"],
                "description": "Required URL scheme for the origin."
            },
            "hostname": {
                "type": "string",
                "minLength": 1,
                "maxLength": MAX_HOSTNAME_LENGTH,
                "pattern": PATTERN_HOSTNAME_PATTERN,
                "description": "Hostname pattern. A leftmost '*.' label matches one subdomain label; '**.' matches one or more."
            },
            "port": {
                "type": "integer",
                "minimum": 1,
                "maximum": 65_535,
                "description": "Required effective port. Omitted means any port."
            },
            "pathname": {
                "type": "string",
                "minLength": 1,
                "maxLength": MAX_PATHNAME_LENGTH,
                "pattern": "^/",
                "description": "Path pattern. '*' matches one segment; a final '**' matches the rest. Omitted means any path."
            }
        },
        "required": ["protocol", "hostname"],
        "additionalProperties": false
    })
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        reason = "Test fixtures use explicit asserts and unwraps for clarity."
    )]

    use super::*;

    #[test]
    fn schema_is_closed_object() {
        let schema = config_schema();
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["additionalProperties"], false);
        assert!(schema["properties"]["images"].is_object());
    }

    #[test]
    fn pattern_entry_requires_protocol_and_hostname() {
        let schema = remote_pattern_schema();
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(Value::as_str)
            .collect();
        assert_eq!(required, vec!["protocol", "hostname"]);
    }
}
