// crates/imagewall-config/src/pattern.rs
// ============================================================================
// Module: Hostname and Path Patterns
// Description: Syntax validation and matching for origin pattern components.
// Purpose: Enforce strict hostname/pathname syntax with deterministic matching.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Hostnames are matched label-wise from the right and paths segment-wise from
//! the left. Wildcards are confined to the positions where a match stays
//! unambiguous: the leftmost hostname label and the final path segment.
//!
//! Matching assumes lowercase input; callers normalize case before comparing.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::config::MAX_HOSTNAME_LABEL_LENGTH;
use crate::config::MAX_HOSTNAME_LENGTH;
use crate::config::MAX_PATHNAME_LENGTH;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Characters that end a hostname inside a URL and are never valid within one.
const HOSTNAME_DELIMITERS: [char; 6] = ['/', '?', '#', ':', '@', '\\'];

// ============================================================================
// SECTION: Validation
// ============================================================================

/// Validates a literal hostname with no wildcard labels.
pub(crate) fn validate_literal_hostname(value: &str) -> Result<(), String> {
    validate_hostname(value, false)
}

/// Validates a pattern hostname; a wildcard is allowed as the leftmost label.
pub(crate) fn validate_pattern_hostname(value: &str) -> Result<(), String> {
    validate_hostname(value, true)
}

/// Validates hostname syntax with optional wildcard support.
fn validate_hostname(value: &str, allow_wildcard: bool) -> Result<(), String> {
    if value.is_empty() {
        return Err("must be non-empty".to_string());
    }
    if value.len() > MAX_HOSTNAME_LENGTH {
        return Err("exceeds max length".to_string());
    }
    if value.chars().any(char::is_whitespace) {
        return Err("must not contain whitespace".to_string());
    }
    if value.contains(HOSTNAME_DELIMITERS) {
        return Err("must not contain path, query, or port characters".to_string());
    }
    let labels: Vec<&str> = value.split('.').collect();
    for (idx, label) in labels.iter().enumerate() {
        if *label == "*" || *label == "**" {
            if !allow_wildcard {
                return Err("must not contain wildcard labels".to_string());
            }
            if idx != 0 {
                return Err("wildcard only allowed as the leftmost label".to_string());
            }
            if labels.len() == 1 {
                return Err("wildcard requires a literal suffix".to_string());
            }
            continue;
        }
        validate_label(label)?;
    }
    Ok(())
}

/// Validates a single literal hostname label.
fn validate_label(label: &str) -> Result<(), String> {
    if label.is_empty() {
        return Err("must not contain empty labels".to_string());
    }
    if label.len() > MAX_HOSTNAME_LABEL_LENGTH {
        return Err("label exceeds max length".to_string());
    }
    if !label.bytes().all(|byte| byte.is_ascii_alphanumeric() || byte == b'-') {
        return Err("label contains invalid characters".to_string());
    }
    if label.starts_with('-') || label.ends_with('-') {
        return Err("label must not start or end with a hyphen".to_string());
    }
    Ok(())
}

/// Validates a pathname pattern.
pub(crate) fn validate_pathname(value: &str) -> Result<(), String> {
    if value.is_empty() {
        return Err("must be non-empty".to_string());
    }
    if value.len() > MAX_PATHNAME_LENGTH {
        return Err("exceeds max length".to_string());
    }
    if !value.starts_with('/') {
        return Err("must start with '/'".to_string());
    }
    if value.chars().any(char::is_whitespace) {
        return Err("must not contain whitespace".to_string());
    }
    if value.contains(['?', '#', '\\']) {
        return Err("must not contain query or fragment characters".to_string());
    }
    let segments = path_segments(value);
    let last = segments.len().saturating_sub(1);
    for (idx, segment) in segments.iter().enumerate() {
        match *segment {
            "*" => {}
            "**" => {
                if idx != last {
                    return Err("'**' only allowed as the final segment".to_string());
                }
            }
            "." | ".." => return Err("must not contain dot segments".to_string()),
            other => {
                if other.is_empty() {
                    return Err("must not contain empty segments".to_string());
                }
                if other.contains('*') {
                    return Err("wildcard must span an entire segment".to_string());
                }
            }
        }
    }
    Ok(())
}

// ============================================================================
// SECTION: Matching
// ============================================================================

/// Returns true when a pattern hostname matches a URL hostname.
///
/// `*` consumes exactly one leading label and `**` consumes one or more; all
/// remaining labels compare literally. Inputs must already be lowercase.
#[must_use]
pub fn hostname_matches(pattern: &str, host: &str) -> bool {
    if let Some(suffix) = pattern.strip_prefix("*.") {
        return host
            .split_once('.')
            .is_some_and(|(label, rest)| !label.is_empty() && rest == suffix);
    }
    if let Some(suffix) = pattern.strip_prefix("**.") {
        return host
            .strip_suffix(suffix)
            .and_then(|prefix| prefix.strip_suffix('.'))
            .is_some_and(|prefix| !prefix.is_empty());
    }
    pattern == host
}

/// Returns true when a pathname pattern matches a URL path segment-wise.
///
/// `*` consumes exactly one non-empty segment; a final `**` consumes zero or
/// more remaining segments.
#[must_use]
pub fn pathname_matches(pattern: &str, path: &str) -> bool {
    let pattern_segments = path_segments(pattern);
    let actual_segments = path_segments(path);
    for (idx, segment) in pattern_segments.iter().enumerate() {
        if *segment == "**" {
            return true;
        }
        let Some(actual) = actual_segments.get(idx) else {
            return false;
        };
        if *segment == "*" {
            if actual.is_empty() {
                return false;
            }
        } else if segment != actual {
            return false;
        }
    }
    actual_segments.len() == pattern_segments.len()
}

/// Splits a path into segments, treating the root path as empty.
fn path_segments(path: &str) -> Vec<&str> {
    let rest = path.strip_prefix('/').unwrap_or(path);
    if rest.is_empty() { Vec::new() } else { rest.split('/').collect() }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
