// crates/imagewall-config/src/examples.rs
// ============================================================================
// Module: Config Examples
// Description: Canonical example configuration payloads.
// Purpose: Deterministic examples for docs and tooling.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Canonical examples for Imagewall configuration. Outputs are deterministic
//! and kept in sync with schema and docs.

/// Returns a canonical example `imagewall.toml` configuration.
#[must_use]
pub fn config_toml_example() -> String {
    String::from(
        r#"[images]
# Legacy allow-list of literal hostnames. Deprecated; prefer remote_patterns.
domains = []

[[images.remote_patterns]]
protocol = "https"
hostname = "images.unsplash.com"

[[images.remote_patterns]]
protocol = "https"
hostname = "pixabay.com"

[[images.remote_patterns]]
protocol = "https"
hostname = "**.imgix.net"
pathname = "/photos/**"
# port = 8443
"#,
    )
}

// ============================================================================
// SECTION: Tests
// ============================================================================
