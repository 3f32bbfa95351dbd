// crates/imagewall-config/src/lib.rs
// ============================================================================
// Module: Imagewall Config Library
// Description: Canonical config model, validation, and artifact generation.
// Purpose: Single source of truth for imagewall.toml semantics.
// Dependencies: serde, toml, url
// ============================================================================

//! ## Overview
//! `imagewall-config` defines the canonical configuration model for the
//! remote image origin allow-list. It provides strict, fail-closed validation,
//! deny-by-default origin policy evaluation, and deterministic generators for
//! config schema, examples, and docs.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod docs;
pub mod examples;
pub mod pattern;
pub mod policy;
pub mod schema;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
pub use docs::config_docs_markdown;
pub use docs::verify_config_docs;
pub use docs::write_config_docs;
pub use examples::config_toml_example;
pub use policy::*;
pub use schema::config_schema;
