// crates/tfcrd-config/src/lib.rs
// ============================================================================
// Module: tfcrd Config Library
// Description: Resource configuration model, validation, and examples.
// Purpose: Single source of truth for per-resource generation settings.
// Dependencies: tfcrd-schema, serde, toml
// ============================================================================

//! ## Overview
//! `tfcrd-config` defines the resource configuration the type builder reads
//! from and writes into: the generated kind name, the late-initialization
//! ignore list, the sensitive-field registry, and cross-resource references.
//! Configuration files are TOML and are validated strictly and fail closed.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod examples;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
pub use examples::config_toml_example;
