// crates/tfcrd-schema/src/lib.rs
// ============================================================================
// Module: tfcrd Schema Library
// Description: Input model for the schema-to-type compiler.
// Purpose: Describe attribute schemas, name forms, and field paths.
// Dependencies: convert_case, serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! `tfcrd-schema` defines the hierarchical attribute schema that
//! provisioning tools publish for each resource, along with the name and path
//! utilities the type builder uses to keep source-format, target-format, and
//! canonical field locations in sync.
//!
//! ### Design Notes
//! - Resource attributes are stored in a [`std::collections::BTreeMap`], so
//!   iteration order is lexicographic and deterministic across runs.
//! - Collection element shapes form a closed union ([`Element`]) matched
//!   exhaustively by consumers; the "unset" element is an explicit variant.
//! - Paths are typed ([`SourcePath`], [`TargetPath`], [`CanonicalPath`]) so a
//!   lookup can never silently compare two different naming conventions.
//!
//! ## Index
//! - Schema model: [`AttributeSchema`], [`ResourceSchema`], [`Element`], [`ValueKind`]
//! - Documents: [`SchemaDocument`], [`SchemaError`], [`MAX_SCHEMA_BYTES`]
//! - Names: [`FieldName`]
//! - Paths: [`FieldPath`], [`Segment`], [`SourcePath`], [`TargetPath`], [`CanonicalPath`]

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod document;
pub mod names;
pub mod path;
pub mod schema;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use document::MAX_SCHEMA_BYTES;
pub use document::SchemaDocument;
pub use document::SchemaError;
pub use names::FieldName;
pub use path::CanonicalPath;
pub use path::FieldPath;
pub use path::PathError;
pub use path::Segment;
pub use path::SourcePath;
pub use path::TargetPath;
pub use path::WILDCARD;
pub use schema::AttributeSchema;
pub use schema::Element;
pub use schema::ResourceSchema;
pub use schema::ValueKind;
