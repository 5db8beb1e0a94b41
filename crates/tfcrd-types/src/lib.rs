// crates/tfcrd-types/src/lib.rs
// ============================================================================
// Module: tfcrd Types Library
// Description: Schema-to-type builder for resource attribute schemas.
// Purpose: Synthesize parameter/observation type pairs deterministically.
// Dependencies: tfcrd-schema, tfcrd-config, serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! `tfcrd-types` walks a [`tfcrd_schema::ResourceSchema`] and produces a pair
//! of generated types per nested resource level: a parameters type holding
//! the fields a caller may set and an observation type holding computed
//! fields. Along the way it allocates collision-free type names, rewrites
//! sensitive fields into secret references, synthesizes reference companion
//! fields, and records path mappings into the resource configuration.
//!
//! ### Design Notes
//! - Attributes are visited in sorted key order, so type names, field order,
//!   and tags are stable across runs on the same input.
//! - Every build owns its own [`SymbolTable`] and type accumulator; nothing is
//!   shared between builds.
//! - Any error fails the whole build; partially built types are discarded.
//!
//! ## Index
//! - Builder: [`Builder`], [`Generated`], [`BuildError`]
//! - Model: [`ValueType`], [`GeneratedType`], [`GeneratedField`], [`Comments`]
//! - Comments: [`Comment`], [`CommentError`]
//! - Audit: [`BuildAuditSink`], [`BuildAuditEvent`]
//! - Rendering: [`render::render_types`]

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod audit;
pub mod builder;
pub mod comments;
pub mod error;
pub mod model;
pub mod reference;
pub mod render;
pub mod sensitive;
pub mod symbols;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use audit::BuildAuditEvent;
pub use audit::BuildAuditEventParams;
pub use audit::BuildAuditSink;
pub use audit::BuildEvent;
pub use audit::BuildFileAuditSink;
pub use audit::BuildNoopAuditSink;
pub use audit::BuildStderrAuditSink;
pub use builder::Builder;
pub use builder::MAX_RESOURCE_DEPTH;
pub use comments::Comment;
pub use comments::CommentError;
pub use error::BuildError;
pub use model::Comments;
pub use model::FieldTags;
pub use model::Generated;
pub use model::GeneratedField;
pub use model::GeneratedType;
pub use model::Primitive;
pub use model::TypeId;
pub use model::ValueType;
pub use symbols::SymbolTable;
