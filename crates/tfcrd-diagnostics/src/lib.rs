// crates/tfcrd-diagnostics/src/lib.rs
// ============================================================================
// Module: tfcrd Diagnostics Library
// Description: Parsing and classification of provisioning-tool logs.
// Purpose: Report operation failures with the diagnostics that caused them.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Provisioning tools emit one JSON object per log line. This crate parses
//! those lines and, for a given operation, folds the error-level lines into a
//! single [`OperationFailed`] error. Callers test an arbitrary error chain
//! with [`is_apply_failed`] and its siblings.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod failure;
pub mod logs;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use failure::Operation;
pub use failure::OperationFailed;
pub use failure::apply_failed;
pub use failure::classify;
pub use failure::destroy_failed;
pub use failure::is_apply_failed;
pub use failure::is_destroy_failed;
pub use failure::is_plan_failed;
pub use failure::is_refresh_failed;
pub use failure::plan_failed;
pub use failure::refresh_failed;
pub use logs::LogDiagnostic;
pub use logs::LogLine;
pub use logs::LogParseError;
pub use logs::LogRange;
pub use logs::parse_logs;
