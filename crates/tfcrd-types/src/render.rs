// crates/tfcrd-types/src/render.rs
// ============================================================================
// Module: Type Rendering
// Description: Deterministic text rendering of generated types.
// Purpose: Turn build output into reviewable struct declarations.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Renders every generated type, in build order, as a struct declaration with
//! its field comments and `json:"…" tf:"…"` tags. Output depends only on the
//! build result, so identical builds render byte-identical text.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt::Write;

use crate::model::Comments;
use crate::model::Generated;
use crate::model::GeneratedType;

// ============================================================================
// SECTION: Rendering
// ============================================================================

/// Renders all generated types as struct declarations.
#[must_use]
pub fn render_types(generated: &Generated) -> String {
    let mut out = String::new();
    for (index, generated_type) in generated.types.iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        render_type(&mut out, generated_type, &generated.comments);
    }
    out
}

/// Renders one struct declaration.
fn render_type(out: &mut String, generated_type: &GeneratedType, comments: &Comments) {
    let _ = writeln!(out, "type {} struct {{", generated_type.name);
    for field in &generated_type.fields {
        if let Some(text) = comments.get(&generated_type.name, &field.name) {
            for line in text.lines() {
                if line.is_empty() {
                    out.push_str("\t//\n");
                } else {
                    let _ = writeln!(out, "\t// {line}");
                }
            }
        }
        let _ = writeln!(out, "\t{} {} `{}`", field.name, field.value_type, field.tags);
    }
    out.push_str("}\n");
}
