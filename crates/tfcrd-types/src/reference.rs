// crates/tfcrd-types/src/reference.rs
// ============================================================================
// Module: Reference Fields
// Description: Companion fields for cross-resource references.
// Purpose: Expand a referencing field into by-name and by-selector fields.
// Dependencies: tfcrd-config, tfcrd-schema
// ============================================================================

//! ## Overview
//! A parameter field `F` that refers to another resource gains two optional
//! companions: `FRef` (`*v1.Reference`, or `FRefs` of `[]v1.Reference` when
//! `F` is a list) and `FSelector` (`*v1.Selector`). Companions are never
//! serialized on the source axis.

// ============================================================================
// SECTION: Imports
// ============================================================================

use tfcrd_config::Reference;
use tfcrd_schema::FieldName;

use crate::model::FieldTags;
use crate::model::GeneratedField;
use crate::model::ValueType;
use crate::sensitive::SUPPRESSED_TAG;

// ============================================================================
// SECTION: Synthesis
// ============================================================================

/// Returns the companion fields of a referencing field, in declaration order.
#[must_use]
pub fn companion_fields(base: &GeneratedField, reference: &Reference) -> Vec<GeneratedField> {
    let is_list = base.value_type.is_list();
    let ref_name = reference.ref_field_name.clone().unwrap_or_else(|| {
        if is_list { format!("{}Refs", base.name) } else { format!("{}Ref", base.name) }
    });
    let selector_name =
        reference.selector_field_name.clone().unwrap_or_else(|| format!("{}Selector", base.name));
    let ref_type =
        if is_list { ValueType::Reference.list() } else { ValueType::Reference.pointer() };
    vec![
        companion(ref_name, ref_type),
        companion(selector_name, ValueType::Selector.pointer()),
    ]
}

/// Builds one optional companion field.
fn companion(name: String, value_type: ValueType) -> GeneratedField {
    let json = format!("{},omitempty", FieldName::from_camel(&name).lower_camel_computed);
    GeneratedField {
        name,
        value_type,
        tags: FieldTags {
            json,
            tf: SUPPRESSED_TAG.to_string(),
        },
    }
}
