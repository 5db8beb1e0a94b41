// crates/tfcrd-types/src/sensitive.rs
// ============================================================================
// Module: Sensitive Fields
// Description: Rewrites sensitive attributes into secret references.
// Purpose: Keep secret values out of generated types.
// Dependencies: tfcrd-schema
// ============================================================================

//! ## Overview
//! A sensitive parameter field `Password` becomes `PasswordSecretRef` of type
//! `v1.SecretKeySelector` (pointer-wrapped when optional) and loses its
//! source-format tag. A sensitive observation field is dropped; its value is
//! surfaced out of band. Both cases map the source path to a target path
//! under `spec.forProvider.` or `status.atProvider.` respectively.

// ============================================================================
// SECTION: Imports
// ============================================================================

use tfcrd_schema::FieldName;
use tfcrd_schema::TargetPath;

use crate::error::BuildError;
use crate::model::ValueType;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Suffix appended to rewritten parameter field names.
pub const SECRET_REF_SUFFIX: &str = "SecretRef";
/// Target path prefix for sensitive parameters.
pub const FOR_PROVIDER_PREFIX: &str = "spec.forProvider.";
/// Target path prefix for sensitive observations.
pub const AT_PROVIDER_PREFIX: &str = "status.atProvider.";
/// Source-format tag of fields that are not serialized on that axis.
pub const SUPPRESSED_TAG: &str = "-";

// ============================================================================
// SECTION: Rewriting
// ============================================================================

/// Replacement for a sensitive parameter field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretField {
    /// Suffixed field name.
    pub name: String,
    /// Secret selector type.
    pub value_type: ValueType,
    /// Target-format tag.
    pub json_tag: String,
}

/// Rewrites a sensitive parameter field into a secret reference.
///
/// # Errors
/// Returns [`BuildError::InvalidSensitiveType`] unless the field is `string`
/// or `*string`.
pub fn rewrite_parameter(
    field_name: &str,
    value_type: &ValueType,
    optional: bool,
) -> Result<SecretField, BuildError> {
    if !value_type.is_string_like() {
        return Err(BuildError::InvalidSensitiveType {
            actual: value_type.to_string(),
            field: field_name.to_string(),
        });
    }
    let name = format!("{field_name}{SECRET_REF_SUFFIX}");
    let mut json_tag = FieldName::from_camel(&name).lower_camel_computed;
    let value_type = if optional {
        json_tag.push_str(",omitempty");
        ValueType::SecretKeySelector.pointer()
    } else {
        ValueType::SecretKeySelector
    };
    Ok(SecretField {
        name,
        value_type,
        json_tag,
    })
}

/// Returns the registry target of a sensitive parameter.
#[must_use]
pub fn parameter_target(target: &TargetPath) -> String {
    format!("{FOR_PROVIDER_PREFIX}{}{SECRET_REF_SUFFIX}", target.to_wildcard_string())
}

/// Returns the registry target of a sensitive observation.
#[must_use]
pub fn observation_target(target: &TargetPath) -> String {
    format!("{AT_PROVIDER_PREFIX}{}", target.to_wildcard_string())
}
