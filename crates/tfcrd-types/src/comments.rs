// crates/tfcrd-types/src/comments.rs
// ============================================================================
// Module: Field Comments
// Description: Documentation comments and embedded field directives.
// Purpose: Parse tag/required overrides and render field documentation.
// Dependencies: tfcrd-config, thiserror
// ============================================================================

//! ## Overview
//! Attribute descriptions become field documentation. A description line of
//! the form `+tfcrd:field:<Key>=<value>` is a directive rather than text:
//! - `TFTag=<tag>` replaces the source-format tag verbatim.
//! - `JSONTag=<tag>` replaces the target-format tag verbatim.
//! - `Required=<true|false>` overrides the schema-derived required flag.
//!
//! Unknown keys, a missing `=`, or a non-boolean `Required` value are errors.
//! Other lines, including unrelated `+markers`, are kept as text.

// ============================================================================
// SECTION: Imports
// ============================================================================

use tfcrd_config::Reference;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Prefix that marks a description line as a field directive.
pub const DIRECTIVE_PREFIX: &str = "+tfcrd:field:";
/// Marker rendered for required configuration fields.
const REQUIRED_MARKER: &str = "+kubebuilder:validation:Required";
/// Marker rendered for optional configuration fields.
const OPTIONAL_MARKER: &str = "+kubebuilder:validation:Optional";
/// Marker prefix rendered for reference-bearing fields.
const REFERENCE_MARKER: &str = "+crossplane:generate:reference:";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Directive parse failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommentError {
    /// Directive line without `=`.
    #[error("directive {0} has no value")]
    MissingValue(String),
    /// Directive key is not recognized.
    #[error("unknown directive key {0}")]
    UnknownKey(String),
    /// `Required` directive value is not a boolean.
    #[error("directive Required expects true or false, got {0}")]
    InvalidRequired(String),
}

// ============================================================================
// SECTION: Comment
// ============================================================================

/// Documentation and directives attached to one generated field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Comment {
    /// Documentation lines with directives removed.
    lines: Vec<String>,
    /// Source-format tag override.
    pub tf_tag: Option<String>,
    /// Target-format tag override.
    pub json_tag: Option<String>,
    /// Required flag override.
    pub required_override: Option<bool>,
    /// Required flag; set only for configuration fields.
    pub required: Option<bool>,
    /// Cross-resource reference carried by the field.
    pub reference: Option<Reference>,
}

impl Comment {
    /// Parses an attribute description.
    ///
    /// # Errors
    /// Returns [`CommentError`] for malformed directive lines.
    pub fn parse(description: &str) -> Result<Self, CommentError> {
        let mut comment = Self::default();
        for line in description.lines() {
            let Some(directive) = line.trim().strip_prefix(DIRECTIVE_PREFIX) else {
                comment.lines.push(line.trim_end().to_string());
                continue;
            };
            let Some((key, value)) = directive.split_once('=') else {
                return Err(CommentError::MissingValue(directive.to_string()));
            };
            match key.trim() {
                "TFTag" => comment.tf_tag = Some(value.trim().to_string()),
                "JSONTag" => comment.json_tag = Some(value.trim().to_string()),
                "Required" => {
                    let required = value
                        .trim()
                        .parse::<bool>()
                        .map_err(|_| CommentError::InvalidRequired(value.trim().to_string()))?;
                    comment.required_override = Some(required);
                }
                other => return Err(CommentError::UnknownKey(other.to_string())),
            }
        }
        while comment.lines.last().is_some_and(String::is_empty) {
            comment.lines.pop();
        }
        let leading = comment.lines.iter().take_while(|line| line.is_empty()).count();
        comment.lines.drain(..leading);
        Ok(comment)
    }

    /// Creates a text-free comment with the given required flag.
    #[must_use]
    pub fn marker_only(required: bool) -> Self {
        Self {
            required: Some(required),
            ..Self::default()
        }
    }

    /// Returns the documentation lines.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Renders documentation lines followed by generated markers.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out: Vec<String> = self.lines.clone();
        match self.required {
            Some(true) => out.push(REQUIRED_MARKER.to_string()),
            Some(false) => out.push(OPTIONAL_MARKER.to_string()),
            None => {}
        }
        if let Some(reference) = &self.reference {
            out.push(format!("{REFERENCE_MARKER}type={}", reference.type_name));
            if let Some(extractor) = &reference.extractor {
                out.push(format!("{REFERENCE_MARKER}extractor={extractor}"));
            }
        }
        out.join("\n")
    }
}

#[cfg(test)]
mod tests;
