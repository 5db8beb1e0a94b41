// crates/tfcrd-schema/src/names.rs
// ============================================================================
// Module: Field Name Forms
// Description: Snake, camel, and lower-camel forms of attribute names.
// Purpose: Derive the output field names and tag names of an attribute.
// Dependencies: convert_case
// ============================================================================

//! ## Overview
//! Schema attributes are named in snake case. Generated types use upper camel
//! field names (with well-known acronyms upper-cased), target paths use lower
//! camel names, and serialization tags use an acronym-free lower camel form.

// ============================================================================
// SECTION: Imports
// ============================================================================

use convert_case::Case;
use convert_case::Casing;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Lower-case words rendered as upper-case acronyms in camel forms.
const ACRONYMS: &[(&str, &str)] = &[
    ("acl", "ACL"),
    ("api", "API"),
    ("arn", "ARN"),
    ("cidr", "CIDR"),
    ("dns", "DNS"),
    ("http", "HTTP"),
    ("https", "HTTPS"),
    ("id", "ID"),
    ("ip", "IP"),
    ("json", "JSON"),
    ("kms", "KMS"),
    ("sql", "SQL"),
    ("ssl", "SSL"),
    ("tls", "TLS"),
    ("ttl", "TTL"),
    ("uri", "URI"),
    ("url", "URL"),
];

// ============================================================================
// SECTION: Field Names
// ============================================================================

/// Name forms of a single attribute.
///
/// # Invariants
/// - `snake` is the source-format name and is never rewritten.
/// - `lower_camel_computed` never contains upper-case acronym runs.
///
/// # Examples
/// ```
/// use tfcrd_schema::FieldName;
///
/// let name = FieldName::from_snake("vpc_id");
/// assert_eq!(name.camel, "VpcID");
/// assert_eq!(name.lower_camel, "vpcID");
/// assert_eq!(name.lower_camel_computed, "vpcId");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldName {
    /// Source-format name, e.g. `lifecycle_rule`.
    pub snake: String,
    /// Upper camel name used for fields and type names, e.g. `LifecycleRule`.
    pub camel: String,
    /// Lower camel name used in target paths, e.g. `lifecycleRule`.
    pub lower_camel: String,
    /// Acronym-free lower camel name used in serialization tags.
    pub lower_camel_computed: String,
}

impl FieldName {
    /// Derives all name forms from a snake-case attribute name.
    #[must_use]
    pub fn from_snake(snake: &str) -> Self {
        let mut camel = String::new();
        let mut lower_camel = String::new();
        for (index, word) in snake.split('_').filter(|word| !word.is_empty()).enumerate() {
            let lower = word.to_lowercase();
            let computed = acronym(&lower)
                .map_or_else(|| lower.from_case(Case::Snake).to_case(Case::Pascal), str::to_string);
            camel.push_str(&computed);
            if index == 0 {
                lower_camel.push_str(&lower);
            } else {
                lower_camel.push_str(&computed);
            }
        }
        Self {
            snake: snake.to_string(),
            camel,
            lower_camel,
            lower_camel_computed: snake.from_case(Case::Snake).to_case(Case::Camel),
        }
    }

    /// Derives name forms from an upper camel name, keeping it verbatim.
    ///
    /// Used for names synthesized by suffixing, such as `PasswordSecretRef`.
    #[must_use]
    pub fn from_camel(camel: &str) -> Self {
        let snake = camel.from_case(Case::Pascal).to_case(Case::Snake);
        let mut name = Self::from_snake(&snake);
        name.camel = camel.to_string();
        name
    }
}

/// Returns the acronym form of a lower-case word, if it is a known acronym.
fn acronym(word: &str) -> Option<&'static str> {
    ACRONYMS.iter().find(|(lower, _)| *lower == word).map(|(_, upper)| *upper)
}
