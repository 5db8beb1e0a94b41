// crates/tfcrd-schema/src/path.rs
// ============================================================================
// Module: Field Paths
// Description: Typed field paths in source, target, and canonical conventions.
// Purpose: Track an attribute's location across the three naming conventions.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! Every attribute visited by the type builder carries three synchronized
//! paths from the resource root:
//! - [`SourcePath`]: schema attribute names, e.g. `lifecycle_rule[*].days`.
//! - [`TargetPath`]: output field names, e.g. `lifecycleRule[*].days`.
//! - [`CanonicalPath`]: camel-cased ancestor names, e.g. `LifecycleRule.Days`.
//!
//! Collection levels add a wildcard segment to source and target paths but
//! never to canonical paths. Paths render in two flavors: wildcard-collapsing
//! (`a.b`) and wildcard-preserving (`a[*].b`).

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::names::FieldName;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Wildcard segment label used in rendered and parsed paths.
pub const WILDCARD: &str = "*";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while parsing dotted path strings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    /// The path string was empty.
    #[error("path must not be empty")]
    Empty,
    /// The path contained an empty segment.
    #[error("path {0:?} contains an empty segment")]
    EmptySegment(String),
    /// The path contained a malformed bracket segment.
    #[error("path {0:?} contains a malformed bracket segment")]
    MalformedBracket(String),
    /// A canonical path contained a wildcard.
    #[error("canonical path {0:?} must not contain wildcards")]
    WildcardInCanonical(String),
}

// ============================================================================
// SECTION: Segments
// ============================================================================

/// A single path segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Segment {
    /// A named field.
    Field(String),
    /// Any element of a collection.
    Wildcard,
}

/// An ordered list of path segments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldPath {
    /// Segments from the root outward.
    segments: Vec<Segment>,
}

impl FieldPath {
    /// Creates an empty (root) path.
    #[must_use]
    pub const fn root() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// Returns a new path with a field segment appended.
    #[must_use]
    pub fn child(&self, name: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(Segment::Field(name.to_string()));
        Self {
            segments,
        }
    }

    /// Returns a new path with a wildcard segment appended.
    #[must_use]
    pub fn wildcard(&self) -> Self {
        let mut segments = self.segments.clone();
        segments.push(Segment::Wildcard);
        Self {
            segments,
        }
    }

    /// Returns the path segments.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Returns true for the root path.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the field names, skipping wildcards.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Field(name) => Some(name.as_str()),
            Segment::Wildcard => None,
        })
    }

    /// Returns true when both paths name the same fields, ignoring wildcards.
    #[must_use]
    pub fn matches(&self, other: &Self) -> bool {
        self.fields().eq(other.fields())
    }

    /// Returns true when the path contains a wildcard segment.
    #[must_use]
    pub fn has_wildcard(&self) -> bool {
        self.segments.contains(&Segment::Wildcard)
    }

    /// Renders the path with wildcards collapsed, e.g. `a.b.c`.
    #[must_use]
    pub fn to_collapsed_string(&self) -> String {
        self.fields().collect::<Vec<_>>().join(".")
    }

    /// Renders the path with wildcards preserved, e.g. `a[*].b`.
    #[must_use]
    pub fn to_wildcard_string(&self) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Field(name) => {
                    if !out.is_empty() {
                        out.push('.');
                    }
                    out.push_str(name);
                }
                Segment::Wildcard => {
                    out.push('[');
                    out.push_str(WILDCARD);
                    out.push(']');
                }
            }
        }
        out
    }

    /// Parses a dotted path, accepting `[*]` and `.*` wildcard spellings.
    ///
    /// # Errors
    /// Returns [`PathError`] for empty paths, empty segments, or malformed
    /// bracket segments.
    pub fn parse(text: &str) -> Result<Self, PathError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(PathError::Empty);
        }
        let mut segments = Vec::new();
        for part in trimmed.split('.') {
            let (name, brackets) = part.find('[').map_or((part, ""), |index| part.split_at(index));
            if name.is_empty() {
                return Err(PathError::EmptySegment(text.to_string()));
            }
            if name == WILDCARD {
                segments.push(Segment::Wildcard);
            } else {
                segments.push(Segment::Field(name.to_string()));
            }
            let mut rest = brackets;
            while !rest.is_empty() {
                let Some(after) = rest.strip_prefix("[*]") else {
                    return Err(PathError::MalformedBracket(text.to_string()));
                };
                segments.push(Segment::Wildcard);
                rest = after;
            }
        }
        Ok(Self {
            segments,
        })
    }
}

// ============================================================================
// SECTION: Source Paths
// ============================================================================

/// Path expressed in schema attribute names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SourcePath(FieldPath);

impl SourcePath {
    /// Creates the root source path.
    #[must_use]
    pub const fn root() -> Self {
        Self(FieldPath::root())
    }

    /// Parses a dotted source path.
    ///
    /// # Errors
    /// Returns [`PathError`] when the path is malformed.
    pub fn parse(text: &str) -> Result<Self, PathError> {
        FieldPath::parse(text).map(Self)
    }

    /// Returns a new path with a field appended.
    #[must_use]
    pub fn child(&self, name: &str) -> Self {
        Self(self.0.child(name))
    }

    /// Returns a new path with a wildcard appended.
    #[must_use]
    pub fn wildcard(&self) -> Self {
        Self(self.0.wildcard())
    }

    /// Returns true when both paths name the same attributes, ignoring wildcards.
    #[must_use]
    pub fn matches(&self, other: &Self) -> bool {
        self.0.matches(&other.0)
    }

    /// Converts to the canonical convention: wildcards dropped, names camel-cased.
    #[must_use]
    pub fn to_canonical(&self) -> CanonicalPath {
        self.0
            .fields()
            .fold(CanonicalPath::root(), |path, name| path.child(&FieldName::from_snake(name).camel))
    }

    /// Renders with wildcards collapsed.
    #[must_use]
    pub fn to_collapsed_string(&self) -> String {
        self.0.to_collapsed_string()
    }

    /// Renders with wildcards preserved.
    #[must_use]
    pub fn to_wildcard_string(&self) -> String {
        self.0.to_wildcard_string()
    }
}

impl fmt::Display for SourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_wildcard_string())
    }
}

impl TryFrom<String> for SourcePath {
    type Error = PathError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<SourcePath> for String {
    fn from(value: SourcePath) -> Self {
        value.to_wildcard_string()
    }
}

// ============================================================================
// SECTION: Target Paths
// ============================================================================

/// Path expressed in generated field names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct TargetPath(FieldPath);

impl TargetPath {
    /// Creates the root target path.
    #[must_use]
    pub const fn root() -> Self {
        Self(FieldPath::root())
    }

    /// Returns a new path with a field appended.
    #[must_use]
    pub fn child(&self, name: &str) -> Self {
        Self(self.0.child(name))
    }

    /// Returns a new path with a wildcard appended.
    #[must_use]
    pub fn wildcard(&self) -> Self {
        Self(self.0.wildcard())
    }

    /// Renders with wildcards preserved.
    #[must_use]
    pub fn to_wildcard_string(&self) -> String {
        self.0.to_wildcard_string()
    }
}

impl fmt::Display for TargetPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_wildcard_string())
    }
}

// ============================================================================
// SECTION: Canonical Paths
// ============================================================================

/// Path expressed in camel-cased ancestor names; never holds wildcards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CanonicalPath(FieldPath);

impl CanonicalPath {
    /// Creates the root canonical path.
    #[must_use]
    pub const fn root() -> Self {
        Self(FieldPath::root())
    }

    /// Parses a dotted canonical path.
    ///
    /// # Errors
    /// Returns [`PathError`] when the path is malformed or holds a wildcard.
    pub fn parse(text: &str) -> Result<Self, PathError> {
        let path = FieldPath::parse(text)?;
        if path.has_wildcard() {
            return Err(PathError::WildcardInCanonical(text.to_string()));
        }
        Ok(Self(path))
    }

    /// Returns a new path with a field appended.
    #[must_use]
    pub fn child(&self, name: &str) -> Self {
        Self(self.0.child(name))
    }
}

impl fmt::Display for CanonicalPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_collapsed_string())
    }
}

impl TryFrom<String> for CanonicalPath {
    type Error = PathError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CanonicalPath> for String {
    fn from(value: CanonicalPath) -> Self {
        value.0.to_collapsed_string()
    }
}
