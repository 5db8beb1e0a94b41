// crates/tfcrd-types/src/model.rs
// ============================================================================
// Module: Generated Type Model
// Description: Value types, generated fields, generated types, and comments.
// Purpose: Represent builder output independent of any rendering target.
// Dependencies: serde, tfcrd-schema
// ============================================================================

//! ## Overview
//! The builder output is a flat list of [`GeneratedType`] values, each with an
//! ordered list of [`GeneratedField`] values, plus a [`Comments`] map keyed by
//! `(type name, field name)`. [`ValueType`] renders in the conventional
//! notation used by generated sources: `*string`, `[]FooParameters`,
//! `map[string]string`, `v1.SecretKeySelector`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use serde::Serializer;
use serde::ser::SerializeMap;
use tfcrd_schema::ValueKind;

// ============================================================================
// SECTION: Value Types
// ============================================================================

/// Primitive scalar types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    /// Boolean.
    Bool,
    /// 64-bit float.
    Float64,
    /// 64-bit integer.
    Int64,
    /// String.
    String,
}

impl Primitive {
    /// Maps a scalar schema kind to its primitive; collections map to `None`.
    #[must_use]
    pub const fn from_kind(kind: ValueKind) -> Option<Self> {
        match kind {
            ValueKind::Bool => Some(Self::Bool),
            ValueKind::Float => Some(Self::Float64),
            ValueKind::Int => Some(Self::Int64),
            ValueKind::String => Some(Self::String),
            ValueKind::List | ValueKind::Set | ValueKind::Map | ValueKind::Invalid => None,
        }
    }

    /// Returns the rendered type name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Float64 => "float64",
            Self::Int64 => "int64",
            Self::String => "string",
        }
    }
}

/// Type of a generated field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueType {
    /// A primitive scalar.
    Primitive(Primitive),
    /// Optional (pointer-wrapped) value.
    Pointer(Box<Self>),
    /// A generated type, by name.
    Named(String),
    /// Ordered sequence.
    List(Box<Self>),
    /// Map with string keys.
    Map(Box<Self>),
    /// Externally defined reference to a key in a secret.
    SecretKeySelector,
    /// Externally defined reference to another resource by name.
    Reference,
    /// Externally defined label selector for another resource.
    Selector,
}

impl ValueType {
    /// Wraps the type in a pointer.
    #[must_use]
    pub fn pointer(self) -> Self {
        Self::Pointer(Box::new(self))
    }

    /// Wraps the type in a list.
    #[must_use]
    pub fn list(self) -> Self {
        Self::List(Box::new(self))
    }

    /// Wraps the type in a string-keyed map.
    #[must_use]
    pub fn map(self) -> Self {
        Self::Map(Box::new(self))
    }

    /// Returns true for `string` and `*string`.
    #[must_use]
    pub fn is_string_like(&self) -> bool {
        match self {
            Self::Primitive(Primitive::String) => true,
            Self::Pointer(inner) => matches!(inner.as_ref(), Self::Primitive(Primitive::String)),
            _ => false,
        }
    }

    /// Returns true for list types.
    #[must_use]
    pub const fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(primitive) => f.write_str(primitive.as_str()),
            Self::Pointer(inner) => write!(f, "*{inner}"),
            Self::Named(name) => f.write_str(name),
            Self::List(inner) => write!(f, "[]{inner}"),
            Self::Map(inner) => write!(f, "map[string]{inner}"),
            Self::SecretKeySelector => f.write_str("v1.SecretKeySelector"),
            Self::Reference => f.write_str("v1.Reference"),
            Self::Selector => f.write_str("v1.Selector"),
        }
    }
}

impl Serialize for ValueType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// ============================================================================
// SECTION: Fields and Types
// ============================================================================

/// Serialization tags of a generated field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldTags {
    /// Target-format tag, e.g. `vpcId,omitempty`.
    pub json: String,
    /// Source-format tag, e.g. `vpc_id,omitempty`, or `-` when suppressed.
    pub tf: String,
}

impl fmt::Display for FieldTags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "json:\"{}\" tf:\"{}\"", self.json, self.tf)
    }
}

/// A field of a generated type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedField {
    /// Output field name (upper camel).
    pub name: String,
    /// Field value type.
    #[serde(rename = "type")]
    pub value_type: ValueType,
    /// Serialization tags.
    pub tags: FieldTags,
}

/// A generated struct type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedType {
    /// Type name, unique within one build.
    pub name: String,
    /// Fields in generation order.
    pub fields: Vec<GeneratedField>,
}

impl GeneratedType {
    /// Returns the named field.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&GeneratedField> {
        self.fields.iter().find(|field| field.name == name)
    }
}

/// Index of a generated type within [`Generated::types`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TypeId(usize);

impl TypeId {
    /// Creates a handle for the given index.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the index into the generated type list.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

// ============================================================================
// SECTION: Comments
// ============================================================================

/// Rendered field documentation keyed by `(type name, field name)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Comments {
    /// Comment text per field.
    entries: BTreeMap<(String, String), String>,
}

impl Comments {
    /// Records a field comment, replacing any previous entry.
    pub fn add(&mut self, type_name: &str, field_name: &str, text: String) {
        self.entries.insert((type_name.to_string(), field_name.to_string()), text);
    }

    /// Returns the comment of a field.
    #[must_use]
    pub fn get(&self, type_name: &str, field_name: &str) -> Option<&str> {
        self.entries.get(&(type_name.to_string(), field_name.to_string())).map(String::as_str)
    }

    /// Returns the number of commented fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when no comments are recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates `(type name, field name, text)` in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, &str)> {
        self.entries.iter().map(|((type_name, field_name), text)| {
            (type_name.as_str(), field_name.as_str(), text.as_str())
        })
    }
}

impl Serialize for Comments {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (type_name, field_name, text) in self.iter() {
            map.serialize_entry(&format!("{type_name}.{field_name}"), text)?;
        }
        map.end()
    }
}

// ============================================================================
// SECTION: Build Output
// ============================================================================

/// Output of one build.
///
/// # Invariants
/// - `for_provider` and `at_provider` index into `types`.
/// - Type names in `types` are unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Generated {
    /// Every generated type, innermost levels first.
    pub types: Vec<GeneratedType>,
    /// Field documentation.
    pub comments: Comments,
    /// Root parameters type.
    pub for_provider: TypeId,
    /// Root observation type.
    pub at_provider: TypeId,
}

impl Generated {
    /// Returns the type behind a handle.
    #[must_use]
    pub fn get(&self, id: TypeId) -> Option<&GeneratedType> {
        self.types.get(id.index())
    }

    /// Returns the generated type with the given name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&GeneratedType> {
        self.types.iter().find(|generated| generated.name == name)
    }

    /// Returns the root parameters type.
    #[must_use]
    pub fn for_provider_type(&self) -> Option<&GeneratedType> {
        self.get(self.for_provider)
    }

    /// Returns the root observation type.
    #[must_use]
    pub fn at_provider_type(&self) -> Option<&GeneratedType> {
        self.get(self.at_provider)
    }
}
