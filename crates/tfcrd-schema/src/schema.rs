// crates/tfcrd-schema/src/schema.rs
// ============================================================================
// Module: Attribute Schema Model
// Description: Attribute and resource schema nodes for provisioning resources.
// Purpose: Represent the only input structure of the type builder.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! An [`AttributeSchema`] describes one configurable or computed attribute. A
//! [`ResourceSchema`] maps source-format attribute names to attribute schemas
//! and is processed in lexicographic key order.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Value Kinds
// ============================================================================

/// Attribute value kind declared by the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    /// Boolean scalar.
    Bool,
    /// Floating point scalar.
    Float,
    /// Integer scalar.
    Int,
    /// String scalar.
    String,
    /// Ordered collection.
    List,
    /// Unordered collection.
    Set,
    /// String-keyed collection.
    Map,
    /// Invalid or unset kind; always rejected by the builder.
    Invalid,
}

impl ValueKind {
    /// Returns the lower-case label used in schema documents.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Float => "float",
            Self::Int => "int",
            Self::String => "string",
            Self::List => "list",
            Self::Set => "set",
            Self::Map => "map",
            Self::Invalid => "invalid",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Elements
// ============================================================================

/// Element shape of a list, set, or map attribute.
///
/// # Invariants
/// - `Primitive` is only meaningful for bool, float, int, and string kinds; any
///   other kind is an unsupported element shape.
/// - `Unset` is the default when a document omits the element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Element {
    /// No element declared; treated as a string element.
    #[default]
    Unset,
    /// Homogeneous collection of scalars identified by kind tag.
    Primitive(ValueKind),
    /// Homogeneous collection described by a nested attribute schema.
    Schema(Box<AttributeSchema>),
    /// Homogeneous collection of objects described by a nested resource.
    Resource(ResourceSchema),
}

impl Element {
    /// Returns true when no element shape was declared.
    #[must_use]
    pub const fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }
}

// ============================================================================
// SECTION: Attribute Schema
// ============================================================================

/// Schema node for a single attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeSchema {
    /// Declared value kind.
    #[serde(rename = "type")]
    pub kind: ValueKind,
    /// True when the caller may omit the attribute.
    #[serde(default)]
    pub optional: bool,
    /// True when the provider computes the attribute.
    #[serde(default)]
    pub computed: bool,
    /// True when the value must not be stored inline.
    #[serde(default)]
    pub sensitive: bool,
    /// Free-form description, possibly carrying field directives.
    #[serde(default)]
    pub description: String,
    /// Element shape for collection kinds.
    #[serde(default, rename = "elem", skip_serializing_if = "Element::is_unset")]
    pub element: Element,
}

impl AttributeSchema {
    /// Creates a required, non-computed attribute of the given kind.
    #[must_use]
    pub const fn new(kind: ValueKind) -> Self {
        Self {
            kind,
            optional: false,
            computed: false,
            sensitive: false,
            description: String::new(),
            element: Element::Unset,
        }
    }

    /// Marks the attribute optional.
    #[must_use]
    pub const fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Marks the attribute computed.
    #[must_use]
    pub const fn computed(mut self) -> Self {
        self.computed = true;
        self
    }

    /// Marks the attribute sensitive.
    #[must_use]
    pub const fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    /// Sets the attribute description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the collection element shape.
    #[must_use]
    pub fn with_element(mut self, element: Element) -> Self {
        self.element = element;
        self
    }

    /// Returns true when the attribute is computed and cannot be set.
    ///
    /// Optional and computed attributes carry a server-side default the caller
    /// may override, so they are not observation-only.
    #[must_use]
    pub const fn is_observation(&self) -> bool {
        self.computed && !self.optional
    }
}

// ============================================================================
// SECTION: Resource Schema
// ============================================================================

/// Schema of a resource level: attribute name to attribute schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceSchema {
    /// Attributes keyed by source-format (snake case) name.
    #[serde(default)]
    pub attributes: BTreeMap<String, AttributeSchema>,
}

impl ResourceSchema {
    /// Creates an empty resource schema.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            attributes: BTreeMap::new(),
        }
    }

    /// Adds an attribute, returning the updated schema.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, attribute: AttributeSchema) -> Self {
        self.attributes.insert(name.into(), attribute);
        self
    }

    /// Inserts or replaces an attribute.
    pub fn insert(&mut self, name: impl Into<String>, attribute: AttributeSchema) {
        self.attributes.insert(name.into(), attribute);
    }

    /// Returns attribute names in sorted order.
    pub fn sorted_keys(&self) -> impl Iterator<Item = &str> {
        self.attributes.keys().map(String::as_str)
    }

    /// Returns `(name, attribute)` pairs in sorted name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeSchema)> {
        self.attributes.iter().map(|(name, attribute)| (name.as_str(), attribute))
    }

    /// Returns the attribute with the given name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&AttributeSchema> {
        self.attributes.get(name)
    }

    /// Returns the number of attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Returns true when the resource declares no attributes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}
