// crates/tfcrd-types/src/error.rs
// ============================================================================
// Module: Build Errors
// Description: Error taxonomy for the schema-to-type builder.
// Purpose: Carry a full path trail from the failing field to the root.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! Every build error is fatal to the current build. Errors raised deep in the
//! attribute tree are wrapped with [`BuildError::Context`] at each recursion
//! level they pass through, so the outermost message names the whole path.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::comments::CommentError;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while building types from a resource schema.
///
/// # Invariants
/// - Variant meanings are stable for automation and tests.
#[derive(Debug, Error)]
pub enum BuildError {
    /// A collection element is a non-primitive kind tag.
    #[error("element type of {0} is basic but not one of known basic types")]
    UnsupportedElement(String),
    /// The attribute declares the invalid kind.
    #[error("invalid schema type {0}")]
    InvalidKind(String),
    /// A sensitive attribute resolved to a type that is not string-like.
    #[error(
        "got type \"{actual}\" for field \"{field}\", only types \"string\" and \"*string\" \
         supported as sensitive"
    )]
    InvalidSensitiveType {
        /// Rendered value type of the attribute.
        actual: String,
        /// Generated field name.
        field: String,
    },
    /// No free type name remained after all allocation strategies.
    #[error("could not generate a unique name for {0}")]
    NameExhausted(String),
    /// Type name allocation was attempted without any ancestor names.
    #[error("cannot generate a type name from an empty name chain")]
    EmptyNameChain,
    /// An attribute description carried a malformed directive.
    #[error("cannot build comment for description: {description}: {source}")]
    Comment {
        /// Raw attribute description.
        description: String,
        /// Directive parse failure.
        #[source]
        source: CommentError,
    },
    /// Nested resources or element schemas exceed the supported depth.
    #[error("schema nesting exceeds the depth limit of {0}")]
    DepthLimit(usize),
    /// An inner error wrapped with location context.
    #[error("{context}: {source}")]
    Context {
        /// Context describing where the inner error happened.
        context: String,
        /// Wrapped error.
        #[source]
        source: Box<Self>,
    },
}

impl BuildError {
    /// Wraps the error with a context message.
    #[must_use]
    pub fn context(self, context: impl Into<String>) -> Self {
        Self::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Returns the innermost error of a context chain.
    #[must_use]
    pub fn root_cause(&self) -> &Self {
        let mut current = self;
        while let Self::Context {
            source, ..
        } = current
        {
            current = source;
        }
        current
    }
}
