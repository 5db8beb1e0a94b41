// crates/tfcrd-types/src/symbols.rs
// ============================================================================
// Module: Symbol Table
// Description: Registry of type names used in one build.
// Purpose: Allocate unique, readable type names from ancestor chains.
// Dependencies: std
// ============================================================================

//! ## Overview
//! [`SymbolTable::allocate`] starts from `<innermost name><suffix>`. While the
//! candidate is occupied it prepends the next ancestor, innermost first. If
//! the whole chain is exhausted it tries `<candidate>_2` through
//! `<candidate>_9`, then fails. Allocation does not insert; the builder
//! inserts both names of a resource level before recursing into its fields.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use crate::error::BuildError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// First numeric suffix tried after the ancestor chain is exhausted.
const FIRST_NUMERIC_SUFFIX: usize = 2;
/// Last numeric suffix tried before allocation fails.
const LAST_NUMERIC_SUFFIX: usize = 9;

// ============================================================================
// SECTION: Symbol Table
// ============================================================================

/// Set of occupied type names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolTable {
    /// Occupied names.
    names: BTreeSet<String>,
}

impl SymbolTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a table with names already occupied by other declarations.
    #[must_use]
    pub fn with_reserved<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns true when the name is occupied.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Marks a name as occupied; returns false if it already was.
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        self.names.insert(name.into())
    }

    /// Returns the number of occupied names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true when no names are occupied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Allocates a free name for `suffix` from an ancestor chain (outermost first).
    ///
    /// # Errors
    /// Returns [`BuildError::EmptyNameChain`] for an empty chain and
    /// [`BuildError::NameExhausted`] when every candidate is occupied.
    pub fn allocate(&self, suffix: &str, names: &[String]) -> Result<String, BuildError> {
        let Some((last, ancestors)) = names.split_last() else {
            return Err(BuildError::EmptyNameChain);
        };
        let mut candidate = format!("{last}{suffix}");
        for ancestor in ancestors.iter().rev() {
            if !self.contains(&candidate) {
                return Ok(candidate);
            }
            candidate = format!("{ancestor}{candidate}");
        }
        if !self.contains(&candidate) {
            return Ok(candidate);
        }
        (FIRST_NUMERIC_SUFFIX ..= LAST_NUMERIC_SUFFIX)
            .map(|index| format!("{candidate}_{index}"))
            .find(|numbered| !self.contains(numbered))
            .ok_or(BuildError::NameExhausted(candidate))
    }
}
