// crates/tfcrd-schema/src/document.rs
// ============================================================================
// Module: Schema Documents
// Description: Bounded loading of provider schema documents.
// Purpose: Read resource schemas from JSON with hard size limits.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! A schema document maps provider resource names (for example
//! `aws_s3_bucket`) to their [`ResourceSchema`]. Documents are treated as
//! untrusted input: they are size-limited and must be UTF-8 JSON.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fs;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::schema::ResourceSchema;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum schema document size accepted by the loader.
pub const MAX_SCHEMA_BYTES: u64 = 4 * 1024 * 1024;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while loading schema documents.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// IO error while reading the document.
    #[error("schema io error: {0}")]
    Io(String),
    /// JSON parsing error.
    #[error("schema json error: {0}")]
    Json(String),
    /// Document violates a loader limit.
    #[error("invalid schema document: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Documents
// ============================================================================

/// Provider schema document keyed by resource name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaDocument {
    /// Resource schemas keyed by provider resource name.
    #[serde(default)]
    pub resources: BTreeMap<String, ResourceSchema>,
}

impl SchemaDocument {
    /// Loads a schema document from disk.
    ///
    /// # Errors
    /// Returns [`SchemaError`] when the file cannot be read, exceeds
    /// [`MAX_SCHEMA_BYTES`], or is not valid JSON.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let file = fs::File::open(path.as_ref()).map_err(|err| SchemaError::Io(err.to_string()))?;
        let metadata = file.metadata().map_err(|err| SchemaError::Io(err.to_string()))?;
        if metadata.len() > MAX_SCHEMA_BYTES {
            return Err(SchemaError::Invalid(format!(
                "schema document exceeds {MAX_SCHEMA_BYTES} bytes"
            )));
        }
        let mut bytes = Vec::new();
        let mut limited = file.take(MAX_SCHEMA_BYTES + 1);
        limited.read_to_end(&mut bytes).map_err(|err| SchemaError::Io(err.to_string()))?;
        Self::from_slice(&bytes)
    }

    /// Parses a schema document from bytes.
    ///
    /// # Errors
    /// Returns [`SchemaError`] when the input exceeds [`MAX_SCHEMA_BYTES`], is
    /// not UTF-8, or is not a valid schema document.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, SchemaError> {
        let size = u64::try_from(bytes.len()).map_err(|_| {
            SchemaError::Invalid("schema document size exceeds addressable memory".to_string())
        })?;
        if size > MAX_SCHEMA_BYTES {
            return Err(SchemaError::Invalid(format!(
                "schema document exceeds {MAX_SCHEMA_BYTES} bytes"
            )));
        }
        let text = std::str::from_utf8(bytes)
            .map_err(|_| SchemaError::Invalid("schema document must be utf-8".to_string()))?;
        serde_json::from_str(text).map_err(|err| SchemaError::Json(err.to_string()))
    }

    /// Returns the schema of the named resource.
    #[must_use]
    pub fn resource(&self, name: &str) -> Option<&ResourceSchema> {
        self.resources.get(name)
    }
}
