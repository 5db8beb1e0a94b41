// crates/tfcrd-config/src/config.rs
// ============================================================================
// Module: Resource Configuration
// Description: Configuration loading and validation for resource generation.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: tfcrd-schema, serde, toml
// ============================================================================

//! ## Overview
//! A [`ResourceConfig`] is loaded from a TOML file with strict size and path
//! limits. The type builder treats it as a mutable collaborator: it reads the
//! ignore list and reference registry, and writes canonical ignore entries and
//! sensitive-field path mappings back into it.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;
use tfcrd_schema::CanonicalPath;
use tfcrd_schema::SourcePath;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "tfcrd.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "TFCRD_CONFIG";
/// Maximum configuration file size in bytes.
pub const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Maximum length of the generated kind name.
pub(crate) const MAX_KIND_LENGTH: usize = 128;
/// Maximum number of late-initialization ignore entries.
pub(crate) const MAX_IGNORED_FIELDS: usize = 512;
/// Maximum number of cross-resource references.
pub(crate) const MAX_REFERENCES: usize = 512;

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Per-resource generation configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResourceConfig {
    /// Provider resource name, e.g. `aws_s3_bucket`.
    pub name: String,
    /// Generated kind name, e.g. `Bucket`; seeds every type name.
    pub kind: String,
    /// Late-initialization settings.
    #[serde(default)]
    pub late_initializer: LateInitializer,
    /// Sensitive-field path registry, populated by the builder.
    #[serde(default)]
    pub sensitive: Sensitive,
    /// Cross-resource references keyed by source path.
    #[serde(default)]
    pub references: BTreeMap<SourcePath, Reference>,
}

impl ResourceConfig {
    /// Creates a configuration with empty registries.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            ..Self::default()
        }
    }

    /// Adds a cross-resource reference, returning the updated configuration.
    #[must_use]
    pub fn with_reference(mut self, path: SourcePath, reference: Reference) -> Self {
        self.references.insert(path, reference);
        self
    }

    /// Adds a late-initialization ignore entry in source form.
    #[must_use]
    pub fn with_ignored_field(mut self, path: SourcePath) -> Self {
        self.late_initializer.ignored_fields.push(path);
        self
    }

    /// Loads configuration from disk using the default resolution rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path)?;
        validate_path(&resolved)?;
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        Self::from_toml_str(content)
    }

    /// Parses and validates configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing or validation fails.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        if content.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::Invalid("name must be non-empty".to_string()));
        }
        validate_kind(&self.kind)?;
        self.late_initializer.validate()?;
        if self.references.len() > MAX_REFERENCES {
            return Err(ConfigError::Invalid(format!(
                "references exceed limit of {MAX_REFERENCES}"
            )));
        }
        for (path, reference) in &self.references {
            reference.validate(path)?;
        }
        Ok(())
    }

    /// Returns the reference configured for a source path, ignoring wildcards.
    #[must_use]
    pub fn reference_for(&self, path: &SourcePath) -> Option<&Reference> {
        self.references.iter().find_map(|(key, reference)| key.matches(path).then_some(reference))
    }
}

/// Late-initialization settings.
///
/// # Invariants
/// - `ignored_fields` are expressed in source form; matches ignore wildcards.
/// - `ignored_canonical_fields` never contain wildcards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LateInitializer {
    /// Fields never backfilled from observed state, in source form.
    #[serde(default)]
    pub ignored_fields: Vec<SourcePath>,
    /// The same fields in canonical form; extended by the builder.
    #[serde(default)]
    pub ignored_canonical_fields: BTreeSet<CanonicalPath>,
}

impl LateInitializer {
    /// Returns true when a source path is on the ignore list.
    #[must_use]
    pub fn ignores_source(&self, path: &SourcePath) -> bool {
        self.ignored_fields.iter().any(|ignored| ignored.matches(path))
    }

    /// Returns true when a canonical path is on the ignore list.
    #[must_use]
    pub fn ignores_canonical(&self, path: &CanonicalPath) -> bool {
        self.ignored_canonical_fields.contains(path)
    }

    /// Registers a canonical ignore entry; returns false if already present.
    pub fn add_ignored_canonical(&mut self, path: CanonicalPath) -> bool {
        self.ignored_canonical_fields.insert(path)
    }

    /// Validates ignore-list limits.
    fn validate(&self) -> Result<(), ConfigError> {
        let total = self.ignored_fields.len() + self.ignored_canonical_fields.len();
        if total > MAX_IGNORED_FIELDS {
            return Err(ConfigError::Invalid(format!(
                "late_initializer entries exceed limit of {MAX_IGNORED_FIELDS}"
            )));
        }
        Ok(())
    }
}

/// Sensitive-field path registry.
///
/// Maps a source path (wildcards preserved) to the target path under which
/// the value is surfaced out of band.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Sensitive {
    /// Source path to target path mappings.
    #[serde(default)]
    pub field_paths: BTreeMap<String, String>,
}

impl Sensitive {
    /// Records a sensitive field mapping; a repeated source path is overwritten.
    pub fn add_field_path(&mut self, source: impl Into<String>, target: impl Into<String>) {
        self.field_paths.insert(source.into(), target.into());
    }

    /// Returns the target path registered for a source path.
    #[must_use]
    pub fn target_for(&self, source: &str) -> Option<&str> {
        self.field_paths.get(source).map(String::as_str)
    }

    /// Returns the number of registered mappings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.field_paths.len()
    }

    /// Returns true when no mappings are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.field_paths.is_empty()
    }
}

/// Cross-resource reference descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Reference {
    /// Referenced type, e.g. `Key` or `github.com/org/provider/apis/kms/v1.Key`.
    #[serde(rename = "type")]
    pub type_name: String,
    /// Optional extractor expression for the referenced value.
    #[serde(default)]
    pub extractor: Option<String>,
    /// Override for the generated reference field name.
    #[serde(default)]
    pub ref_field_name: Option<String>,
    /// Override for the generated selector field name.
    #[serde(default)]
    pub selector_field_name: Option<String>,
}

impl Reference {
    /// Creates a reference to the given type with default field names.
    #[must_use]
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            extractor: None,
            ref_field_name: None,
            selector_field_name: None,
        }
    }

    /// Validates the reference descriptor.
    fn validate(&self, path: &SourcePath) -> Result<(), ConfigError> {
        if self.type_name.trim().is_empty() {
            return Err(ConfigError::Invalid(format!("references.{path}.type must be non-empty")));
        }
        if let Some(name) = &self.ref_field_name
            && !is_upper_camel_identifier(name)
        {
            return Err(ConfigError::Invalid(format!(
                "references.{path}.ref_field_name must be an upper camel identifier"
            )));
        }
        if let Some(name) = &self.selector_field_name
            && !is_upper_camel_identifier(name)
        {
            return Err(ConfigError::Invalid(format!(
                "references.{path}.selector_field_name must be an upper camel identifier"
            )));
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading or validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from CLI or environment defaults.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Validates the resolved path against security limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates the generated kind name.
fn validate_kind(kind: &str) -> Result<(), ConfigError> {
    if kind.is_empty() {
        return Err(ConfigError::Invalid("kind must be non-empty".to_string()));
    }
    if kind.len() > MAX_KIND_LENGTH {
        return Err(ConfigError::Invalid("kind exceeds max length".to_string()));
    }
    if !is_upper_camel_identifier(kind) {
        return Err(ConfigError::Invalid(
            "kind must start with an upper-case letter and be alphanumeric".to_string(),
        ));
    }
    Ok(())
}

/// Returns true for ASCII identifiers starting with an upper-case letter.
fn is_upper_camel_identifier(value: &str) -> bool {
    let mut chars = value.chars();
    chars.next().is_some_and(|first| first.is_ascii_uppercase())
        && chars.all(|ch| ch.is_ascii_alphanumeric())
}
