// crates/tfcrd-diagnostics/src/logs.rs
// ============================================================================
// Module: Log Lines
// Description: Serde model of JSON-formatted log lines.
// Purpose: Parse the fields relevant to failure classification.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Only `@level`, `@message`, and the `diagnostic` block are read; all other
//! keys are ignored. Blank lines are skipped. Any other line that is not a
//! JSON object fails the whole parse.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Level and severity label of errors.
pub const LEVEL_ERROR: &str = "error";

// ============================================================================
// SECTION: Types
// ============================================================================

/// Relevant fields of one log line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogLine {
    /// Log level, e.g. `error`.
    #[serde(rename = "@level", default)]
    pub level: String,
    /// Human-readable message.
    #[serde(rename = "@message", default)]
    pub message: String,
    /// Structured diagnostic, when present.
    #[serde(default)]
    pub diagnostic: Option<LogDiagnostic>,
}

/// Structured diagnostic of a log line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogDiagnostic {
    /// Diagnostic severity.
    #[serde(default)]
    pub severity: String,
    /// One-line summary.
    #[serde(default)]
    pub summary: String,
    /// Detail text.
    #[serde(default)]
    pub detail: String,
    /// Source range, when known.
    #[serde(default)]
    pub range: Option<LogRange>,
}

/// Source range of a diagnostic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRange {
    /// File the diagnostic refers to.
    #[serde(default)]
    pub filename: String,
}

impl LogLine {
    /// Returns the message this line contributes to a failure, if any.
    ///
    /// Non-error lines contribute nothing. Error diagnostics with a summary
    /// contribute `summary: detail` and the file name when known; other error
    /// lines contribute their message.
    #[must_use]
    pub fn error_message(&self) -> Option<String> {
        if self.level != LEVEL_ERROR {
            return None;
        }
        let Some(diagnostic) = &self.diagnostic else {
            return Some(self.message.clone());
        };
        if diagnostic.severity != LEVEL_ERROR || diagnostic.summary.is_empty() {
            return Some(self.message.clone());
        }
        let mut message = format!("{}: {}", diagnostic.summary, diagnostic.detail);
        if let Some(range) = &diagnostic.range
            && !range.filename.is_empty()
        {
            message.push_str(": File name: ");
            message.push_str(&range.filename);
        }
        Some(message)
    }
}

// ============================================================================
// SECTION: Parsing
// ============================================================================

/// Log parsing failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct LogParseError(String);

/// Parses newline-separated JSON log lines.
///
/// # Errors
/// Returns [`LogParseError`] for the first non-blank line that is not a log
/// object.
pub fn parse_logs(text: &str) -> Result<Vec<LogLine>, LogParseError> {
    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| serde_json::from_str(line).map_err(|err| LogParseError(err.to_string())))
        .collect()
}
