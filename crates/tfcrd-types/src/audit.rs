// crates/tfcrd-types/src/audit.rs
// ============================================================================
// Module: Build Audit Logging
// Description: Structured audit events emitted during type builds.
// Purpose: Record build decisions as JSON lines without a logging framework.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! The builder reports each decision that changes its output or writes back
//! into the resource configuration: generated types, sensitive rewrites,
//! canonical ignore-list registrations, attached references, and the final
//! outcome. Sinks decide where events go; the builder never fails because a
//! sink could not record.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Build audit event kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuildEvent {
    /// A parameters/observation type pair was generated.
    TypeGenerated,
    /// A sensitive field was rewritten or dropped.
    SensitiveField,
    /// A canonical ignore-list entry was registered.
    LateInitIgnore,
    /// Reference companion fields were attached.
    ReferenceAttached,
    /// The build finished successfully.
    BuildCompleted,
    /// The build failed.
    BuildFailed,
}

impl BuildEvent {
    /// Returns the stable event identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TypeGenerated => "type_generated",
            Self::SensitiveField => "sensitive_field",
            Self::LateInitIgnore => "late_init_ignore",
            Self::ReferenceAttached => "reference_attached",
            Self::BuildCompleted => "build_completed",
            Self::BuildFailed => "build_failed",
        }
    }
}

/// Build audit event payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Resource kind being built.
    pub kind: String,
    /// Generated type name when relevant.
    pub type_name: Option<String>,
    /// Source path when relevant.
    pub source_path: Option<String>,
    /// Target path when relevant.
    pub target_path: Option<String>,
    /// Field or type count when relevant.
    pub field_count: Option<usize>,
    /// Error message for failed builds.
    pub error: Option<String>,
}

/// Inputs required to construct a build audit event.
#[derive(Debug, Clone)]
pub struct BuildAuditEventParams {
    /// Event kind.
    pub event: BuildEvent,
    /// Resource kind being built.
    pub kind: String,
    /// Generated type name when relevant.
    pub type_name: Option<String>,
    /// Source path when relevant.
    pub source_path: Option<String>,
    /// Target path when relevant.
    pub target_path: Option<String>,
    /// Field or type count when relevant.
    pub field_count: Option<usize>,
    /// Error message for failed builds.
    pub error: Option<String>,
}

impl BuildAuditEventParams {
    /// Creates parameters for an event with no optional details.
    #[must_use]
    pub fn new(event: BuildEvent, kind: impl Into<String>) -> Self {
        Self {
            event,
            kind: kind.into(),
            type_name: None,
            source_path: None,
            target_path: None,
            field_count: None,
            error: None,
        }
    }
}

impl BuildAuditEvent {
    /// Creates a new audit event with a consistent timestamp.
    #[must_use]
    pub fn new(params: BuildAuditEventParams) -> Self {
        let timestamp_ms =
            SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis();
        Self {
            event: params.event.as_str(),
            timestamp_ms,
            kind: params.kind,
            type_name: params.type_name,
            source_path: params.source_path,
            target_path: params.target_path,
            field_count: params.field_count,
            error: params.error,
        }
    }
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Audit sink for build events.
pub trait BuildAuditSink: Send + Sync {
    /// Record an audit event.
    fn record(&self, event: &BuildAuditEvent);
}

/// Audit sink that logs JSON lines to stderr.
pub struct BuildStderrAuditSink;

impl BuildAuditSink for BuildStderrAuditSink {
    fn record(&self, event: &BuildAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }
}

/// Audit sink that logs JSON lines to a file.
pub struct BuildFileAuditSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl BuildFileAuditSink {
    /// Opens the audit log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl BuildAuditSink for BuildFileAuditSink {
    fn record(&self, event: &BuildAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

/// No-op audit sink.
pub struct BuildNoopAuditSink;

impl BuildAuditSink for BuildNoopAuditSink {
    fn record(&self, _event: &BuildAuditEvent) {}
}
