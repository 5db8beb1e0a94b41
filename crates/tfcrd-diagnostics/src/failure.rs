// crates/tfcrd-diagnostics/src/failure.rs
// ============================================================================
// Module: Operation Failures
// Description: Typed failures of apply, plan, refresh, and destroy runs.
// Purpose: Classify operation logs and recognize failures in error chains.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! [`classify`] folds the error-level lines of an operation's logs into an
//! [`OperationFailed`]. Logs without error lines yield `None`. Logs that do
//! not parse still yield a failure, carrying the parse error.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::error::Error as StdError;
use std::fmt;

use thiserror::Error;

use crate::logs::LogLine;
use crate::logs::parse_logs;

// ============================================================================
// SECTION: Operations
// ============================================================================

/// Provisioning operations whose logs can be classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Apply run.
    Apply,
    /// Plan run.
    Plan,
    /// Refresh run.
    Refresh,
    /// Destroy run.
    Destroy,
}

impl Operation {
    /// Returns the lower-case operation label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Apply => "apply",
            Self::Plan => "plan",
            Self::Refresh => "refresh",
            Self::Destroy => "destroy",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Failures
// ============================================================================

/// Failure of a provisioning operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OperationFailed {
    /// Failure described by the error lines of the logs.
    #[error("{operation} failed: {message}")]
    Reported {
        /// Failed operation.
        operation: Operation,
        /// Error lines joined by newlines.
        message: String,
    },
    /// Failure whose logs could not be parsed.
    #[error("{parse_error}: {operation} failed")]
    Unparsed {
        /// Failed operation.
        operation: Operation,
        /// Log parse error.
        parse_error: String,
    },
}

impl OperationFailed {
    /// Returns the failed operation.
    #[must_use]
    pub const fn operation(&self) -> Operation {
        match self {
            Self::Reported {
                operation, ..
            }
            | Self::Unparsed {
                operation, ..
            } => *operation,
        }
    }
}

/// Classifies operation logs into a failure.
///
/// Returns `None` when the logs parse and contain no error lines.
#[must_use]
pub fn classify(operation: Operation, logs: &[u8]) -> Option<OperationFailed> {
    let text = String::from_utf8_lossy(logs);
    let lines = match parse_logs(&text) {
        Ok(lines) => lines,
        Err(err) => {
            return Some(OperationFailed::Unparsed {
                operation,
                parse_error: err.to_string(),
            });
        }
    };
    let messages: Vec<String> = lines.iter().filter_map(LogLine::error_message).collect();
    if messages.is_empty() {
        return None;
    }
    Some(OperationFailed::Reported {
        operation,
        message: messages.join("\n"),
    })
}

/// Classifies apply logs.
#[must_use]
pub fn apply_failed(logs: &[u8]) -> Option<OperationFailed> {
    classify(Operation::Apply, logs)
}

/// Classifies plan logs.
#[must_use]
pub fn plan_failed(logs: &[u8]) -> Option<OperationFailed> {
    classify(Operation::Plan, logs)
}

/// Classifies refresh logs.
#[must_use]
pub fn refresh_failed(logs: &[u8]) -> Option<OperationFailed> {
    classify(Operation::Refresh, logs)
}

/// Classifies destroy logs.
#[must_use]
pub fn destroy_failed(logs: &[u8]) -> Option<OperationFailed> {
    classify(Operation::Destroy, logs)
}

// ============================================================================
// SECTION: Error Chain Inspection
// ============================================================================

/// Returns true when any error in the chain is a failure of `operation`.
fn chain_has(err: &(dyn StdError + 'static), operation: Operation) -> bool {
    let mut current = Some(err);
    while let Some(err) = current {
        if let Some(failed) = err.downcast_ref::<OperationFailed>()
            && failed.operation() == operation
        {
            return true;
        }
        current = err.source();
    }
    false
}

/// Returns true when the error chain contains an apply failure.
#[must_use]
pub fn is_apply_failed(err: &(dyn StdError + 'static)) -> bool {
    chain_has(err, Operation::Apply)
}

/// Returns true when the error chain contains a plan failure.
#[must_use]
pub fn is_plan_failed(err: &(dyn StdError + 'static)) -> bool {
    chain_has(err, Operation::Plan)
}

/// Returns true when the error chain contains a refresh failure.
#[must_use]
pub fn is_refresh_failed(err: &(dyn StdError + 'static)) -> bool {
    chain_has(err, Operation::Refresh)
}

/// Returns true when the error chain contains a destroy failure.
#[must_use]
pub fn is_destroy_failed(err: &(dyn StdError + 'static)) -> bool {
    chain_has(err, Operation::Destroy)
}
