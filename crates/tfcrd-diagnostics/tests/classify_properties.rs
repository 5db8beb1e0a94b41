// crates/tfcrd-diagnostics/tests/classify_properties.rs
// ============================================================================
// Module: Log Classification Property Tests
// Description: Property tests over generated log streams.
// Purpose: Ensure classification never panics and counts error lines exactly.
// Dependencies: tfcrd-diagnostics, proptest, serde_json
// ============================================================================

//! ## Overview
//! Generates log lines at random levels and checks the classified failure.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::missing_docs_in_private_items,
    reason = "Test-only assertions use panic-based helpers for clarity."
)]

use proptest::prelude::*;
use tfcrd_diagnostics::LogLine;
use tfcrd_diagnostics::Operation;
use tfcrd_diagnostics::OperationFailed;
use tfcrd_diagnostics::classify;

fn level_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["trace", "debug", "info", "warn", "error"]).prop_map(str::to_string)
}

fn line_strategy() -> impl Strategy<Value = LogLine> {
    (level_strategy(), "[a-zA-Z0-9 ]{1,24}").prop_map(|(level, message)| LogLine {
        level,
        message,
        diagnostic: None,
    })
}

fn operation_strategy() -> impl Strategy<Value = Operation> {
    prop_oneof![
        Just(Operation::Apply),
        Just(Operation::Plan),
        Just(Operation::Refresh),
        Just(Operation::Destroy)
    ]
}

fn encode(lines: &[LogLine]) -> Vec<u8> {
    lines
        .iter()
        .map(|line| serde_json::to_string(line).unwrap())
        .collect::<Vec<_>>()
        .join("\n")
        .into_bytes()
}

proptest! {
    #[test]
    fn error_lines_are_counted_exactly(
        operation in operation_strategy(),
        lines in prop::collection::vec(line_strategy(), 0 .. 12),
    ) {
        let errors: Vec<&str> = lines
            .iter()
            .filter(|line| line.level == "error")
            .map(|line| line.message.as_str())
            .collect();
        match classify(operation, &encode(&lines)) {
            None => prop_assert!(errors.is_empty()),
            Some(OperationFailed::Reported { operation: reported, message }) => {
                prop_assert_eq!(reported, operation);
                prop_assert_eq!(message, errors.join("\n"));
            }
            Some(other) => prop_assert!(false, "unexpected failure {other}"),
        }
    }

    #[test]
    fn arbitrary_bytes_never_panic(
        operation in operation_strategy(),
        bytes in prop::collection::vec(any::<u8>(), 0 .. 256),
    ) {
        if let Some(failed) = classify(operation, &bytes) {
            prop_assert_eq!(failed.operation(), operation);
        }
    }
}
