// crates/tfcrd-types/src/comments/tests.rs
// ============================================================================
// Module: Comment Unit Tests
// Description: Covers directive parsing and marker rendering.
// Purpose: Keep tag overrides and required markers stable.
// Dependencies: tfcrd-types, tfcrd-config
// ============================================================================

//! ## Overview
//! Unit tests for [`Comment`].

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::missing_docs_in_private_items,
    reason = "Test-only assertions use panic-based helpers for clarity."
)]

use tfcrd_config::Reference;

use super::Comment;
use super::CommentError;

#[test]
fn plain_description_is_kept_as_text() {
    let comment = Comment::parse("The bucket name.\n+optional note\n").unwrap();
    assert_eq!(comment.lines(), &["The bucket name.".to_string(), "+optional note".to_string()]);
    assert_eq!(comment.tf_tag, None);
    assert_eq!(comment.render(), "The bucket name.\n+optional note");
}

#[test]
fn directives_are_extracted() {
    let description =
        "Region.\n+tfcrd:field:TFTag=-\n  +tfcrd:field:JSONTag=region\n+tfcrd:field:Required=true";
    let comment = Comment::parse(description).unwrap();
    assert_eq!(comment.lines(), &["Region.".to_string()]);
    assert_eq!(comment.tf_tag.as_deref(), Some("-"));
    assert_eq!(comment.json_tag.as_deref(), Some("region"));
    assert_eq!(comment.required_override, Some(true));
}

#[test]
fn malformed_directives_fail() {
    assert_eq!(
        Comment::parse("+tfcrd:field:TFTag").unwrap_err(),
        CommentError::MissingValue("TFTag".to_string())
    );
    assert_eq!(
        Comment::parse("+tfcrd:field:Color=red").unwrap_err(),
        CommentError::UnknownKey("Color".to_string())
    );
    assert_eq!(
        Comment::parse("+tfcrd:field:Required=maybe").unwrap_err(),
        CommentError::InvalidRequired("maybe".to_string())
    );
}

#[test]
fn render_appends_required_markers() {
    let mut comment = Comment::parse("Name.").unwrap();
    comment.required = Some(true);
    assert_eq!(comment.render(), "Name.\n+kubebuilder:validation:Required");
    comment.required = Some(false);
    assert_eq!(comment.render(), "Name.\n+kubebuilder:validation:Optional");
    comment.required = None;
    assert_eq!(comment.render(), "Name.");
}

#[test]
fn render_appends_reference_markers() {
    let mut comment = Comment::marker_only(false);
    let mut reference = Reference::new("Key");
    reference.extractor = Some("ExternalARN()".to_string());
    comment.reference = Some(reference);
    assert_eq!(
        comment.render(),
        "+kubebuilder:validation:Optional\n+crossplane:generate:reference:type=Key\n+crossplane:generate:reference:extractor=ExternalARN()"
    );
}

#[test]
fn surrounding_blank_lines_are_dropped() {
    let comment = Comment::parse("\n\nText.\n\n").unwrap();
    assert_eq!(comment.lines(), &["Text.".to_string()]);
    assert!(Comment::parse("").unwrap().lines().is_empty());
}
