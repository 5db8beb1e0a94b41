// crates/tfcrd-config/src/examples.rs
// ============================================================================
// Module: Config Examples
// Description: Canonical example resource configuration payloads.
// Purpose: Deterministic examples for docs and tooling.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Canonical example of a resource configuration file. The output is static
//! and must always parse and validate.

/// Returns a canonical example `tfcrd.toml` resource configuration.
#[must_use]
pub fn config_toml_example() -> String {
    String::from(
        r#"name = "aws_s3_bucket"
kind = "Bucket"

[late_initializer]
ignored_fields = ["lifecycle_rule.transition.days"]

[references.kms_key_id]
type = "github.com/example/provider-aws/apis/kms/v1alpha1.Key"
extractor = "ExternalARN()"

[references."logging.target_bucket"]
type = "Bucket"
ref_field_name = "TargetBucketRef"
selector_field_name = "TargetBucketSelector"
"#,
    )
}
