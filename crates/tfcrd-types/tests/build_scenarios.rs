// crates/tfcrd-types/tests/build_scenarios.rs
// ============================================================================
// Module: Build Scenario Tests
// Description: End-to-end builds of representative resource schemas.
// Purpose: Validate classification, tags, sensitive rewrites, and references.
// Dependencies: tfcrd-types, tfcrd-schema, tfcrd-config
// ============================================================================

//! ## Overview
//! Builds small resource schemas and checks the generated types, comments,
//! and configuration write-backs.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::missing_docs_in_private_items,
    reason = "Test-only assertions use panic-based helpers for clarity."
)]

use std::sync::Arc;
use std::sync::Mutex;

use tfcrd_config::Reference;
use tfcrd_config::ResourceConfig;
use tfcrd_schema::AttributeSchema;
use tfcrd_schema::CanonicalPath;
use tfcrd_schema::Element;
use tfcrd_schema::ResourceSchema;
use tfcrd_schema::SourcePath;
use tfcrd_schema::ValueKind;
use tfcrd_types::BuildAuditEvent;
use tfcrd_types::BuildAuditSink;
use tfcrd_types::BuildError;
use tfcrd_types::BuildNoopAuditSink;
use tfcrd_types::Builder;
use tfcrd_types::CommentError;
use tfcrd_types::Generated;
use tfcrd_types::GeneratedField;
use tfcrd_types::GeneratedType;

// ============================================================================
// SECTION: Helpers
// ============================================================================

#[derive(Default)]
struct RecordingSink {
    events: Mutex<Vec<BuildAuditEvent>>,
}

impl BuildAuditSink for RecordingSink {
    fn record(&self, event: &BuildAuditEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

fn bucket_config() -> ResourceConfig {
    ResourceConfig::new("aws_s3_bucket", "Bucket")
}

fn build(schema: &ResourceSchema, config: &mut ResourceConfig) -> Result<Generated, BuildError> {
    Builder::new(Arc::new(BuildNoopAuditSink)).build(schema, config)
}

fn parameters(generated: &Generated) -> &GeneratedType {
    generated.for_provider_type().unwrap()
}

fn observation(generated: &Generated) -> &GeneratedType {
    generated.at_provider_type().unwrap()
}

fn field<'a>(generated_type: &'a GeneratedType, name: &str) -> &'a GeneratedField {
    generated_type
        .field(name)
        .unwrap_or_else(|| panic!("missing field {name} in {}", generated_type.name))
}

fn field_names(generated_type: &GeneratedType) -> Vec<&str> {
    generated_type.fields.iter().map(|field| field.name.as_str()).collect()
}

// ============================================================================
// SECTION: Classification
// ============================================================================

#[test]
fn optional_map_of_strings_is_a_parameter() {
    let schema = ResourceSchema::new().with_attribute(
        "tags",
        AttributeSchema::new(ValueKind::Map)
            .optional()
            .with_element(Element::Primitive(ValueKind::String)),
    );
    let mut config = bucket_config();
    let generated = build(&schema, &mut config).unwrap();

    let tags = field(parameters(&generated), "Tags");
    assert_eq!(tags.value_type.to_string(), "map[string]string");
    assert_eq!(tags.tags.json, "tags,omitempty");
    assert_eq!(tags.tags.tf, "tags,omitempty");
    assert!(observation(&generated).fields.is_empty());
    assert_eq!(
        generated.comments.get("BucketParameters", "Tags"),
        Some("+kubebuilder:validation:Optional")
    );
}

#[test]
fn computed_only_attribute_is_an_observation() {
    let schema = ResourceSchema::new().with_attribute(
        "arn",
        AttributeSchema::new(ValueKind::String).computed().with_description("The ARN."),
    );
    let mut config = bucket_config();
    let generated = build(&schema, &mut config).unwrap();

    assert!(parameters(&generated).fields.is_empty());
    let arn = field(observation(&generated), "ARN");
    assert_eq!(arn.value_type.to_string(), "*string");
    assert_eq!(arn.tags.json, "arn,omitempty");
    assert_eq!(generated.comments.get("BucketObservation", "ARN"), Some("The ARN."));
    assert_eq!(generated.comments.get("BucketParameters", "ARN"), None);
}

#[test]
fn optional_computed_attribute_is_a_parameter() {
    let schema = ResourceSchema::new()
        .with_attribute("region", AttributeSchema::new(ValueKind::String).optional().computed());
    let mut config = bucket_config();
    let generated = build(&schema, &mut config).unwrap();

    assert_eq!(field_names(parameters(&generated)), vec!["Region"]);
    assert!(observation(&generated).fields.is_empty());
}

#[test]
fn required_parameter_drops_omitempty_from_target_tag() {
    let schema = ResourceSchema::new()
        .with_attribute("bucket_name", AttributeSchema::new(ValueKind::String));
    let mut config = bucket_config();
    let generated = build(&schema, &mut config).unwrap();

    let name = field(parameters(&generated), "BucketName");
    assert_eq!(name.tags.json, "bucketName");
    assert_eq!(name.tags.tf, "bucket_name,omitempty");
    assert_eq!(
        generated.comments.get("BucketParameters", "BucketName"),
        Some("+kubebuilder:validation:Required")
    );
}

#[test]
fn fields_follow_sorted_attribute_order() {
    let schema = ResourceSchema::new()
        .with_attribute("zone", AttributeSchema::new(ValueKind::String).optional())
        .with_attribute("acl", AttributeSchema::new(ValueKind::String).optional())
        .with_attribute("force_destroy", AttributeSchema::new(ValueKind::Bool).optional());
    let mut config = bucket_config();
    let generated = build(&schema, &mut config).unwrap();

    assert_eq!(field_names(parameters(&generated)), vec!["ACL", "ForceDestroy", "Zone"]);
}

// ============================================================================
// SECTION: Nested Resources
// ============================================================================

fn lifecycle_rule(optional: bool) -> AttributeSchema {
    let nested = ResourceSchema::new()
        .with_attribute("days", AttributeSchema::new(ValueKind::Int).optional())
        .with_attribute("id", AttributeSchema::new(ValueKind::String).computed());
    let attribute = AttributeSchema::new(ValueKind::List).with_element(Element::Resource(nested));
    if optional { attribute.optional() } else { attribute.computed() }
}

#[test]
fn nested_resource_links_both_variants() {
    let schema = ResourceSchema::new().with_attribute("lifecycle_rule", lifecycle_rule(true));
    let mut config = bucket_config();
    let generated = build(&schema, &mut config).unwrap();

    let names: Vec<&str> = generated.types.iter().map(|generated| generated.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "LifecycleRuleParameters",
            "LifecycleRuleObservation",
            "BucketParameters",
            "BucketObservation"
        ]
    );
    assert_eq!(generated.for_provider.index(), 2);
    assert_eq!(generated.at_provider.index(), 3);

    let settable = field(parameters(&generated), "LifecycleRule");
    assert_eq!(settable.value_type.to_string(), "[]LifecycleRuleParameters");
    let observed = field(observation(&generated), "LifecycleRule");
    assert_eq!(observed.value_type.to_string(), "[]LifecycleRuleObservation");
    assert_eq!(observed.tags.json, "lifecycleRule,omitempty");

    let rule_parameters = generated.find("LifecycleRuleParameters").unwrap();
    assert_eq!(field_names(rule_parameters), vec!["Days"]);
    let rule_observation = generated.find("LifecycleRuleObservation").unwrap();
    assert_eq!(field_names(rule_observation), vec!["ID"]);
}

#[test]
fn observation_only_nested_resource_links_observation_only() {
    let schema = ResourceSchema::new().with_attribute("lifecycle_rule", lifecycle_rule(false));
    let mut config = bucket_config();
    let generated = build(&schema, &mut config).unwrap();

    assert_eq!(generated.types.len(), 4);
    assert!(parameters(&generated).fields.is_empty());
    let observed = field(observation(&generated), "LifecycleRule");
    assert_eq!(observed.value_type.to_string(), "[]LifecycleRuleObservation");
}

#[test]
fn each_nesting_level_adds_two_types() {
    let mut schema = ResourceSchema::new()
        .with_attribute("value", AttributeSchema::new(ValueKind::String).optional());
    for level in 0 .. 4 {
        assert_eq!(build(&schema, &mut bucket_config()).unwrap().types.len(), 2 * (level + 1));
        schema = ResourceSchema::new().with_attribute(
            "child",
            AttributeSchema::new(ValueKind::Set).optional().with_element(Element::Resource(schema)),
        );
    }
}

// ============================================================================
// SECTION: Sensitive Fields
// ============================================================================

#[test]
fn sensitive_parameter_becomes_secret_reference() {
    let schema = ResourceSchema::new()
        .with_attribute("password", AttributeSchema::new(ValueKind::String).optional().sensitive());
    let mut config = bucket_config();
    let generated = build(&schema, &mut config).unwrap();

    assert_eq!(field_names(parameters(&generated)), vec!["PasswordSecretRef"]);
    let secret = field(parameters(&generated), "PasswordSecretRef");
    assert_eq!(secret.value_type.to_string(), "*v1.SecretKeySelector");
    assert_eq!(secret.tags.json, "passwordSecretRef,omitempty");
    assert_eq!(secret.tags.tf, "-");
    assert_eq!(config.sensitive.target_for("password"), Some("spec.forProvider.passwordSecretRef"));
    assert_eq!(config.sensitive.len(), 1);
    assert!(generated.comments.get("BucketParameters", "PasswordSecretRef").is_some());
}

#[test]
fn required_sensitive_parameter_is_not_a_pointer() {
    let schema = ResourceSchema::new()
        .with_attribute("master_password", AttributeSchema::new(ValueKind::String).sensitive());
    let mut config = bucket_config();
    let generated = build(&schema, &mut config).unwrap();

    let secret = field(parameters(&generated), "MasterPasswordSecretRef");
    assert_eq!(secret.value_type.to_string(), "v1.SecretKeySelector");
    assert_eq!(secret.tags.json, "masterPasswordSecretRef");
}

#[test]
fn sensitive_observation_is_dropped_and_registered() {
    let schema = ResourceSchema::new().with_attribute(
        "access_key",
        AttributeSchema::new(ValueKind::String).computed().sensitive(),
    );
    let mut config = bucket_config();
    let generated = build(&schema, &mut config).unwrap();

    assert!(observation(&generated).fields.is_empty());
    assert!(parameters(&generated).fields.is_empty());
    assert_eq!(config.sensitive.len(), 1);
    assert_eq!(config.sensitive.target_for("access_key"), Some("status.atProvider.accessKey"));
}

#[test]
fn nested_sensitive_paths_keep_wildcards() {
    let nested = ResourceSchema::new()
        .with_attribute("token", AttributeSchema::new(ValueKind::String).optional().sensitive());
    let schema = ResourceSchema::new().with_attribute(
        "auth_rule",
        AttributeSchema::new(ValueKind::List).optional().with_element(Element::Resource(nested)),
    );
    let mut config = bucket_config();
    build(&schema, &mut config).unwrap();

    assert_eq!(
        config.sensitive.target_for("auth_rule[*].token"),
        Some("spec.forProvider.authRule[*].tokenSecretRef")
    );
}

#[test]
fn sensitive_non_string_is_rejected() {
    let schema = ResourceSchema::new()
        .with_attribute("port", AttributeSchema::new(ValueKind::Int).optional().sensitive());
    let mut config = bucket_config();
    let err = build(&schema, &mut config).unwrap_err();

    assert!(matches!(
        err.root_cause(),
        BuildError::InvalidSensitiveType { actual, field } if actual == "*int64" && field == "Port"
    ));
    assert!(err.to_string().starts_with("cannot build the types of Bucket: "));
    assert!(config.sensitive.is_empty());
}

// ============================================================================
// SECTION: Configuration Collaboration
// ============================================================================

#[test]
fn late_init_ignores_gain_canonical_form() {
    let schema = ResourceSchema::new().with_attribute("lifecycle_rule", lifecycle_rule(true));
    let mut config =
        bucket_config().with_ignored_field(SourcePath::parse("lifecycle_rule.days").unwrap());
    build(&schema, &mut config).unwrap();

    let canonical = CanonicalPath::parse("LifecycleRule.Days").unwrap();
    assert!(config.late_initializer.ignores_canonical(&canonical));
    assert_eq!(config.late_initializer.ignored_canonical_fields.len(), 1);
}

#[test]
fn references_add_companion_fields() {
    let schema = ResourceSchema::new()
        .with_attribute("role", AttributeSchema::new(ValueKind::String))
        .with_attribute(
            "security_groups",
            AttributeSchema::new(ValueKind::List)
                .optional()
                .with_element(Element::Primitive(ValueKind::String)),
        );
    let mut role = Reference::new("Role");
    role.extractor = Some("ExternalARN()".to_string());
    let mut config = bucket_config()
        .with_reference(SourcePath::parse("role").unwrap(), role)
        .with_reference(
            SourcePath::parse("security_groups").unwrap(),
            Reference::new("SecurityGroup"),
        );
    let generated = build(&schema, &mut config).unwrap();

    let params = parameters(&generated);
    assert_eq!(
        field_names(params),
        vec![
            "Role",
            "RoleRef",
            "RoleSelector",
            "SecurityGroups",
            "SecurityGroupsRefs",
            "SecurityGroupsSelector"
        ]
    );
    assert_eq!(field(params, "Role").tags.json, "role,omitempty");
    let role_ref = field(params, "RoleRef");
    assert_eq!(role_ref.value_type.to_string(), "*v1.Reference");
    assert_eq!(role_ref.tags.json, "roleRef,omitempty");
    assert_eq!(role_ref.tags.tf, "-");
    assert_eq!(field(params, "RoleSelector").value_type.to_string(), "*v1.Selector");
    assert_eq!(field(params, "SecurityGroupsRefs").value_type.to_string(), "[]v1.Reference");
    assert_eq!(
        generated.comments.get("BucketParameters", "Role"),
        Some(
            "+kubebuilder:validation:Optional\n+crossplane:generate:reference:type=Role\n+crossplane:generate:reference:extractor=ExternalARN()"
        )
    );
    assert_eq!(
        generated.comments.get("BucketParameters", "RoleSelector"),
        Some("+kubebuilder:validation:Optional")
    );
}

#[test]
fn reference_field_name_overrides_apply() {
    let schema = ResourceSchema::new()
        .with_attribute("target_bucket", AttributeSchema::new(ValueKind::String).optional());
    let mut reference = Reference::new("Bucket");
    reference.ref_field_name = Some("TargetBucketRef".to_string());
    reference.selector_field_name = Some("TargetBucketPicker".to_string());
    let mut config =
        bucket_config().with_reference(SourcePath::parse("target_bucket").unwrap(), reference);
    let generated = build(&schema, &mut config).unwrap();

    assert_eq!(
        field_names(parameters(&generated)),
        vec!["TargetBucket", "TargetBucketRef", "TargetBucketPicker"]
    );
}

// ============================================================================
// SECTION: Directives
// ============================================================================

#[test]
fn directives_override_tags_and_required() {
    let schema = ResourceSchema::new().with_attribute(
        "region",
        AttributeSchema::new(ValueKind::String)
            .optional()
            .with_description("Region.\n+tfcrd:field:Required=true\n+tfcrd:field:TFTag=-"),
    );
    let mut config = bucket_config();
    let generated = build(&schema, &mut config).unwrap();

    let region = field(parameters(&generated), "Region");
    assert_eq!(region.tags.json, "region");
    assert_eq!(region.tags.tf, "-");
    assert_eq!(
        generated.comments.get("BucketParameters", "Region"),
        Some("Region.\n+kubebuilder:validation:Required")
    );
}

#[test]
fn json_tag_directive_wins_over_required_trimming() {
    let schema = ResourceSchema::new().with_attribute(
        "name",
        AttributeSchema::new(ValueKind::String)
            .with_description("+tfcrd:field:JSONTag=name,omitempty"),
    );
    let mut config = bucket_config();
    let generated = build(&schema, &mut config).unwrap();

    assert_eq!(field(parameters(&generated), "Name").tags.json, "name,omitempty");
}

#[test]
fn malformed_directive_fails_the_build() {
    let schema = ResourceSchema::new().with_attribute(
        "name",
        AttributeSchema::new(ValueKind::String).with_description("+tfcrd:field:Colour=red"),
    );
    let err = build(&schema, &mut bucket_config()).unwrap_err();
    assert!(matches!(
        err.root_cause(),
        BuildError::Comment { source: CommentError::UnknownKey(key), .. } if key == "Colour"
    ));
    assert!(err.to_string().contains("cannot build field name: "));
}

#[test]
fn nested_directive_failures_name_the_field_path() {
    let nested = ResourceSchema::new().with_attribute(
        "note",
        AttributeSchema::new(ValueKind::String)
            .optional()
            .with_description("+tfcrd:field:Colour=red"),
    );
    let schema = ResourceSchema::new().with_attribute(
        "lifecycle_rule",
        AttributeSchema::new(ValueKind::List).optional().with_element(Element::Resource(nested)),
    );
    let err = build(&schema, &mut bucket_config()).unwrap_err();
    assert!(
        err.to_string().contains(
            "cannot build field lifecycle_rule[*].note: cannot build comment for description"
        ),
        "{err}"
    );
}

#[test]
fn nested_sensitive_type_errors_name_the_field_path() {
    let nested = ResourceSchema::new().with_attribute(
        "secret",
        AttributeSchema::new(ValueKind::Int).optional().sensitive(),
    );
    let schema = ResourceSchema::new().with_attribute(
        "lifecycle_rule",
        AttributeSchema::new(ValueKind::List).optional().with_element(Element::Resource(nested)),
    );
    let mut config = bucket_config();
    let err = build(&schema, &mut config).unwrap_err();
    assert!(
        err.to_string().contains("cannot build field lifecycle_rule[*].secret: got type \"*int64\""),
        "{err}"
    );
    assert!(matches!(err.root_cause(), BuildError::InvalidSensitiveType { .. }));
    assert!(config.sensitive.is_empty());
}

// ============================================================================
// SECTION: Errors and Audit
// ============================================================================

#[test]
fn errors_carry_the_field_path_trail() {
    let nested =
        ResourceSchema::new().with_attribute("broken", AttributeSchema::new(ValueKind::Invalid));
    let schema = ResourceSchema::new().with_attribute(
        "lifecycle_rule",
        AttributeSchema::new(ValueKind::List).optional().with_element(Element::Resource(nested)),
    );
    let err = build(&schema, &mut bucket_config()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "cannot build the types of Bucket: cannot infer type from schema of field \
         lifecycle_rule: cannot infer type from resource schema of element type of \
         Bucket.LifecycleRule: cannot infer type from schema of field lifecycle_rule[*].broken: \
         invalid schema type invalid"
    );
    assert!(matches!(err.root_cause(), BuildError::InvalidKind(_)));
}

#[test]
fn audit_sink_receives_build_events() {
    let sink = Arc::new(RecordingSink::default());
    let schema = ResourceSchema::new()
        .with_attribute("password", AttributeSchema::new(ValueKind::String).optional().sensitive());
    let mut config = bucket_config();
    Builder::new(sink.clone()).build(&schema, &mut config).unwrap();

    let events = sink.events.lock().unwrap();
    let names: Vec<&str> = events.iter().map(|event| event.event).collect();
    assert_eq!(names, vec!["sensitive_field", "type_generated", "type_generated", "build_completed"]);
    assert!(events.iter().all(|event| event.kind == "Bucket"));
    assert_eq!(events[3].field_count, Some(2));
    assert_eq!(events[0].target_path.as_deref(), Some("spec.forProvider.passwordSecretRef"));
}

#[test]
fn audit_sink_receives_failures() {
    let sink = Arc::new(RecordingSink::default());
    let schema =
        ResourceSchema::new().with_attribute("broken", AttributeSchema::new(ValueKind::Invalid));
    let result = Builder::new(sink.clone()).build(&schema, &mut bucket_config());
    assert!(result.is_err());

    let events = sink.events.lock().unwrap();
    let last = events.last().unwrap();
    assert_eq!(last.event, "build_failed");
    assert!(last.error.as_deref().unwrap().ends_with("invalid schema type invalid"));
}
