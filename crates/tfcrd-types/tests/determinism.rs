// crates/tfcrd-types/tests/determinism.rs
// ============================================================================
// Module: Build Determinism Property Tests
// Description: Property tests over generated resource schemas.
// Purpose: Ensure repeated builds agree and classification follows the flags.
// Dependencies: tfcrd-types, tfcrd-schema, tfcrd-config, proptest
// ============================================================================

//! ## Overview
//! Repeated builds of the same schema must produce identical names, field
//! order, and tags; scalar attributes must land in the type their flags
//! select.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::missing_docs_in_private_items,
    reason = "Test-only assertions use panic-based helpers for clarity."
)]

use std::collections::BTreeMap;
use std::sync::Arc;

use proptest::prelude::*;
use tfcrd_config::ResourceConfig;
use tfcrd_schema::AttributeSchema;
use tfcrd_schema::Element;
use tfcrd_schema::FieldName;
use tfcrd_schema::ResourceSchema;
use tfcrd_schema::ValueKind;
use tfcrd_types::BuildNoopAuditSink;
use tfcrd_types::Builder;
use tfcrd_types::render::render_types;

fn name_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["name", "rule", "config", "id", "tags", "lifecycle_rule"])
        .prop_map(str::to_string)
}

fn scalar_strategy() -> impl Strategy<Value = AttributeSchema> {
    (
        prop_oneof![
            Just(ValueKind::Bool),
            Just(ValueKind::Float),
            Just(ValueKind::Int),
            Just(ValueKind::String)
        ],
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(|(kind, optional, computed)| {
            let mut attribute = AttributeSchema::new(kind);
            attribute.optional = optional;
            attribute.computed = computed;
            attribute
        })
}

fn attribute_strategy() -> impl Strategy<Value = AttributeSchema> {
    scalar_strategy().prop_recursive(3, 24, 4, |inner| {
        (
            prop::collection::btree_map(name_strategy(), inner, 1 .. 4),
            prop_oneof![Just(ValueKind::List), Just(ValueKind::Set), Just(ValueKind::Map)],
            any::<bool>(),
            any::<bool>(),
        )
            .prop_map(|(attributes, kind, optional, computed)| {
                let mut attribute = AttributeSchema::new(kind).with_element(Element::Resource(
                    ResourceSchema {
                        attributes,
                    },
                ));
                attribute.optional = optional;
                attribute.computed = computed;
                attribute
            })
    })
}

fn schema_strategy() -> impl Strategy<Value = ResourceSchema> {
    prop::collection::btree_map(name_strategy(), attribute_strategy(), 0 .. 5).prop_map(
        |attributes: BTreeMap<String, AttributeSchema>| ResourceSchema {
            attributes,
        },
    )
}

fn build_rendered(schema: &ResourceSchema) -> Result<(String, ResourceConfig), String> {
    let mut config = ResourceConfig::new("aws_thing", "Thing");
    let generated = Builder::new(Arc::new(BuildNoopAuditSink))
        .build(schema, &mut config)
        .map_err(|err| err.to_string())?;
    Ok((render_types(&generated), config))
}

proptest! {
    #[test]
    fn repeated_builds_are_identical(schema in schema_strategy()) {
        prop_assert_eq!(build_rendered(&schema), build_rendered(&schema));
    }

    #[test]
    fn scalars_are_classified_by_flags(
        attributes in prop::collection::btree_map(name_strategy(), scalar_strategy(), 0 .. 6)
    ) {
        let schema = ResourceSchema { attributes: attributes.clone() };
        let mut config = ResourceConfig::new("aws_thing", "Thing");
        let generated =
            Builder::new(Arc::new(BuildNoopAuditSink)).build(&schema, &mut config).unwrap();
        let parameters = generated.for_provider_type().unwrap();
        let observation = generated.at_provider_type().unwrap();
        for (name, attribute) in &attributes {
            let camel = FieldName::from_snake(name).camel;
            let observed = attribute.computed && !attribute.optional;
            prop_assert_eq!(observation.field(&camel).is_some(), observed);
            prop_assert_eq!(parameters.field(&camel).is_some(), !observed);
        }
        prop_assert_eq!(generated.types.len(), 2);
    }
}
