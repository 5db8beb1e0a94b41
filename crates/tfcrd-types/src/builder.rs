// crates/tfcrd-types/src/builder.rs
// ============================================================================
// Module: Type Builder
// Description: Recursive schema-to-type builder and resolver.
// Purpose: Produce parameter/observation type pairs for every resource level.
// Dependencies: tfcrd-schema, tfcrd-config
// ============================================================================

//! ## Overview
//! [`Builder::build`] walks a resource schema depth first. Each resource
//! level allocates and reserves its `Parameters` and `Observation` type names
//! before visiting fields, so nested levels see their ancestors' names as
//! occupied. Each attribute resolves to one or two value-type variants:
//! - scalars resolve to a pointer to the primitive;
//! - collections of scalars or nested schemas wrap the element in a list or
//!   a string-keyed map;
//! - collections of nested resources recurse and yield the observation type,
//!   plus the parameters type unless the attribute is observation-only.
//!
//! Each variant is then classified, rewritten if sensitive, tagged, and
//! attached to the parameters or observation type of the current level.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use tfcrd_config::Reference;
use tfcrd_config::ResourceConfig;
use tfcrd_schema::AttributeSchema;
use tfcrd_schema::CanonicalPath;
use tfcrd_schema::Element;
use tfcrd_schema::FieldName;
use tfcrd_schema::ResourceSchema;
use tfcrd_schema::SourcePath;
use tfcrd_schema::TargetPath;
use tfcrd_schema::ValueKind;

use crate::audit::BuildAuditEvent;
use crate::audit::BuildAuditEventParams;
use crate::audit::BuildAuditSink;
use crate::audit::BuildEvent;
use crate::comments::Comment;
use crate::error::BuildError;
use crate::model::Comments;
use crate::model::FieldTags;
use crate::model::Generated;
use crate::model::GeneratedField;
use crate::model::GeneratedType;
use crate::model::Primitive;
use crate::model::TypeId;
use crate::model::ValueType;
use crate::reference::companion_fields;
use crate::sensitive;
use crate::symbols::SymbolTable;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum nesting depth of resource levels and element schemas.
pub const MAX_RESOURCE_DEPTH: usize = 64;
/// Type name suffix of configuration types.
const PARAMETERS_SUFFIX: &str = "Parameters";
/// Type name suffix of observation types.
const OBSERVATION_SUFFIX: &str = "Observation";
/// Serialization option marking a field as omittable.
const OMITEMPTY: &str = ",omitempty";

// ============================================================================
// SECTION: Builder
// ============================================================================

/// Builds generated types for one resource.
///
/// # Invariants
/// - A builder performs at most one build; [`Builder::build`] consumes it.
/// - The symbol table only grows during a build.
pub struct Builder {
    /// Occupied type names.
    symbols: SymbolTable,
    /// Finished types in completion order.
    types: Vec<GeneratedType>,
    /// Field documentation.
    comments: Comments,
    /// Audit sink for build decisions.
    audit: Arc<dyn BuildAuditSink>,
    /// Kind of the resource being built.
    kind: String,
}

impl Builder {
    /// Creates a builder with an empty symbol table.
    #[must_use]
    pub fn new(audit: Arc<dyn BuildAuditSink>) -> Self {
        Self::with_symbols(SymbolTable::new(), audit)
    }

    /// Creates a builder whose symbol table already holds other declarations.
    #[must_use]
    pub fn with_symbols(symbols: SymbolTable, audit: Arc<dyn BuildAuditSink>) -> Self {
        Self {
            symbols,
            types: Vec::new(),
            comments: Comments::default(),
            audit,
            kind: String::new(),
        }
    }

    /// Builds the types of a resource.
    ///
    /// The configuration gains canonical ignore-list entries and sensitive
    /// path mappings as a side effect.
    ///
    /// # Errors
    /// Returns [`BuildError`] when any attribute cannot be mapped; no partial
    /// output is returned.
    pub fn build(
        mut self,
        schema: &ResourceSchema,
        config: &mut ResourceConfig,
    ) -> Result<Generated, BuildError> {
        self.kind.clone_from(&config.kind);
        let root = Location::root(&config.kind);
        match self.build_resource(schema, config, &root, 0) {
            Ok((for_provider, at_provider)) => {
                let mut params = self.event(BuildEvent::BuildCompleted);
                params.field_count = Some(self.types.len());
                self.record(params);
                Ok(Generated {
                    types: self.types,
                    comments: self.comments,
                    for_provider: for_provider.id,
                    at_provider: at_provider.id,
                })
            }
            Err(err) => {
                let err = err.context(format!("cannot build the types of {}", self.kind));
                let mut params = self.event(BuildEvent::BuildFailed);
                params.error = Some(err.to_string());
                self.record(params);
                Err(err)
            }
        }
    }

    /// Builds the type pair of one resource level.
    fn build_resource(
        &mut self,
        schema: &ResourceSchema,
        config: &mut ResourceConfig,
        location: &Location,
        depth: usize,
    ) -> Result<(TypeRef, TypeRef), BuildError> {
        if depth >= MAX_RESOURCE_DEPTH {
            return Err(BuildError::DepthLimit(MAX_RESOURCE_DEPTH));
        }
        let parameters =
            self.symbols.allocate(PARAMETERS_SUFFIX, &location.names).map_err(|err| {
                err.context(format!("cannot generate parameters type name of {}", location.label()))
            })?;
        let observation =
            self.symbols.allocate(OBSERVATION_SUFFIX, &location.names).map_err(|err| {
                err.context(format!("cannot generate observation type name of {}", location.label()))
            })?;
        self.symbols.insert(parameters.clone());
        self.symbols.insert(observation.clone());

        let mut level = Level::new(parameters, observation);
        for (snake, attribute) in schema.iter() {
            self.build_field(snake, attribute, config, location, depth, &mut level)?;
        }
        Ok(self.finish_level(level, location))
    }

    /// Resolves one attribute and places its variants into the level.
    fn build_field(
        &mut self,
        snake: &str,
        attribute: &AttributeSchema,
        config: &mut ResourceConfig,
        parent: &Location,
        depth: usize,
        level: &mut Level,
    ) -> Result<(), BuildError> {
        let name = FieldName::from_snake(snake);
        let location = parent.field(&name);
        let comment = Comment::parse(&attribute.description).map_err(|source| {
            BuildError::Comment {
                description: attribute.description.clone(),
                source,
            }
            .context(format!("cannot build field {}", location.source))
        })?;
        self.register_late_init_ignore(config, &location);

        let variants = self.resolve_schema(attribute, config, &location, depth).map_err(|err| {
            err.context(format!("cannot infer type from schema of field {}", location.source))
        })?;
        let reference = config.reference_for(&location.source).cloned();
        let field = FieldContext {
            optional: attribute.optional || reference.is_some(),
            sensitive: attribute.sensitive,
            name,
            location,
            comment,
            reference,
        };
        for variant in variants {
            self.place_variant(variant, &field, config, level).map_err(|err| {
                err.context(format!("cannot build field {}", field.location.source))
            })?;
        }
        Ok(())
    }

    /// Classifies, rewrites, and tags one resolved variant of a field.
    fn place_variant(
        &mut self,
        variant: Resolved,
        field: &FieldContext,
        config: &mut ResourceConfig,
        level: &mut Level,
    ) -> Result<(), BuildError> {
        let mut comment = field.comment.clone();
        let mut field_name = field.name.camel.clone();
        let mut value_type = variant.value_type;
        let mut tf_tag = format!("{}{OMITEMPTY}", field.name.snake);
        let mut json_tag = format!("{}{OMITEMPTY}", field.name.lower_camel_computed);

        if field.sensitive {
            if variant.is_observation {
                let target = sensitive::observation_target(&field.location.target);
                self.register_sensitive(config, &field.location, target);
                return Ok(());
            }
            let secret = sensitive::rewrite_parameter(&field_name, &value_type, field.optional)?;
            let target = sensitive::parameter_target(&field.location.target);
            self.register_sensitive(config, &field.location, target);
            field_name = secret.name;
            value_type = secret.value_type;
            json_tag = secret.json_tag;
            tf_tag = sensitive::SUPPRESSED_TAG.to_string();
        }

        let required = comment.required_override.unwrap_or(!field.optional);
        if !variant.is_observation
            && required
            && let Some(trimmed) = json_tag.strip_suffix(OMITEMPTY)
        {
            json_tag = trimmed.to_string();
        }
        if let Some(tag) = &comment.tf_tag {
            tf_tag.clone_from(tag);
        }
        if let Some(tag) = &comment.json_tag {
            json_tag.clone_from(tag);
        }
        let generated = GeneratedField {
            name: field_name,
            value_type,
            tags: FieldTags {
                json: json_tag,
                tf: tf_tag,
            },
        };

        if variant.is_observation {
            self.comments.add(&level.observation, &generated.name, comment.render());
            level.observation_fields.push(generated);
            return Ok(());
        }

        comment.required = Some(required);
        comment.reference.clone_from(&field.reference);
        self.comments.add(&level.parameters, &generated.name, comment.render());
        let companions =
            field.reference.as_ref().map(|reference| companion_fields(&generated, reference));
        level.parameter_fields.push(generated);
        if let Some(companions) = companions {
            for companion in companions {
                self.comments.add(
                    &level.parameters,
                    &companion.name,
                    Comment::marker_only(false).render(),
                );
                level.parameter_fields.push(companion);
            }
            let mut params = self.event(BuildEvent::ReferenceAttached);
            params.type_name = Some(level.parameters.clone());
            params.source_path = Some(field.location.source.to_wildcard_string());
            self.record(params);
        }
        Ok(())
    }

    /// Maps one attribute to its value-type variants.
    fn resolve_schema(
        &mut self,
        attribute: &AttributeSchema,
        config: &mut ResourceConfig,
        location: &Location,
        depth: usize,
    ) -> Result<Vec<Resolved>, BuildError> {
        if depth >= MAX_RESOURCE_DEPTH {
            return Err(BuildError::DepthLimit(MAX_RESOURCE_DEPTH));
        }
        let observation = attribute.is_observation();
        let scalar = |primitive: Primitive| -> Result<Vec<Resolved>, BuildError> {
            Ok(vec![Resolved::new(ValueType::Primitive(primitive).pointer(), observation)])
        };
        match attribute.kind {
            ValueKind::Bool => scalar(Primitive::Bool),
            ValueKind::Float => scalar(Primitive::Float64),
            ValueKind::Int => scalar(Primitive::Int64),
            ValueKind::String => scalar(Primitive::String),
            ValueKind::List | ValueKind::Set | ValueKind::Map => {
                self.resolve_collection(attribute, config, location, depth)
            }
            ValueKind::Invalid => Err(BuildError::InvalidKind(attribute.kind.to_string())),
        }
    }

    /// Maps a list, set, or map attribute to its wrapped element variants.
    fn resolve_collection(
        &mut self,
        attribute: &AttributeSchema,
        config: &mut ResourceConfig,
        location: &Location,
        depth: usize,
    ) -> Result<Vec<Resolved>, BuildError> {
        let observation = attribute.is_observation();
        let element_location = location.element();
        let elements = match &attribute.element {
            Element::Primitive(kind) => {
                let primitive = Primitive::from_kind(*kind)
                    .ok_or_else(|| BuildError::UnsupportedElement(location.label()))?;
                vec![Resolved::new(ValueType::Primitive(primitive), observation)]
            }
            Element::Schema(inner) => self
                .resolve_schema(inner, config, &element_location, depth + 1)
                .map_err(|err| {
                    err.context(format!(
                        "cannot infer type from schema of element type of {}",
                        location.label()
                    ))
                })?
                .into_iter()
                .map(|resolved| Resolved::new(resolved.value_type, observation))
                .collect(),
            Element::Resource(resource) => {
                let (parameters, observation_type) = self
                    .build_resource(resource, config, &element_location, depth + 1)
                    .map_err(|err| {
                        err.context(format!(
                            "cannot infer type from resource schema of element type of {}",
                            location.label()
                        ))
                    })?;
                let mut resolved =
                    vec![Resolved::new(ValueType::Named(observation_type.name), true)];
                if !observation {
                    resolved.push(Resolved::new(ValueType::Named(parameters.name), false));
                }
                resolved
            }
            Element::Unset => {
                vec![Resolved::new(ValueType::Primitive(Primitive::String), observation)]
            }
        };
        let is_map = attribute.kind == ValueKind::Map;
        Ok(elements
            .into_iter()
            .map(|resolved| Resolved {
                value_type: if is_map {
                    resolved.value_type.map()
                } else {
                    resolved.value_type.list()
                },
                is_observation: resolved.is_observation,
            })
            .collect())
    }

    /// Appends the finished type pair of a level and returns its handles.
    fn finish_level(&mut self, level: Level, location: &Location) -> (TypeRef, TypeRef) {
        let Level {
            parameters,
            observation,
            parameter_fields,
            observation_fields,
        } = level;
        let parameters = self.push_type(parameters, parameter_fields, location);
        let observation = self.push_type(observation, observation_fields, location);
        (parameters, observation)
    }

    /// Appends one generated type.
    fn push_type(
        &mut self,
        name: String,
        fields: Vec<GeneratedField>,
        location: &Location,
    ) -> TypeRef {
        let mut params = self.event(BuildEvent::TypeGenerated);
        params.type_name = Some(name.clone());
        params.source_path = Some(location.source.to_wildcard_string());
        params.field_count = Some(fields.len());
        self.record(params);

        let id = TypeId::new(self.types.len());
        self.types.push(GeneratedType {
            name: name.clone(),
            fields,
        });
        TypeRef {
            id,
            name,
        }
    }

    /// Registers the canonical form of a source-form ignore entry.
    fn register_late_init_ignore(&self, config: &mut ResourceConfig, location: &Location) {
        if config.late_initializer.ignores_source(&location.source)
            && config.late_initializer.add_ignored_canonical(location.canonical.clone())
        {
            let mut params = self.event(BuildEvent::LateInitIgnore);
            params.source_path = Some(location.source.to_wildcard_string());
            params.target_path = Some(location.canonical.to_string());
            self.record(params);
        }
    }

    /// Records a sensitive path mapping in the configuration.
    fn register_sensitive(&self, config: &mut ResourceConfig, location: &Location, target: String) {
        let source = location.source.to_wildcard_string();
        config.sensitive.add_field_path(source.clone(), target.clone());
        let mut params = self.event(BuildEvent::SensitiveField);
        params.source_path = Some(source);
        params.target_path = Some(target);
        self.record(params);
    }

    /// Creates event parameters for the current kind.
    fn event(&self, event: BuildEvent) -> BuildAuditEventParams {
        BuildAuditEventParams::new(event, &self.kind)
    }

    /// Sends an event to the audit sink.
    fn record(&self, params: BuildAuditEventParams) {
        self.audit.record(&BuildAuditEvent::new(params));
    }
}

// ============================================================================
// SECTION: Build State
// ============================================================================

/// Location of an attribute in all three path conventions.
#[derive(Debug, Clone)]
struct Location {
    /// Path in schema attribute names.
    source: SourcePath,
    /// Path in generated field names.
    target: TargetPath,
    /// Path in camel-cased names, excluding the kind.
    canonical: CanonicalPath,
    /// Ancestor names used for type naming, starting with the kind.
    names: Vec<String>,
}

impl Location {
    /// Creates the root location of a resource kind.
    fn root(kind: &str) -> Self {
        Self {
            source: SourcePath::root(),
            target: TargetPath::root(),
            canonical: CanonicalPath::root(),
            names: vec![kind.to_string()],
        }
    }

    /// Returns the location of a field below this one.
    fn field(&self, name: &FieldName) -> Self {
        let mut names = self.names.clone();
        names.push(name.camel.clone());
        Self {
            source: self.source.child(&name.snake),
            target: self.target.child(&name.lower_camel),
            canonical: self.canonical.child(&name.camel),
            names,
        }
    }

    /// Returns the location of a collection element.
    fn element(&self) -> Self {
        Self {
            source: self.source.wildcard(),
            target: self.target.wildcard(),
            canonical: self.canonical.clone(),
            names: self.names.clone(),
        }
    }

    /// Renders the ancestor chain for diagnostics.
    fn label(&self) -> String {
        self.names.join(".")
    }
}

/// Per-field data shared by all of its variants.
struct FieldContext {
    /// Field name forms.
    name: FieldName,
    /// Field location.
    location: Location,
    /// Parsed description.
    comment: Comment,
    /// Configured reference, if any.
    reference: Option<Reference>,
    /// Optional flag after reference promotion.
    optional: bool,
    /// Sensitive flag of the attribute.
    sensitive: bool,
}

/// Fields collected for one resource level.
struct Level {
    /// Reserved parameters type name.
    parameters: String,
    /// Reserved observation type name.
    observation: String,
    /// Parameters fields in order.
    parameter_fields: Vec<GeneratedField>,
    /// Observation fields in order.
    observation_fields: Vec<GeneratedField>,
}

impl Level {
    /// Creates an empty level with reserved type names.
    const fn new(parameters: String, observation: String) -> Self {
        Self {
            parameters,
            observation,
            parameter_fields: Vec::new(),
            observation_fields: Vec::new(),
        }
    }
}

/// One value-type variant of an attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Resolved {
    /// Resolved value type.
    value_type: ValueType,
    /// True when the variant belongs to the observation type.
    is_observation: bool,
}

impl Resolved {
    /// Creates a variant.
    const fn new(value_type: ValueType, is_observation: bool) -> Self {
        Self {
            value_type,
            is_observation,
        }
    }
}

/// Handle and name of a finished type.
#[derive(Debug, Clone)]
struct TypeRef {
    /// Index into the type list.
    id: TypeId,
    /// Type name.
    name: String,
}
