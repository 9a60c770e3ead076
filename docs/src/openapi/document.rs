//! OpenAPI document assembly
//!
//! `OpenApiDocument` is the registration sink of the documentation pass: every resource
//! descriptor becomes path items, every record payload is resolved into a serialization tree
//! and rendered as a schema. Named trees land in `components.schemas` and are referenced with
//! `$ref`, which is also how recursive records are expressed.

use std::collections::BTreeSet;
use std::sync::{Arc, LazyLock};

use error_stack::{Report, ResultExt};
use itertools::Itertools;
use propbox_schema::classify::TypeShape;
use propbox_schema::model::FieldSet;
use propbox_schema::registration::{Body, EndpointDescriptor, Operation, RegistrationSink};
use propbox_schema::resolve::SerializationTreeResolver;
use propbox_schema::tree::{
    ElementSchema, NestedSchema, SchemaField, SchemaPrimitiveKind, SerializationTree,
};
use regex::Regex;
use serde_json::{Map, Value, json};
use tracing::{debug, warn};

use super::keywords::{DocumentKeyword, KeywordMap, SchemaKeyword};
use crate::api_model::DocsInfo;
use crate::error::{Error, Result};

const OPENAPI_VERSION: &str = "3.0.3";
const JSON_MEDIA_TYPE: &str = "application/json";
const SCHEMA_REF_PREFIX: &str = "#/components/schemas/";

/// `{name}` segments of a templated path
static PATH_PARAMETER: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\{([^{}/]+)\}").ok());

/// An OpenAPI document under construction
pub struct OpenApiDocument<'r> {
    info:      DocsInfo,
    resolver:  &'r SerializationTreeResolver,
    paths:     Map<String, Value>,
    schemas:   Map<String, Value>,
    /// Components rendered from a depth-truncated tree, replaced by the next complete one
    truncated: BTreeSet<String>,
    providers: Vec<Value>,
}

impl<'r> OpenApiDocument<'r> {
    /// Create an empty document resolving payloads through `resolver`
    pub fn new(info: DocsInfo, resolver: &'r SerializationTreeResolver) -> Self {
        Self {
            info,
            resolver,
            paths: Map::new(),
            schemas: Map::new(),
            truncated: BTreeSet::new(),
            providers: Vec::new(),
        }
    }

    /// Add named record sets to `components.schemas` even when no operation uses them
    pub fn add_record_sets<'s>(&mut self, record_sets: impl IntoIterator<Item = &'s Arc<FieldSet>>) {
        for set in record_sets {
            if set.name().is_some() {
                let tree = self.resolver.resolve(set);
                self.tree_schema(&tree);
            }
        }
    }

    /// Number of registered path templates
    pub fn path_count(&self) -> usize { self.paths.len() }

    /// The document as a JSON value
    pub fn to_value(&self) -> Value {
        let mut document = Map::new();
        document.put(DocumentKeyword::OpenApi, OPENAPI_VERSION);
        document.put(
            DocumentKeyword::Info,
            json!({
                (DocumentKeyword::Title.as_ref()): self.info.title,
                (DocumentKeyword::Version.as_ref()): self.info.version,
            }),
        );
        document.put(DocumentKeyword::Paths, self.paths.clone());
        if !self.schemas.is_empty() {
            let mut components = Map::new();
            components.put(DocumentKeyword::Schemas, self.schemas.clone());
            document.put(DocumentKeyword::Components, components);
        }
        if !self.providers.is_empty() {
            document.put(DocumentKeyword::XProviders, self.providers.clone());
        }
        Value::Object(document)
    }

    /// Convert to JSON string with error-stack context
    /// Uses `PrettyCompactFormatter` for readable structure with compact arrays
    pub fn to_json(&self) -> Result<String> {
        use json_pretty_compact::PrettyCompactFormatter;
        use serde::Serialize;
        use serde_json::Serializer;

        let mut buf = Vec::new();
        let formatter = PrettyCompactFormatter::new();
        let mut ser = Serializer::with_formatter(&mut buf, formatter);

        self.to_value()
            .serialize(&mut ser)
            .map_err(|e| Report::new(Error::Serialization(format!("OpenAPI document: {e}"))))?;

        String::from_utf8(buf).change_context(Error::Serialization(
            "Failed to convert JSON bytes to string".to_string(),
        ))
    }

    fn register_operation(
        &mut self,
        descriptor: &EndpointDescriptor,
        operation: &Operation,
    ) -> propbox_schema::Result<()> {
        let Some(path) = descriptor.operation_path(operation) else {
            return Ok(());
        };
        let method = operation.method().to_string();

        let item = self
            .paths
            .entry(path.clone())
            .or_insert_with(|| Value::Object(Map::new()));
        if item.get(&method).is_some() {
            return Err(Report::new(propbox_schema::Error::registration_failed(
                &descriptor.name,
                format!("duplicate operation {} {path}", method.to_uppercase()),
            )));
        }

        let mut object = Map::new();
        if let Some(summary) = operation.summary() {
            object.put(DocumentKeyword::Summary, summary);
        }
        object.put(
            DocumentKeyword::OperationId,
            operation_id(&descriptor.name, &method, &path),
        );
        let parameters = path_parameters(&path);
        if !parameters.is_empty() {
            object.put(DocumentKeyword::Parameters, parameters);
        }
        if let Some(request) = operation.request() {
            let schema = self.body_schema(request);
            object.put(
                DocumentKeyword::RequestBody,
                json!({ (DocumentKeyword::Content.as_ref()): media_type(schema) }),
            );
        }
        let responses = match operation.response() {
            Some(response) => {
                let schema = self.body_schema(response);
                json!({ "200": {
                    (DocumentKeyword::Description.as_ref()): "Successful response",
                    (DocumentKeyword::Content.as_ref()): media_type(schema),
                }})
            }
            None => json!({ "204": { (DocumentKeyword::Description.as_ref()): "No content" } }),
        };
        object.put(DocumentKeyword::Responses, responses);

        if let Some(Value::Object(item)) = self.paths.get_mut(&path) {
            item.insert(method, Value::Object(object));
        }
        Ok(())
    }

    /// Schema of a request or response payload
    fn body_schema(&mut self, body: &Body) -> Value {
        let resolver = self.resolver;
        let factory = resolver.builder();
        let shape = factory.classifier().classify(&body.value_type);

        let Some(shape) = shape else {
            if body.field_set.is_some() {
                warn!(
                    payload = %body.value_type,
                    "Payload type carries no record - record set ignored"
                );
            }
            return factory
                .value_field("body", &body.value_type, None)
                .map_or_else(|| json!({}), |field| self.field_schema(&field));
        };

        let record = match &body.field_set {
            Some(set) => {
                let tree = resolver.resolve(set);
                self.tree_schema(&tree)
            }
            None => free_form_object(),
        };
        wrap_record(shape.unwrapped(), record)
    }

    /// Schema of a resolved tree, registered as a component when it has a name
    fn tree_schema(&mut self, tree: &Arc<SerializationTree>) -> Value {
        let Some(name) = tree.name() else {
            return self.object_schema(tree);
        };
        let truncated = tree.is_truncated();
        let render = !self.schemas.contains_key(name)
            || (!truncated && self.truncated.contains(name));
        if render {
            // placeholder first so nested occurrences of the same tree become references
            self.schemas.insert(name.to_string(), Value::Null);
            self.truncated.remove(name);
            let object = self.object_schema(tree);
            self.schemas.insert(name.to_string(), object);
            if truncated {
                self.truncated.insert(name.to_string());
            }
            debug!(schema = name, truncated, "Registered component schema");
        }
        schema_ref(name)
    }

    fn object_schema(&mut self, tree: &SerializationTree) -> Value {
        let mut properties = Map::new();
        for field in tree.fields() {
            let schema = self.field_schema(field);
            properties.insert(field.name.clone(), schema);
        }

        let mut object = Map::new();
        object.put(SchemaKeyword::Type, SchemaPrimitiveKind::Object.json_type());
        object.put(SchemaKeyword::Properties, properties);
        let required: Vec<&str> = tree.required_fields().collect();
        if !required.is_empty() {
            object.put(SchemaKeyword::Required, required);
        }
        Value::Object(object)
    }

    fn nested_schema(&mut self, nested: &NestedSchema) -> Value {
        match nested {
            NestedSchema::Tree(tree) => self.tree_schema(tree),
            NestedSchema::Recursive { name: Some(name) } => schema_ref(name),
            NestedSchema::Recursive { name: None } | NestedSchema::Truncated | NestedSchema::Opaque => {
                free_form_object()
            }
        }
    }

    fn field_schema(&mut self, field: &SchemaField) -> Value {
        let base = match (&field.nested, &field.element) {
            (Some(nested), _) => self.nested_schema(nested),
            (None, Some(element)) => {
                let element = self.element_schema(element);
                container_schema(field.kind, element)
            }
            (None, None) => primitive_schema(field.kind, field.format.as_deref()),
        };
        decorate(base, field_keywords(field))
    }

    fn element_schema(&mut self, element: &ElementSchema) -> Value {
        match element {
            ElementSchema::Primitive { kind, format } => primitive_schema(*kind, format.as_deref()),
            ElementSchema::Container {
                kind,
                element,
                unique_items,
            } => {
                let inner = self.element_schema(element);
                let mut keywords = Map::new();
                if *unique_items {
                    keywords.put(SchemaKeyword::UniqueItems, true);
                }
                decorate(container_schema(*kind, inner), keywords)
            }
            ElementSchema::Record(nested) => self.nested_schema(nested),
        }
    }
}

impl RegistrationSink for OpenApiDocument<'_> {
    fn register(&mut self, descriptor: &EndpointDescriptor) -> propbox_schema::Result<()> {
        if descriptor.is_provider() {
            self.providers.push(json!({
                (DocumentKeyword::Name.as_ref()): descriptor.name,
                "type": descriptor.type_name,
            }));
            return Ok(());
        }
        if descriptor.operations.is_empty() {
            debug!(endpoint = %descriptor.name, "Resource declares no operations");
        }
        for operation in &descriptor.operations {
            self.register_operation(descriptor, operation)?;
        }
        Ok(())
    }
}

/// Keywords a schema field adds on top of its base schema
fn field_keywords(field: &SchemaField) -> Map<String, Value> {
    let constraints = &field.constraints;
    let mut keywords = Map::new();

    if let Some(title) = &field.title {
        keywords.put(SchemaKeyword::Title, title.as_str());
    }
    if field.read_only {
        keywords.put(SchemaKeyword::ReadOnly, true);
    }
    if field.unique_items {
        keywords.put(SchemaKeyword::UniqueItems, true);
    }
    if let Some(format) = &constraints.format {
        keywords.put(SchemaKeyword::Format, format.as_str());
    }
    if let Some(minimum) = constraints.minimum {
        keywords.put(SchemaKeyword::Minimum, minimum);
        if constraints.exclusive_minimum {
            keywords.put(SchemaKeyword::ExclusiveMinimum, true);
        }
    }
    if let Some(maximum) = constraints.maximum {
        keywords.put(SchemaKeyword::Maximum, maximum);
        if constraints.exclusive_maximum {
            keywords.put(SchemaKeyword::ExclusiveMaximum, true);
        }
    }
    for (keyword, value) in [
        (SchemaKeyword::MinLength, constraints.min_length),
        (SchemaKeyword::MaxLength, constraints.max_length),
        (SchemaKeyword::MinItems, constraints.min_items),
        (SchemaKeyword::MaxItems, constraints.max_items),
    ] {
        if let Some(value) = value {
            keywords.put(keyword, value);
        }
    }
    if let Some(pattern) = &constraints.pattern {
        keywords.put(SchemaKeyword::Pattern, pattern.as_str());
    }
    keywords
}

/// Merge `keywords` into `base`; a `$ref` cannot carry siblings in OpenAPI 3.0 and is wrapped
fn decorate(base: Value, keywords: Map<String, Value>) -> Value {
    if keywords.is_empty() {
        return base;
    }
    let Value::Object(mut object) = base else {
        return base;
    };
    if object.contains_key(SchemaKeyword::Ref.as_ref()) {
        let mut wrapper = Map::new();
        wrapper.put(SchemaKeyword::AllOf, vec![Value::Object(object)]);
        wrapper.extend(keywords);
        return Value::Object(wrapper);
    }
    object.extend(keywords);
    Value::Object(object)
}

fn primitive_schema(kind: SchemaPrimitiveKind, format: Option<&str>) -> Value {
    let mut schema = Map::new();
    schema.put(SchemaKeyword::Type, kind.json_type());
    if let Some(format) = format.or_else(|| kind.json_format()) {
        schema.put(SchemaKeyword::Format, format);
    }
    Value::Object(schema)
}

/// Array with `items` or object with `additionalProperties`
fn container_schema(kind: SchemaPrimitiveKind, element: Value) -> Value {
    let keyword = if kind == SchemaPrimitiveKind::Array {
        SchemaKeyword::Items
    } else {
        SchemaKeyword::AdditionalProperties
    };
    let mut container = Map::new();
    container.put(SchemaKeyword::Type, kind.json_type());
    container.put(keyword, element);
    Value::Object(container)
}

fn free_form_object() -> Value { primitive_schema(SchemaPrimitiveKind::Object, None) }

fn schema_ref(name: &str) -> Value {
    json!({ (SchemaKeyword::Ref.as_ref()): format!("{SCHEMA_REF_PREFIX}{name}") })
}

fn wrap_record(shape: &TypeShape, record: Value) -> Value {
    match shape {
        TypeShape::Scalar | TypeShape::Optional(_) => record,
        TypeShape::List { .. } => json!({
            (SchemaKeyword::Type.as_ref()): SchemaPrimitiveKind::Array.json_type(),
            (SchemaKeyword::Items.as_ref()): record,
        }),
        TypeShape::Set { unique_items, .. } => json!({
            (SchemaKeyword::Type.as_ref()): SchemaPrimitiveKind::Array.json_type(),
            (SchemaKeyword::Items.as_ref()): record,
            (SchemaKeyword::UniqueItems.as_ref()): unique_items,
        }),
        TypeShape::Map { .. } => json!({
            (SchemaKeyword::Type.as_ref()): SchemaPrimitiveKind::Object.json_type(),
            (SchemaKeyword::AdditionalProperties.as_ref()): record,
        }),
    }
}

/// `people_get_people_id` for `GET /people/{id}` of endpoint `people`
fn operation_id(endpoint: &str, method: &str, path: &str) -> String {
    let segments = path
        .split('/')
        .map(|segment| segment.trim_matches(|c| c == '{' || c == '}'))
        .filter(|segment| !segment.is_empty())
        .join("_");
    if segments.is_empty() {
        format!("{endpoint}_{method}")
    } else {
        format!("{endpoint}_{method}_{segments}")
    }
}

fn media_type(schema: Value) -> Value {
    json!({ JSON_MEDIA_TYPE: { (DocumentKeyword::Schema.as_ref()): schema } })
}

/// Path parameters declared by `{name}` segments, in order of first appearance
fn path_parameters(path: &str) -> Vec<Value> {
    let Some(pattern) = PATH_PARAMETER.as_ref() else {
        return Vec::new();
    };
    let mut seen = BTreeSet::new();
    pattern
        .captures_iter(path)
        .filter_map(|captures| captures.get(1))
        .map(|name| name.as_str())
        .filter(|name| seen.insert(*name))
        .map(|name| {
            json!({
                (DocumentKeyword::Name.as_ref()): name,
                (DocumentKeyword::In.as_ref()): "path",
                (SchemaKeyword::Required.as_ref()): true,
                (DocumentKeyword::Schema.as_ref()): primitive_schema(SchemaPrimitiveKind::String, None),
            })
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests")]
mod tests {
    use propbox_schema::factory::SchemaFieldFactory;
    use propbox_schema::model::{DeclaredType, FieldDefinition, FieldSetLink, ValidationRule};
    use propbox_schema::registration::{
        Candidate, ComponentType, HttpMethod, Lifecycle, RegistrationConfig,
        ResourceRegistrationPipeline,
    };
    use propbox_schema::resolve::ResolverConfig;

    use super::*;

    fn parse(expression: &str) -> DeclaredType { DeclaredType::parse(expression).unwrap() }

    fn person() -> Arc<FieldSet> {
        FieldSet::named(
            "Person",
            [
                FieldDefinition::new("name", parse("String")).required(),
                FieldDefinition::new("age", parse("i32"))
                    .with_rule(ValidationRule::range(0.0, 150.0)),
                FieldDefinition::new("id", parse("Uuid")).read_only(),
            ],
        )
        .unwrap()
    }

    fn people_resource(person: &Arc<FieldSet>) -> Candidate {
        let component = ComponentType::new("PeopleResource")
            .with_path("/people")
            .with_operation(
                Operation::new(HttpMethod::Get)
                    .with_summary("List people")
                    .with_response(Body::new(parse("Vec<PropertyBox>")).with_field_set(person)),
            )
            .with_operation(
                Operation::new(HttpMethod::Put)
                    .with_path("{id}")
                    .with_request(Body::new(parse("PropertyBox")).with_field_set(person)),
            );
        Candidate::new("people", Lifecycle::Request, component)
    }

    fn render(candidates: &[Candidate], resolver: &SerializationTreeResolver) -> Value {
        let pipeline = ResourceRegistrationPipeline::new(RegistrationConfig {
            base_path: "/api".to_string(),
            ..RegistrationConfig::default()
        });
        let descriptors = pipeline.discover(candidates).unwrap();
        let mut document = OpenApiDocument::new(DocsInfo::default(), resolver);
        pipeline.register_all(&descriptors, &mut document).unwrap();
        document.to_value()
    }

    #[test]
    fn test_resources_become_paths_with_component_schemas() {
        let person = person();
        let resolver = SerializationTreeResolver::default();
        let document = render(&[people_resource(&person)], &resolver);

        let list = &document["paths"]["/api/people"]["get"];
        assert_eq!(list["summary"], "List people");
        assert_eq!(list["operationId"], "people_get_api_people");
        let schema = &list["responses"]["200"]["content"]["application/json"]["schema"];
        assert_eq!(schema["type"], "array");
        assert_eq!(schema["items"]["$ref"], "#/components/schemas/Person");

        let update = &document["paths"]["/api/people/{id}"]["put"];
        assert_eq!(update["parameters"][0]["name"], "id");
        assert!(update["responses"]["204"].is_object());

        let person_schema = &document["components"]["schemas"]["Person"];
        assert_eq!(person_schema["required"], json!(["name"]));
        assert_eq!(person_schema["properties"]["age"]["format"], "int32");
        assert_eq!(person_schema["properties"]["age"]["maximum"], json!(150.0));
        assert_eq!(person_schema["properties"]["id"]["readOnly"], true);
    }

    #[test]
    fn test_recursive_records_use_references() {
        let link = FieldSetLink::new();
        let node = FieldSet::named(
            "Node",
            [
                FieldDefinition::new("label", parse("String")),
                FieldDefinition::new("children", parse("BTreeSet<PropertyBox>"))
                    .with_nested(link.clone()),
            ],
        )
        .unwrap();
        link.bind(&node).unwrap();

        let resolver = SerializationTreeResolver::default();
        let mut document = OpenApiDocument::new(DocsInfo::default(), &resolver);
        document.add_record_sets([&node]);
        let value = document.to_value();

        let children = &value["components"]["schemas"]["Node"]["properties"]["children"];
        assert_eq!(children["type"], "array");
        assert_eq!(children["uniqueItems"], true);
        assert_eq!(children["items"]["$ref"], "#/components/schemas/Node");
    }

    #[test]
    fn test_decorated_reference_is_wrapped() {
        let address = FieldSet::named("Address", [FieldDefinition::new("street", parse("String"))])
            .unwrap();
        let customer = FieldSet::named(
            "Customer",
            [FieldDefinition::new("home", parse("PropertyBox"))
                .with_nested(&address)
                .required()
                .read_only()],
        )
        .unwrap();

        let resolver = SerializationTreeResolver::default();
        let mut document = OpenApiDocument::new(DocsInfo::default(), &resolver);
        document.add_record_sets([&customer]);
        let value = document.to_value();

        let home = &value["components"]["schemas"]["Customer"]["properties"]["home"];
        assert_eq!(home["allOf"][0]["$ref"], "#/components/schemas/Address");
        assert_eq!(home["readOnly"], true);
        assert!(value["components"]["schemas"]["Address"].is_object());
    }

    #[test]
    fn test_providers_are_listed_and_duplicates_rejected() {
        let person = person();
        let resolver = SerializationTreeResolver::default();
        let provider = Candidate::new(
            "json",
            Lifecycle::Singleton,
            ComponentType::new("JsonProvider").provider(),
        );
        let document = render(&[provider, people_resource(&person)], &resolver);
        assert_eq!(document["x-providers"][0]["name"], "json");

        let pipeline = ResourceRegistrationPipeline::default();
        let descriptors = pipeline
            .discover(&[people_resource(&person), people_resource(&person)])
            .unwrap();
        let mut document = OpenApiDocument::new(DocsInfo::default(), &resolver);
        let report = pipeline.register_all(&descriptors, &mut document).unwrap_err();
        assert!(matches!(
            report.current_context(),
            propbox_schema::Error::Registration(message) if message.contains("duplicate operation GET")
        ));
    }

    #[test]
    fn test_scalar_payloads_use_value_schemas() {
        let component = ComponentType::new("Tags").with_path("/tags").with_operation(
            Operation::new(HttpMethod::Get).with_response(Body::new(parse("BTreeSet<String>"))),
        );
        let resolver = SerializationTreeResolver::default();
        let document = render(&[Candidate::new("tags", Lifecycle::Singleton, component)], &resolver);

        let schema = &document["paths"]["/api/tags"]["get"]["responses"]["200"]["content"]
            ["application/json"]["schema"];
        assert_eq!(schema["type"], "array");
        assert_eq!(schema["items"]["type"], "string");
        assert_eq!(schema["uniqueItems"], true);
        assert!(document.get("components").is_none());
    }

    #[test]
    fn test_nested_scalar_containers_render_items() {
        let sheet = FieldSet::named(
            "Sheet",
            [
                FieldDefinition::new("rows", parse("Vec<Vec<String>>")),
                FieldDefinition::new("buckets", parse("HashMap<String, BTreeSet<i32>>")),
            ],
        )
        .unwrap();

        let resolver = SerializationTreeResolver::default();
        let mut document = OpenApiDocument::new(DocsInfo::default(), &resolver);
        document.add_record_sets([&sheet]);
        let value = document.to_value();

        let properties = &value["components"]["schemas"]["Sheet"]["properties"];
        assert_eq!(properties["rows"]["type"], "array");
        assert_eq!(properties["rows"]["items"]["type"], "array");
        assert_eq!(properties["rows"]["items"]["items"]["type"], "string");

        let buckets = &properties["buckets"]["additionalProperties"];
        assert_eq!(buckets["type"], "array");
        assert_eq!(buckets["uniqueItems"], true);
        assert_eq!(buckets["items"]["format"], "int32");
    }

    #[test]
    fn test_complete_tree_replaces_truncated_component() {
        let leaf = FieldSet::named("Leaf", [FieldDefinition::new("id", parse("i64"))]).unwrap();
        let middle = FieldSet::named(
            "Middle",
            [FieldDefinition::new("leaf", parse("PropertyBox")).with_nested(&leaf)],
        )
        .unwrap();
        let root = FieldSet::named(
            "Root",
            [FieldDefinition::new("middle", parse("PropertyBox")).with_nested(&middle)],
        )
        .unwrap();

        let config = ResolverConfig {
            max_depth: 2,
            ..ResolverConfig::default()
        };
        let resolver = SerializationTreeResolver::with_config(SchemaFieldFactory::default(), config);
        let mut document = OpenApiDocument::new(DocsInfo::default(), &resolver);

        document.add_record_sets([&root]);
        let truncated = document.to_value();
        assert_eq!(
            truncated["components"]["schemas"]["Middle"]["properties"]["leaf"]["type"],
            "object"
        );
        assert!(truncated["components"]["schemas"].get("Leaf").is_none());

        document.add_record_sets([&middle]);
        let complete = document.to_value();
        let schemas = &complete["components"]["schemas"];
        assert_eq!(
            schemas["Middle"]["properties"]["leaf"]["$ref"],
            "#/components/schemas/Leaf"
        );
        assert_eq!(schemas["Leaf"]["properties"]["id"]["format"], "int64");

        // a later truncated occurrence does not undo the complete component
        document.add_record_sets([&root]);
        assert_eq!(document.to_value()["components"]["schemas"]["Middle"], schemas["Middle"]);
    }

    #[test]
    fn test_to_json_is_parseable() {
        let resolver = SerializationTreeResolver::default();
        let document = OpenApiDocument::new(DocsInfo::default(), &resolver);
        let json = document.to_json().unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["openapi"], OPENAPI_VERSION);
        assert_eq!(value["info"]["title"], "PropertyBox API");
        assert_eq!(document.path_count(), 0);
    }
}
