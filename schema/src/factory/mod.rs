//! One field definition to one schema field
//!
//! The factory picks the primitive kind of a field, expands record shapes through the
//! resolver it is handed, maps validation rules and resolves the field's title. Fields whose
//! type has no schema mapping are skipped with a warning, never an error.

mod type_table;

use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};
pub use type_table::ScalarSchema;
use type_table::{scalar_schema, temporal_schema};

use crate::classify::{TypeClassifier, TypeShape};
use crate::constants::MAX_ALIAS_HOPS;
use crate::constraints::map_constraints;
use crate::model::{
    DeclaredType, FieldDefinition, FieldSet, Localizer, NoLocalization, RawType, TemporalType,
};
use crate::tree::{ElementSchema, NestedSchema, SchemaField, SchemaPrimitiveKind};

/// Resolves the schema of a nested record while a field is being built
pub trait NestedResolver {
    /// Schema of the record described by `field_set`
    fn resolve_nested(&mut self, field_set: &Arc<FieldSet>) -> NestedSchema;
}

/// Builds schema fields from field definitions
pub trait FieldSchemaBuilder: Send + Sync {
    /// Build the schema of `field`, `None` when the field cannot be mapped
    fn build(
        &self,
        field: &FieldDefinition,
        nested: &mut dyn NestedResolver,
    ) -> Option<SchemaField>;
}

impl<B: FieldSchemaBuilder + ?Sized> FieldSchemaBuilder for Arc<B> {
    fn build(
        &self,
        field: &FieldDefinition,
        nested: &mut dyn NestedResolver,
    ) -> Option<SchemaField> {
        (**self).build(field, nested)
    }
}

/// The default `FieldSchemaBuilder`
#[derive(Clone)]
pub struct SchemaFieldFactory {
    classifier: TypeClassifier,
    localizer:  Arc<dyn Localizer>,
}

/// Kind, format and element of a non-record value
struct ValueShape {
    kind:         SchemaPrimitiveKind,
    format:       Option<&'static str>,
    element:      Option<ElementSchema>,
    unique_items: bool,
}

impl ValueShape {
    const fn scalar((kind, format): ScalarSchema) -> Self {
        Self {
            kind,
            format,
            element: None,
            unique_items: false,
        }
    }

    fn into_field(self, name: &str) -> SchemaField {
        let mut field = SchemaField::new(name, self.kind);
        field.format = self.format.map(str::to_string);
        field.element = self.element;
        field.unique_items = self.unique_items;
        field
    }
}

impl SchemaFieldFactory {
    /// Create a factory that resolves titles from default label texts only
    pub fn new(classifier: TypeClassifier) -> Self {
        Self {
            classifier,
            localizer: Arc::new(NoLocalization),
        }
    }

    /// Resolve titles through `localizer`
    #[must_use]
    pub fn with_localizer(mut self, localizer: Arc<dyn Localizer>) -> Self {
        self.localizer = localizer;
        self
    }

    /// The classifier used to detect record shapes
    pub const fn classifier(&self) -> &TypeClassifier { &self.classifier }

    /// Kind and format of a scalar declared type
    ///
    /// Temporal types follow the field's granularity; everything else goes through the type
    /// table. Containers, optionals and unknown named types have no scalar schema.
    pub fn primitive_of(
        &self,
        declared: &DeclaredType,
        temporal: Option<TemporalType>,
    ) -> Option<ScalarSchema> {
        let raw = self.classifier.canonical(declared)?.raw();
        if raw.is_temporal() {
            Some(temporal_schema(raw, temporal))
        } else {
            scalar_schema(raw)
        }
    }

    /// Schema field of a non-record value type: scalars, optionals and containers of scalars
    ///
    /// No constraints, title or nested record are attached.
    pub fn value_field(
        &self,
        name: &str,
        declared: &DeclaredType,
        temporal: Option<TemporalType>,
    ) -> Option<SchemaField> {
        self.value_shape(declared, temporal, 0)
            .map(|shape| shape.into_field(name))
    }

    fn value_shape(
        &self,
        declared: &DeclaredType,
        temporal: Option<TemporalType>,
        depth: usize,
    ) -> Option<ValueShape> {
        if depth > MAX_ALIAS_HOPS {
            return None;
        }
        let declared = self.classifier.canonical(declared)?;
        match declared.raw() {
            RawType::Optional => {
                let inner = self.classifier.argument(&declared, 0)?;
                self.value_shape(&inner, temporal, depth + 1)
            }
            raw @ (RawType::List | RawType::Set) => Some(ValueShape {
                kind:         SchemaPrimitiveKind::Array,
                format:       None,
                element:      Some(self.element_schema(&declared, 0, temporal, depth)?),
                unique_items: raw == RawType::Set,
            }),
            RawType::Map => Some(ValueShape {
                kind:         SchemaPrimitiveKind::Object,
                format:       None,
                element:      Some(self.element_schema(&declared, 1, temporal, depth)?),
                unique_items: false,
            }),
            _ => self.primitive_of(&declared, temporal).map(ValueShape::scalar),
        }
    }

    fn element_schema(
        &self,
        container: &DeclaredType,
        index: usize,
        temporal: Option<TemporalType>,
        depth: usize,
    ) -> Option<ElementSchema> {
        let element = self.classifier.argument(container, index)?;
        let shape = self.value_shape(&element, temporal, depth + 1)?;
        Some(match shape.element {
            Some(inner) => ElementSchema::Container {
                kind:         shape.kind,
                element:      Box::new(inner),
                unique_items: shape.unique_items,
            },
            None => ElementSchema::Primitive {
                kind:   shape.kind,
                format: shape.format.map(str::to_string),
            },
        })
    }

    fn record_field(
        &self,
        field: &FieldDefinition,
        shape: &TypeShape,
        nested: &mut dyn NestedResolver,
    ) -> Option<SchemaField> {
        let record = match field.nested() {
            None => NestedSchema::Opaque,
            Some(reference) => {
                let Some(field_set) = reference.get() else {
                    warn!(
                        field = field.name(),
                        "Nested field set is unbound or was dropped - skipping field"
                    );
                    return None;
                };
                nested.resolve_nested(&field_set)
            }
        };

        debug!(
            field = field.name(),
            shape = %shape,
            "Resolved record {} of field",
            shape.child_terminology()
        );

        let schema = match shape.unwrapped() {
            TypeShape::Scalar | TypeShape::Optional(_) => {
                let mut schema = SchemaField::new(field.name(), SchemaPrimitiveKind::Object);
                schema.nested = Some(record);
                schema
            }
            TypeShape::List { .. } => {
                let mut schema = SchemaField::new(field.name(), SchemaPrimitiveKind::Array);
                schema.element = Some(ElementSchema::Record(record));
                schema
            }
            TypeShape::Set { unique_items, .. } => {
                let mut schema = SchemaField::new(field.name(), SchemaPrimitiveKind::Array);
                schema.element = Some(ElementSchema::Record(record));
                schema.unique_items = *unique_items;
                schema
            }
            TypeShape::Map { .. } => {
                let mut schema = SchemaField::new(field.name(), SchemaPrimitiveKind::Object);
                schema.element = Some(ElementSchema::Record(record));
                schema
            }
        };
        Some(schema)
    }
}

impl Default for SchemaFieldFactory {
    fn default() -> Self { Self::new(TypeClassifier::default()) }
}

impl FieldSchemaBuilder for SchemaFieldFactory {
    fn build(
        &self,
        field: &FieldDefinition,
        nested: &mut dyn NestedResolver,
    ) -> Option<SchemaField> {
        let mut schema = match self.classifier.classify(field.value_type()) {
            Some(shape) => self.record_field(field, &shape, nested)?,
            None => {
                let Some(schema) =
                    self.value_field(field.name(), field.value_type(), field.temporal())
                else {
                    warn!(
                        field = field.name(),
                        value_type = %field.value_type(),
                        "Field type has no schema mapping - skipping field"
                    );
                    return None;
                };
                schema
            }
        };

        schema.constraints = map_constraints(field.validators(), schema.kind);
        schema.read_only = field.is_read_only();
        schema.title = field
            .label()
            .and_then(|label| self.localizer.localize(label));
        Some(schema)
    }
}

impl fmt::Debug for SchemaFieldFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaFieldFactory")
            .field("classifier", &self.classifier)
            .finish_non_exhaustive()
    }
}
