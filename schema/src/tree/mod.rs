//! Serialization trees: the resolved, schema-ready shape of a field set
//!
//! A tree is immutable once built and refers to nested trees through `Arc`, never to the field
//! sets they were built from, so a cached tree never keeps its key alive.

mod primitive_kind;

use std::sync::Arc;

pub use primitive_kind::SchemaPrimitiveKind;

use crate::constraints::ConstraintSet;

/// The resolved shape of one field set
#[derive(Debug, Clone, PartialEq)]
pub struct SerializationTree {
    name:   Option<String>,
    fields: Vec<SchemaField>,
}

impl SerializationTree {
    /// Create a tree from fields in field set order
    pub const fn new(name: Option<String>, fields: Vec<SchemaField>) -> Self {
        Self { name, fields }
    }

    /// Name of the field set the tree was built from
    pub fn name(&self) -> Option<&str> { self.name.as_deref() }

    /// Fields in field set order
    pub fn fields(&self) -> &[SchemaField] { &self.fields }

    /// Look up a field by name
    pub fn field(&self, name: &str) -> Option<&SchemaField> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Names of required fields, in order
    pub fn required_fields(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .filter(|field| field.constraints.required)
            .map(|field| field.name.as_str())
    }

    /// True when expansion stopped at the nesting depth bound anywhere below this tree
    pub fn is_truncated(&self) -> bool { self.fields.iter().any(SchemaField::is_truncated) }
}

/// One field of a serialization tree
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaField {
    /// Field name
    pub name:         String,
    /// Primitive kind
    pub kind:         SchemaPrimitiveKind,
    /// Type table format such as `int32` or `uuid`
    pub format:       Option<String>,
    /// Array items or map values
    pub element:      Option<ElementSchema>,
    /// Set semantics for arrays
    pub unique_items: bool,
    /// Nested record schema of a bare or optional record field
    pub nested:       Option<NestedSchema>,
    /// Mapped validation constraints
    pub constraints:  ConstraintSet,
    /// Read-only flag copied from the field definition
    pub read_only:    bool,
    /// Localized label
    pub title:        Option<String>,
}

impl SchemaField {
    /// A field of the given kind with nothing else set
    pub fn new(name: impl Into<String>, kind: SchemaPrimitiveKind) -> Self {
        Self {
            name: name.into(),
            kind,
            format: None,
            element: None,
            unique_items: false,
            nested: None,
            constraints: ConstraintSet::default(),
            read_only: false,
            title: None,
        }
    }

    /// True when the field is an array
    pub fn is_array(&self) -> bool { self.kind == SchemaPrimitiveKind::Array }

    /// True when the field is an object with record values (a map of records)
    pub const fn is_record_map(&self) -> bool {
        matches!(self.kind, SchemaPrimitiveKind::Object)
            && matches!(self.element, Some(ElementSchema::Record(_)))
    }

    /// The nested record schema, whether bare or held as array items or map values
    pub fn record_schema(&self) -> Option<&NestedSchema> {
        self.nested.as_ref().or(match &self.element {
            Some(ElementSchema::Record(nested)) => Some(nested),
            _ => None,
        })
    }

    fn is_truncated(&self) -> bool {
        self.nested.as_ref().is_some_and(NestedSchema::is_truncated)
            || self.element.as_ref().is_some_and(ElementSchema::is_truncated)
    }
}

/// Schema of array items or map values
#[derive(Debug, Clone, PartialEq)]
pub enum ElementSchema {
    /// A primitive element
    Primitive {
        /// Element kind
        kind:   SchemaPrimitiveKind,
        /// Element format
        format: Option<String>,
    },
    /// A container element, as in `Vec<Vec<String>>`
    Container {
        /// `Array` or `Object`
        kind:         SchemaPrimitiveKind,
        /// Items or values of the inner container
        element:      Box<ElementSchema>,
        /// Set semantics for an inner array
        unique_items: bool,
    },
    /// A record element
    Record(NestedSchema),
}

impl ElementSchema {
    fn is_truncated(&self) -> bool {
        match self {
            Self::Primitive { .. } => false,
            Self::Container { element, .. } => element.is_truncated(),
            Self::Record(nested) => nested.is_truncated(),
        }
    }
}

/// Schema of a nested record
#[derive(Debug, Clone, PartialEq)]
pub enum NestedSchema {
    /// The fully resolved nested tree
    Tree(Arc<SerializationTree>),
    /// Reference to a field set already being expanded on the current path
    Recursive {
        /// Name of the referenced set, if it has one
        name: Option<String>,
    },
    /// Expansion stopped at the nesting depth bound
    Truncated,
    /// A record without a declared field set: a free-form object
    Opaque,
}

impl NestedSchema {
    /// The resolved tree, if this schema is fully expanded
    pub fn tree(&self) -> Option<&Arc<SerializationTree>> {
        match self {
            Self::Tree(tree) => Some(tree),
            _ => None,
        }
    }

    fn is_truncated(&self) -> bool {
        match self {
            Self::Tree(tree) => tree.is_truncated(),
            Self::Truncated => true,
            Self::Recursive { .. } | Self::Opaque => false,
        }
    }
}
