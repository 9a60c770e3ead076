//! Field filters applied before schema fields are built

use crate::model::FieldDefinition;

/// Decides which fields of a set appear in its tree
pub trait FieldFilter: Send + Sync {
    /// True to keep `field`
    fn accept(&self, field: &FieldDefinition) -> bool;
}

impl<F> FieldFilter for F
where
    F: Fn(&FieldDefinition) -> bool + Send + Sync,
{
    fn accept(&self, field: &FieldDefinition) -> bool { self(field) }
}

/// Keeps every field
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAllFields;

impl FieldFilter for AcceptAllFields {
    fn accept(&self, _field: &FieldDefinition) -> bool { true }
}

/// Keeps stored paths, dropping computed fields
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaPathsOnly;

impl FieldFilter for SchemaPathsOnly {
    fn accept(&self, field: &FieldDefinition) -> bool { !field.is_computed() }
}
