//! Ordered, immutable collections of field definitions

use std::collections::HashSet;
use std::sync::Arc;

use error_stack::Report;

use super::field::FieldDefinition;
use crate::error::{Error, Result};

/// The ordered, named collection of field definitions describing one record shape
///
/// Field sets are always shared as `Arc<FieldSet>` and the allocation is their identity: two
/// sets with identical content built separately are different sets as far as caching goes.
#[derive(Debug)]
pub struct FieldSet {
    name:   Option<String>,
    fields: Vec<FieldDefinition>,
}

impl FieldSet {
    /// Build an unnamed field set, rejecting duplicate field names
    pub fn new(fields: impl IntoIterator<Item = FieldDefinition>) -> Result<Arc<Self>> {
        Self::build(None, fields)
    }

    /// Build a named field set, rejecting duplicate field names
    ///
    /// The name labels the resolved tree and is used when a recursive reference to this set has
    /// to be emitted.
    pub fn named(
        name: impl Into<String>,
        fields: impl IntoIterator<Item = FieldDefinition>,
    ) -> Result<Arc<Self>> {
        Self::build(Some(name.into()), fields)
    }

    fn build(
        name: Option<String>,
        fields: impl IntoIterator<Item = FieldDefinition>,
    ) -> Result<Arc<Self>> {
        let fields: Vec<FieldDefinition> = fields.into_iter().collect();

        if let Some(duplicate) = first_duplicate(&fields) {
            return Err(Report::new(Error::DuplicateField {
                field: duplicate,
                set:   name,
            }));
        }

        Ok(Arc::new(Self { name, fields }))
    }

    /// Set name, if any
    pub fn name(&self) -> Option<&str> { self.name.as_deref() }

    /// Fields in declaration order
    pub fn fields(&self) -> &[FieldDefinition] { &self.fields }

    /// Look up a field by name
    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|field| field.name() == name)
    }

    /// Number of fields
    pub fn len(&self) -> usize { self.fields.len() }

    /// True when the set has no fields
    pub fn is_empty(&self) -> bool { self.fields.is_empty() }
}

fn first_duplicate(fields: &[FieldDefinition]) -> Option<String> {
    let mut seen = HashSet::with_capacity(fields.len());
    fields
        .iter()
        .find(|field| !seen.insert(field.name()))
        .map(|field| field.name().to_string())
}

/// Identity of a live field set: the address of its shared allocation
///
/// Only meaningful while the set is alive; the cache pairs it with a `Weak` to detect reuse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldSetId(usize);

impl FieldSetId {
    /// Identity of `field_set`
    pub fn of(field_set: &Arc<FieldSet>) -> Self { Self(Arc::as_ptr(field_set).addr()) }
}
