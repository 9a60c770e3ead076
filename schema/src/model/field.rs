//! Field definitions: one named, typed, validated slot of a record

use std::sync::{Arc, OnceLock, Weak};

use error_stack::Report;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use super::declared_type::DeclaredType;
use super::field_set::FieldSet;
use super::localization::Localizable;
use super::validation::ValidationRule;
use crate::error::{Error, Result};

/// Temporal granularity of date/calendar typed fields
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, AsRefStr, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TemporalType {
    /// Date only
    Date,
    /// Time of day only
    Time,
    /// Date and time
    DateTime,
}

/// Immutable descriptor of one record field
#[derive(Debug, Clone)]
pub struct FieldDefinition {
    name:       String,
    value_type: DeclaredType,
    read_only:  bool,
    temporal:   Option<TemporalType>,
    validators: Vec<ValidationRule>,
    label:      Option<Localizable>,
    nested:     Option<NestedFieldSet>,
    computed:   bool,
}

impl FieldDefinition {
    /// Create a field with the given name and value type
    pub fn new(name: impl Into<String>, value_type: DeclaredType) -> Self {
        Self {
            name: name.into(),
            value_type,
            read_only: false,
            temporal: None,
            validators: Vec::new(),
            label: None,
            nested: None,
            computed: false,
        }
    }

    /// Mark the field read-only
    #[must_use]
    pub const fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    /// Set the temporal granularity
    #[must_use]
    pub const fn with_temporal(mut self, temporal: TemporalType) -> Self {
        self.temporal = Some(temporal);
        self
    }

    /// Add a validation rule; rules keep their declaration order
    #[must_use]
    pub fn with_rule(mut self, rule: ValidationRule) -> Self {
        self.validators.push(rule);
        self
    }

    /// Add the `Required` rule
    #[must_use]
    pub fn required(self) -> Self { self.with_rule(ValidationRule::Required) }

    /// Set the localizable label
    #[must_use]
    pub fn with_label(mut self, label: Localizable) -> Self {
        self.label = Some(label);
        self
    }

    /// Attach the field set describing the nested record
    #[must_use]
    pub fn with_nested(mut self, nested: impl Into<NestedFieldSet>) -> Self {
        self.nested = Some(nested.into());
        self
    }

    /// Mark the field as computed rather than a stored path
    #[must_use]
    pub const fn computed(mut self) -> Self {
        self.computed = true;
        self
    }

    /// Field name, unique within its set
    pub fn name(&self) -> &str { &self.name }

    /// Declared value type
    pub const fn value_type(&self) -> &DeclaredType { &self.value_type }

    /// Read-only flag
    pub const fn is_read_only(&self) -> bool { self.read_only }

    /// Temporal granularity, if declared
    pub const fn temporal(&self) -> Option<TemporalType> { self.temporal }

    /// Validation rules in declaration order
    pub fn validators(&self) -> &[ValidationRule] { &self.validators }

    /// Localizable label, if declared
    pub const fn label(&self) -> Option<&Localizable> { self.label.as_ref() }

    /// Nested record field set reference, if declared
    pub const fn nested(&self) -> Option<&NestedFieldSet> { self.nested.as_ref() }

    /// True for computed (virtual) fields
    pub const fn is_computed(&self) -> bool { self.computed }
}

/// Reference from a record typed field to the field set of the nested record
#[derive(Debug, Clone)]
pub enum NestedFieldSet {
    /// Strong reference, for acyclic models
    Owned(Arc<FieldSet>),
    /// Late-bound weak reference, for models whose records refer to each other
    Linked(FieldSetLink),
}

impl NestedFieldSet {
    /// The referenced field set, `None` when a link is unbound or its target was dropped
    pub fn get(&self) -> Option<Arc<FieldSet>> {
        match self {
            Self::Owned(field_set) => Some(Arc::clone(field_set)),
            Self::Linked(link) => link.get(),
        }
    }
}

impl From<Arc<FieldSet>> for NestedFieldSet {
    fn from(field_set: Arc<FieldSet>) -> Self { Self::Owned(field_set) }
}

impl From<&Arc<FieldSet>> for NestedFieldSet {
    fn from(field_set: &Arc<FieldSet>) -> Self { Self::Owned(Arc::clone(field_set)) }
}

impl From<FieldSetLink> for NestedFieldSet {
    fn from(link: FieldSetLink) -> Self { Self::Linked(link) }
}

/// A write-once weak slot pointing at a field set
///
/// Clones share the slot, so a link can be handed to fields before its target exists and bound
/// once the target has been built.
#[derive(Clone, Default)]
pub struct FieldSetLink(Arc<OnceLock<Weak<FieldSet>>>);

impl FieldSetLink {
    /// Create an unbound link
    pub fn new() -> Self { Self::default() }

    /// Bind the link to its target; a link can only be bound once
    pub fn bind(&self, target: &Arc<FieldSet>) -> Result<()> {
        self.0.set(Arc::downgrade(target)).map_err(|_| {
            Report::new(Error::invalid(
                "field set link",
                format!(
                    "already bound, cannot rebind to {}",
                    target.name().unwrap_or("<unnamed>")
                ),
            ))
        })
    }

    /// The target, if bound and still alive
    pub fn get(&self) -> Option<Arc<FieldSet>> { self.0.get().and_then(Weak::upgrade) }

    /// True once `bind` succeeded
    pub fn is_bound(&self) -> bool { self.0.get().is_some() }
}

impl std::fmt::Debug for FieldSetLink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // never print the target: linked models may be cyclic
        let target = self.get();
        f.debug_struct("FieldSetLink")
            .field("bound", &self.is_bound())
            .field("target", &target.as_ref().and_then(|set| set.name()))
            .finish()
    }
}
