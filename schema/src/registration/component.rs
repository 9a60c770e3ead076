//! Managed components offered to the registration pipeline

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use crate::model::{DeclaredType, FieldSet};

/// Lifecycle a managed object is registered with
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    AsRefStr,
    EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Lifecycle {
    /// One shared instance
    #[default]
    Singleton,
    /// A new instance per lookup
    Prototype,
    /// One instance per request
    Request,
    /// One instance per session
    Session,
}

/// HTTP method of an endpoint operation
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum HttpMethod {
    Get,
    Put,
    Post,
    Delete,
    Patch,
    Head,
    Options,
}

/// Request or response payload of an operation
#[derive(Debug, Clone)]
pub struct Body {
    /// Declared payload type
    pub value_type: DeclaredType,
    /// Field set describing record payloads
    pub field_set:  Option<Arc<FieldSet>>,
}

impl Body {
    /// A payload of the given type
    pub const fn new(value_type: DeclaredType) -> Self {
        Self {
            value_type,
            field_set: None,
        }
    }

    /// A record payload described by `field_set`
    #[must_use]
    pub fn with_field_set(mut self, field_set: &Arc<FieldSet>) -> Self {
        self.field_set = Some(Arc::clone(field_set));
        self
    }
}

/// One operation exposed by an endpoint
#[derive(Debug, Clone)]
pub struct Operation {
    method:   HttpMethod,
    path:     Option<String>,
    request:  Option<Body>,
    response: Option<Body>,
    summary:  Option<String>,
}

impl Operation {
    /// An operation on the endpoint's own path
    pub const fn new(method: HttpMethod) -> Self {
        Self {
            method,
            path: None,
            request: None,
            response: None,
            summary: None,
        }
    }

    /// Path relative to the endpoint path
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Request payload
    #[must_use]
    pub fn with_request(mut self, body: Body) -> Self {
        self.request = Some(body);
        self
    }

    /// Response payload
    #[must_use]
    pub fn with_response(mut self, body: Body) -> Self {
        self.response = Some(body);
        self
    }

    /// One line description
    #[must_use]
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub const fn method(&self) -> HttpMethod { self.method }

    pub fn path(&self) -> Option<&str> { self.path.as_deref() }

    pub const fn request(&self) -> Option<&Body> { self.request.as_ref() }

    pub const fn response(&self) -> Option<&Body> { self.response.as_ref() }

    pub fn summary(&self) -> Option<&str> { self.summary.as_deref() }
}

/// Type of a managed component
///
/// Paths, the provider marker and operations are inherited along the supertype chain.
#[derive(Debug, Clone, Default)]
pub struct ComponentType {
    name:       String,
    path:       Option<String>,
    provider:   bool,
    operations: Vec<Operation>,
    supertype:  Option<Arc<Self>>,
}

impl ComponentType {
    /// A plain component type
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Declare the resource path
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Mark the type as a provider
    #[must_use]
    pub const fn provider(mut self) -> Self {
        self.provider = true;
        self
    }

    /// Add an operation
    #[must_use]
    pub fn with_operation(mut self, operation: Operation) -> Self {
        self.operations.push(operation);
        self
    }

    /// Set the supertype
    #[must_use]
    pub fn with_supertype(mut self, supertype: Arc<Self>) -> Self {
        self.supertype = Some(supertype);
        self
    }

    /// Type name
    pub fn name(&self) -> &str { &self.name }

    /// The supertype, if any
    pub const fn supertype(&self) -> Option<&Arc<Self>> { self.supertype.as_ref() }

    /// This type followed by its supertypes, nearest first
    pub fn lineage(&self) -> impl Iterator<Item = &Self> {
        std::iter::successors(Some(self), |component| component.supertype.as_deref())
    }

    /// The nearest declared path along the supertype chain
    pub fn effective_path(&self) -> Option<&str> {
        self.lineage().find_map(|component| component.path.as_deref())
    }

    /// True when this type or any supertype is a provider
    pub fn is_provider(&self) -> bool { self.lineage().any(|component| component.provider) }

    /// Own operations followed by inherited ones
    pub fn effective_operations(&self) -> impl Iterator<Item = &Operation> {
        self.lineage()
            .flat_map(|component| component.operations.iter())
    }
}

/// A managed object offered for registration
#[derive(Debug, Clone)]
pub struct Candidate {
    /// Managed object name
    pub name:      String,
    /// Registered lifecycle
    pub lifecycle: Lifecycle,
    /// Component type
    pub component: Arc<ComponentType>,
}

impl Candidate {
    /// A candidate with the given lifecycle
    pub fn new(
        name: impl Into<String>,
        lifecycle: Lifecycle,
        component: impl Into<Arc<ComponentType>>,
    ) -> Self {
        Self {
            name: name.into(),
            lifecycle,
            component: component.into(),
        }
    }
}
