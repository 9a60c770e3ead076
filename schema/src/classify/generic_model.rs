//! Generic type introspection supplied by the host
//!
//! The host's type metadata may know more than a declared type shows on its face: what a type
//! variable is bound to, or that a named type such as `PersonList` is really a
//! `Vec<PropertyBox>`. A `GenericTypeModel` exposes that knowledge to the classifier.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::DeclaredType;

/// Generic-aware view of the host's type metadata
pub trait GenericTypeModel: Send + Sync {
    /// Capability probe: `false` when the host cannot resolve generics at all
    fn supports_generics(&self) -> bool { true }

    /// The concrete type a type variable is bound to
    fn bound_variable(&self, variable: &str) -> Option<DeclaredType>;

    /// The generic supertype of a named type
    fn generic_supertype(&self, type_name: &str) -> Option<DeclaredType>;
}

/// A `GenericTypeModel` backed by explicit tables
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TypeBindings {
    /// Type variable bindings
    #[serde(default)]
    variables: HashMap<String, DeclaredTypeExpr>,
    /// Named type to generic supertype
    #[serde(default)]
    aliases:   HashMap<String, DeclaredTypeExpr>,
}

/// A declared type stored as its parsed form
///
/// Serialized as the type expression string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DeclaredTypeExpr(DeclaredType);

impl TryFrom<String> for DeclaredTypeExpr {
    type Error = String;

    fn try_from(expression: String) -> Result<Self, Self::Error> {
        DeclaredType::parse(&expression)
            .map(Self)
            .map_err(|report| report.current_context().to_string())
    }
}

impl From<DeclaredTypeExpr> for String {
    fn from(expression: DeclaredTypeExpr) -> Self { expression.0.to_string() }
}

impl From<DeclaredType> for DeclaredTypeExpr {
    fn from(declared: DeclaredType) -> Self { Self(declared) }
}

impl TypeBindings {
    /// Create empty bindings
    pub fn new() -> Self { Self::default() }

    /// Bind a type variable
    #[must_use]
    pub fn bind_variable(mut self, variable: impl Into<String>, bound: DeclaredType) -> Self {
        self.variables.insert(variable.into(), bound.into());
        self
    }

    /// Declare the generic supertype of a named type
    #[must_use]
    pub fn alias(mut self, type_name: impl Into<String>, supertype: DeclaredType) -> Self {
        self.aliases.insert(type_name.into(), supertype.into());
        self
    }

    /// True when nothing is bound
    pub fn is_empty(&self) -> bool { self.variables.is_empty() && self.aliases.is_empty() }
}

impl GenericTypeModel for TypeBindings {
    fn bound_variable(&self, variable: &str) -> Option<DeclaredType> {
        self.variables.get(variable).map(|bound| bound.0.clone())
    }

    fn generic_supertype(&self, type_name: &str) -> Option<DeclaredType> {
        self.aliases.get(type_name).map(|supertype| supertype.0.clone())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests")]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_bindings_deserialize_type_expressions() {
        let bindings: TypeBindings = serde_json::from_value(json!({
            "variables": { "T": "PropertyBox" },
            "aliases": { "PersonList": "Vec<PropertyBox>" }
        }))
        .unwrap();

        assert_eq!(bindings.bound_variable("T"), Some(DeclaredType::record()));
        assert_eq!(
            bindings.generic_supertype("PersonList"),
            Some(DeclaredType::list_of(DeclaredType::record()))
        );
        assert_eq!(bindings.generic_supertype("Person"), None);
    }

    #[test]
    fn test_invalid_expression_is_rejected() {
        let result: Result<TypeBindings, _> =
            serde_json::from_value(json!({ "aliases": { "Broken": "Vec<" } }));
        assert!(result.is_err());
    }
}
