//! Type classification
//!
//! Decides whether a declared type carries the record type and in which shape. Two strategies
//! exist: a generic-aware one that consults the host's `GenericTypeModel` to bind type
//! variables and expand named aliases, and a raw-type one that only trusts concrete type
//! arguments written on the declared type itself. The strategy is chosen once, when the
//! classifier is built.

mod generic_model;
mod type_shape;

use std::fmt;
use std::sync::Arc;

pub use generic_model::{DeclaredTypeExpr, GenericTypeModel, TypeBindings};
use tracing::{debug, warn};
pub use type_shape::TypeShape;

use crate::constants::MAX_ALIAS_HOPS;
use crate::model::{DeclaredType, RawType, TypeArgument};

/// Resolution strategy selected at construction
#[derive(Clone)]
enum Strategy {
    /// Precise path: variables and aliases resolved through the host model
    GenericAware(Arc<dyn GenericTypeModel>),
    /// Fallback path: only concrete arguments are visible
    RawType,
}

/// Classifies declared types as record bearing shapes
#[derive(Clone)]
pub struct TypeClassifier {
    strategy: Strategy,
}

impl TypeClassifier {
    /// Probe the host's capabilities and pick the matching strategy
    ///
    /// The generic-aware strategy is used when a model is available and reports generic
    /// support; otherwise classification falls back to raw types.
    pub fn probe(model: Option<Arc<dyn GenericTypeModel>>) -> Self {
        match model {
            Some(model) if model.supports_generics() => {
                debug!("Type classification uses generic-aware introspection");
                Self {
                    strategy: Strategy::GenericAware(model),
                }
            }
            Some(_) => {
                debug!("Generic type model reports no generic support, using raw types");
                Self::raw()
            }
            None => {
                debug!("No generic type model available, using raw types");
                Self::raw()
            }
        }
    }

    /// A classifier that only looks at raw types and concrete arguments
    pub const fn raw() -> Self {
        Self {
            strategy: Strategy::RawType,
        }
    }

    /// True when the generic-aware strategy was selected
    pub const fn is_generic_aware(&self) -> bool {
        matches!(self.strategy, Strategy::GenericAware(_))
    }

    /// Classify `declared` as a record bearing shape
    ///
    /// Returns `None` for types unrelated to the record type. `Option` is unwrapped one level
    /// only, so `Option<Option<PropertyBox>>` is not applicable.
    pub fn classify(&self, declared: &DeclaredType) -> Option<TypeShape> {
        self.classify_level(declared, true)
    }

    fn classify_level(&self, declared: &DeclaredType, allow_optional: bool) -> Option<TypeShape> {
        let declared = self.canonical(declared)?;
        match declared.raw() {
            RawType::Record => Some(TypeShape::Scalar),
            RawType::List => self.argument_is_record(&declared, 0).then(TypeShape::list),
            RawType::Set => self.argument_is_record(&declared, 0).then(TypeShape::set),
            RawType::Map => self.argument_is_record(&declared, 1).then(TypeShape::map),
            RawType::Optional if allow_optional => self
                .argument(&declared, 0)
                .and_then(|inner| self.classify_level(&inner, false))
                .map(TypeShape::optional),
            _ => None,
        }
    }

    /// Resolve named aliases to their generic supertype
    ///
    /// The raw-type strategy cannot see through aliases and returns the type unchanged. The
    /// generic-aware strategy follows at most `MAX_ALIAS_HOPS` aliases; longer chains are
    /// treated as malformed metadata.
    pub fn canonical(&self, declared: &DeclaredType) -> Option<DeclaredType> {
        let Strategy::GenericAware(model) = &self.strategy else {
            return Some(declared.clone());
        };

        let mut current = declared.clone();
        for _ in 0..MAX_ALIAS_HOPS {
            if current.raw() != RawType::Named {
                return Some(current);
            }
            match model.generic_supertype(current.name()) {
                Some(supertype) => current = supertype,
                None => return Some(current),
            }
        }

        warn!(
            declared_type = %declared,
            "Alias chain exceeds {MAX_ALIAS_HOPS} hops - treating type as unresolvable"
        );
        None
    }

    /// The generic argument at `index`, with variables bound where the strategy allows
    pub fn argument(&self, declared: &DeclaredType, index: usize) -> Option<DeclaredType> {
        match declared.argument(index)? {
            TypeArgument::Concrete(argument) => Some(argument.clone()),
            TypeArgument::Variable(variable) => match &self.strategy {
                Strategy::GenericAware(model) => model.bound_variable(variable),
                Strategy::RawType => None,
            },
        }
    }

    fn argument_is_record(&self, declared: &DeclaredType, index: usize) -> bool {
        self.argument(declared, index)
            .and_then(|argument| self.canonical(&argument))
            .is_some_and(|argument| argument.raw() == RawType::Record)
    }
}

impl Default for TypeClassifier {
    fn default() -> Self { Self::raw() }
}

impl fmt::Debug for TypeClassifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let strategy = match self.strategy {
            Strategy::GenericAware(_) => "GenericAware",
            Strategy::RawType => "RawType",
        };
        f.debug_struct("TypeClassifier")
            .field("strategy", &strategy)
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests")]
mod tests {
    use super::*;

    fn parse(expression: &str) -> DeclaredType { DeclaredType::parse(expression).unwrap() }

    fn generic_classifier() -> TypeClassifier {
        let bindings = TypeBindings::new()
            .bind_variable("T", DeclaredType::record())
            .bind_variable("N", DeclaredType::new("i32"))
            .alias("PersonList", parse("Vec<PropertyBox>"))
            .alias("Roster", DeclaredType::new("PersonList"))
            .alias("Loop", DeclaredType::new("Loop"));
        TypeClassifier::probe(Some(Arc::new(bindings)))
    }

    #[test]
    fn test_bare_and_wrapped_records() {
        for classifier in [TypeClassifier::raw(), generic_classifier()] {
            assert_eq!(classifier.classify(&parse("PropertyBox")), Some(TypeShape::Scalar));
            assert_eq!(classifier.classify(&parse("Vec<PropertyBox>")), Some(TypeShape::list()));
            assert_eq!(
                classifier.classify(&parse("BTreeSet<PropertyBox>")),
                Some(TypeShape::Set {
                    element_is_record: true,
                    unique_items:      true,
                })
            );
            assert_eq!(
                classifier.classify(&parse("HashMap<String, PropertyBox>")),
                Some(TypeShape::map())
            );
            assert_eq!(
                classifier.classify(&parse("Option<PropertyBox>")),
                Some(TypeShape::optional(TypeShape::Scalar))
            );
            assert_eq!(
                classifier.classify(&parse("Option<Vec<PropertyBox>>")),
                Some(TypeShape::optional(TypeShape::list()))
            );
        }
    }

    #[test]
    fn test_unrelated_types_are_not_applicable() {
        let classifier = TypeClassifier::raw();
        assert_eq!(classifier.classify(&parse("Vec<i32>")), None);
        assert_eq!(classifier.classify(&parse("String")), None);
        assert_eq!(classifier.classify(&parse("HashMap<PropertyBox, String>")), None);
        assert_eq!(classifier.classify(&parse("Vec<Vec<PropertyBox>>")), None);
        assert_eq!(classifier.classify(&parse("Option<Option<PropertyBox>>")), None);
    }

    #[test]
    fn test_bare_container_is_never_record_bearing() {
        for classifier in [TypeClassifier::raw(), generic_classifier()] {
            assert_eq!(classifier.classify(&parse("Vec")), None);
            assert_eq!(classifier.classify(&parse("HashMap<String>")), None);
        }
    }

    #[test]
    fn test_raw_strategy_cannot_see_variables_or_aliases() {
        let classifier = TypeClassifier::raw();
        assert!(!classifier.is_generic_aware());
        assert_eq!(classifier.classify(&parse("Vec<T>")), None);
        assert_eq!(classifier.classify(&parse("PersonList")), None);
    }

    #[test]
    fn test_generic_strategy_binds_variables_and_aliases() {
        let classifier = generic_classifier();
        assert!(classifier.is_generic_aware());
        assert_eq!(classifier.classify(&parse("Vec<T>")), Some(TypeShape::list()));
        assert_eq!(classifier.classify(&parse("Vec<N>")), None);
        assert_eq!(classifier.classify(&parse("Vec<U>")), None);
        assert_eq!(classifier.classify(&parse("PersonList")), Some(TypeShape::list()));
        assert_eq!(
            classifier.classify(&parse("Option<Roster>")),
            Some(TypeShape::optional(TypeShape::list()))
        );
        assert_eq!(classifier.classify(&parse("Loop")), None);
    }

    #[test]
    fn test_probe_falls_back_without_generic_support() {
        struct Erased;
        impl GenericTypeModel for Erased {
            fn supports_generics(&self) -> bool { false }

            fn bound_variable(&self, _variable: &str) -> Option<DeclaredType> {
                Some(DeclaredType::record())
            }

            fn generic_supertype(&self, _type_name: &str) -> Option<DeclaredType> { None }
        }

        let classifier = TypeClassifier::probe(Some(Arc::new(Erased)));
        assert!(!classifier.is_generic_aware());
        assert_eq!(classifier.classify(&parse("Vec<T>")), None);
        assert!(!TypeClassifier::probe(None).is_generic_aware());
    }
}
