//! Schema resolution for dynamic `PropertyBox` records
//!
//! `PropertyBox` records carry their shape at runtime, as a `FieldSet` of typed field
//! definitions, instead of as a static type. This crate turns those field sets into
//! documentation-ready serialization trees:
//!
//! - [`classify::TypeClassifier`] detects record bearing declared types (`PropertyBox`,
//!   `Vec<PropertyBox>`, `Option<PropertyBox>`, ...)
//! - [`constraints::map_constraints`] maps validation rules to schema constraints
//! - [`factory::SchemaFieldFactory`] builds one schema field per field definition
//! - [`resolve::SerializationTreeResolver`] walks field sets recursively behind a weak-keyed
//!   concurrent cache
//! - [`registration::ResourceRegistrationPipeline`] discovers the endpoints whose payloads get
//!   resolved
//!
//! ```
//! use propbox_schema::model::{DeclaredType, FieldDefinition, FieldSet, ValidationRule};
//! use propbox_schema::resolve::SerializationTreeResolver;
//!
//! # fn main() -> propbox_schema::Result<()> {
//! let person = FieldSet::named(
//!     "Person",
//!     [
//!         FieldDefinition::new("name", DeclaredType::string()).required(),
//!         FieldDefinition::new("age", DeclaredType::parse("i32")?)
//!             .with_rule(ValidationRule::range(0.0, 150.0)),
//!     ],
//! )?;
//!
//! let tree = SerializationTreeResolver::default().resolve(&person);
//! assert_eq!(tree.fields().len(), 2);
//! # Ok(())
//! # }
//! ```

pub mod classify;
mod constants;
pub mod constraints;
pub mod error;
pub mod factory;
pub mod model;
pub mod registration;
pub mod resolve;
pub mod tree;

pub use constants::{CACHE_SWEEP_INTERVAL, MAX_NESTING_DEPTH};
pub use error::{Error, Result};
