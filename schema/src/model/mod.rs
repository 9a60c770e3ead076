//! Record model consumed read-only by the schema engine
//!
//! Field definitions, field sets, validation rules, declared value types and localizable
//! labels. Everything here is immutable once built.

mod declared_type;
mod field;
mod field_set;
mod localization;
mod type_parser;
mod validation;

pub use declared_type::{DeclaredType, RawType, TypeArgument};
pub use field::{FieldDefinition, FieldSetLink, NestedFieldSet, TemporalType};
pub use field_set::{FieldSet, FieldSetId};
pub use localization::{Localizable, Localizer, MessageCatalog, NoLocalization};
pub use validation::{LengthRange, NumericRange, ValidationRule};
