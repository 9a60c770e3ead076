//! Declared value types of record fields
//!
//! A `DeclaredType` is the metadata the record model carries about a field's value type: a
//! type name plus its ordered generic arguments. Arguments are either concrete types or type
//! variables that only a generic-aware type model can bind.

use std::fmt;
use std::str::FromStr;

use error_stack::Report;
use itertools::Itertools;
use strum_macros::EnumString;

use super::type_parser::parse_declared_type;
use crate::constants::{
    TYPE_BTREE_MAP, TYPE_BTREE_SET, TYPE_HASH_MAP, TYPE_HASH_SET, TYPE_OPTION, TYPE_PROPERTY_BOX,
    TYPE_STRING, TYPE_VEC,
};
use crate::error::{Error, Result};

/// A declared type: name plus generic arguments
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeclaredType {
    name:      String,
    arguments: Vec<TypeArgument>,
}

/// One generic argument of a declared type
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeArgument {
    /// A concrete type
    Concrete(DeclaredType),
    /// An unbound type variable such as `T`
    Variable(String),
}

/// Known type names, recognised from the last path segment of a declared type
///
/// Aliases map several spellings onto one raw type (`Vec` and `List` are both lists).
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
pub enum RawType {
    /// The record type
    #[strum(serialize = "PropertyBox")]
    Record,
    /// Ordered collection
    #[strum(serialize = "Vec", serialize = "List")]
    List,
    /// Collection of unique items
    #[strum(serialize = "HashSet", serialize = "BTreeSet", serialize = "Set")]
    Set,
    /// Keyed collection
    #[strum(serialize = "HashMap", serialize = "BTreeMap", serialize = "Map")]
    Map,
    /// Optional value
    #[strum(serialize = "Option")]
    Optional,
    /// Text
    #[strum(serialize = "String", serialize = "str")]
    String,
    /// Single character
    #[strum(serialize = "char")]
    Char,
    /// Boolean
    #[strum(serialize = "bool")]
    Bool,
    /// Integers that fit a signed 32 bit schema integer
    #[strum(serialize = "i8", serialize = "i16", serialize = "i32", serialize = "u8", serialize = "u16")]
    Int32,
    /// Integers that need a 64 bit schema integer
    #[strum(serialize = "i64", serialize = "u32", serialize = "u64", serialize = "isize", serialize = "usize")]
    Int64,
    /// Integers without a fixed width format
    #[strum(serialize = "i128", serialize = "u128", serialize = "BigInt")]
    BigInteger,
    /// Single precision float
    #[strum(serialize = "f32")]
    Float,
    /// Double precision float
    #[strum(serialize = "f64")]
    Double,
    /// Arbitrary precision decimal
    #[strum(serialize = "Decimal")]
    Decimal,
    /// UUID
    #[strum(serialize = "Uuid")]
    Uuid,
    /// Binary content
    #[strum(serialize = "Bytes")]
    Bytes,
    /// Free-form JSON value
    #[strum(serialize = "Json")]
    Json,
    /// Date without time
    #[strum(serialize = "NaiveDate")]
    Date,
    /// Time of day without date
    #[strum(serialize = "NaiveTime")]
    Time,
    /// Date and time
    #[strum(serialize = "NaiveDateTime", serialize = "DateTime", serialize = "Instant")]
    DateTime,
    /// Calendar-style point in time whose meaning depends on the field's temporal granularity
    #[strum(serialize = "Timestamp", serialize = "SystemTime")]
    Calendar,
    /// Any other named type
    #[strum(disabled)]
    Named,
}

impl RawType {
    /// True for the date, time and date-time families
    pub const fn is_temporal(self) -> bool {
        matches!(self, Self::Date | Self::Time | Self::DateTime | Self::Calendar)
    }

    /// True for list, set, map and optional wrappers
    pub const fn is_wrapper(self) -> bool {
        matches!(self, Self::List | Self::Set | Self::Map | Self::Optional)
    }
}

impl DeclaredType {
    /// Create a declared type without generic arguments
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name:      name.into(),
            arguments: Vec::new(),
        }
    }

    /// Create a declared type with generic arguments
    pub fn with_arguments(name: impl Into<String>, arguments: Vec<TypeArgument>) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }

    /// Parse a type expression such as `HashMap<String, PropertyBox>`
    pub fn parse(expression: &str) -> Result<Self> {
        parse_declared_type(expression)
            .map_err(|reason| Report::new(Error::type_expression(expression, reason)))
    }

    /// The record type
    pub fn record() -> Self { Self::new(TYPE_PROPERTY_BOX) }

    /// `String`
    pub fn string() -> Self { Self::new(TYPE_STRING) }

    /// `Vec<element>`
    pub fn list_of(element: Self) -> Self {
        Self::with_arguments(TYPE_VEC, vec![TypeArgument::Concrete(element)])
    }

    /// `HashSet<element>`
    pub fn set_of(element: Self) -> Self {
        Self::with_arguments(TYPE_HASH_SET, vec![TypeArgument::Concrete(element)])
    }

    /// `BTreeSet<element>`
    pub fn sorted_set_of(element: Self) -> Self {
        Self::with_arguments(TYPE_BTREE_SET, vec![TypeArgument::Concrete(element)])
    }

    /// `HashMap<key, value>`
    pub fn map_of(key: Self, value: Self) -> Self {
        Self::with_arguments(
            TYPE_HASH_MAP,
            vec![TypeArgument::Concrete(key), TypeArgument::Concrete(value)],
        )
    }

    /// `BTreeMap<key, value>`
    pub fn sorted_map_of(key: Self, value: Self) -> Self {
        Self::with_arguments(
            TYPE_BTREE_MAP,
            vec![TypeArgument::Concrete(key), TypeArgument::Concrete(value)],
        )
    }

    /// `Option<inner>`
    pub fn optional(inner: Self) -> Self {
        Self::with_arguments(TYPE_OPTION, vec![TypeArgument::Concrete(inner)])
    }

    /// The type name without module path
    pub fn name(&self) -> &str { &self.name }

    /// The ordered generic arguments
    pub fn arguments(&self) -> &[TypeArgument] { &self.arguments }

    /// The argument at `index`, if declared
    pub fn argument(&self, index: usize) -> Option<&TypeArgument> { self.arguments.get(index) }

    /// Recognise the raw type from the name, ignoring generic arguments
    pub fn raw(&self) -> RawType { self.name.parse().unwrap_or(RawType::Named) }

    /// True when the type or any of its arguments is an unbound variable
    pub fn has_variables(&self) -> bool {
        self.arguments.iter().any(|argument| match argument {
            TypeArgument::Concrete(declared) => declared.has_variables(),
            TypeArgument::Variable(_) => true,
        })
    }
}

impl TypeArgument {
    /// Classify a parsed argument: a bare single upper case letter (optionally followed by
    /// digits) is a type variable, everything else is concrete
    pub(crate) fn from_parsed(declared: DeclaredType) -> Self {
        if declared.arguments.is_empty() && is_variable_name(&declared.name) {
            Self::Variable(declared.name)
        } else {
            Self::Concrete(declared)
        }
    }

    /// The concrete type, if this argument is not a variable
    pub const fn as_concrete(&self) -> Option<&DeclaredType> {
        match self {
            Self::Concrete(declared) => Some(declared),
            Self::Variable(_) => None,
        }
    }
}

fn is_variable_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_uppercase()) && chars.all(|c| c.is_ascii_digit())
}

impl FromStr for DeclaredType {
    type Err = Report<Error>;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> { Self::parse(s) }
}

impl From<&str> for DeclaredType {
    fn from(name: &str) -> Self { Self::new(name) }
}

impl fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.arguments.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}<{}>", self.name, self.arguments.iter().join(", "))
        }
    }
}

impl fmt::Display for TypeArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Concrete(declared) => write!(f, "{declared}"),
            Self::Variable(name) => write!(f, "{name}"),
        }
    }
}
