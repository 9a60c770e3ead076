//! Shape of a record bearing declared type
//!
//! This enum represents the ways the record type can appear in a declared type: alone, as the
//! element of a list or set, as the value of a map, or wrapped in an optional.

use strum::{AsRefStr, Display};

/// Record bearing shape of a declared type
#[derive(Debug, Clone, PartialEq, Eq, Display, AsRefStr)]
pub enum TypeShape {
    /// A bare record
    Scalar,
    /// A list of records
    List {
        /// Element type is the record type
        element_is_record: bool,
    },
    /// A set of records
    Set {
        /// Element type is the record type
        element_is_record: bool,
        /// Always `true`: set elements are unique
        unique_items:      bool,
    },
    /// A map with record values; the key type is not resolved
    Map {
        /// Value type is the record type
        value_is_record: bool,
    },
    /// An optional wrapping one of the other shapes
    Optional(Box<Self>),
}

impl TypeShape {
    /// A list of records
    pub const fn list() -> Self {
        Self::List {
            element_is_record: true,
        }
    }

    /// A set of records
    pub const fn set() -> Self {
        Self::Set {
            element_is_record: true,
            unique_items:      true,
        }
    }

    /// A map with record values
    pub const fn map() -> Self {
        Self::Map {
            value_is_record: true,
        }
    }

    /// An optional wrapping `inner`
    pub fn optional(inner: Self) -> Self { Self::Optional(Box::new(inner)) }

    /// The shape with one level of optional removed
    pub fn unwrapped(&self) -> &Self {
        match self {
            Self::Optional(inner) => inner,
            other => other,
        }
    }

    /// True for list, set and map shapes (after unwrapping an optional)
    pub fn is_container(&self) -> bool {
        matches!(
            self.unwrapped(),
            Self::List { .. } | Self::Set { .. } | Self::Map { .. }
        )
    }

    /// Returns appropriate terminology for the records held by this shape
    ///
    /// Used in log messages instead of a generic "children".
    pub fn child_terminology(&self) -> &'static str {
        match self.unwrapped() {
            // `Optional` survives unwrapping only for `Option<Option<_>>`, which the classifier
            // never produces
            Self::Scalar | Self::Optional(_) => "fields",
            Self::List { .. } | Self::Set { .. } => "elements",
            Self::Map { .. } => "entries",
        }
    }
}
