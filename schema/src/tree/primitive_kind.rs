//! Primitive kinds a schema field can take

use serde::Serialize;
use strum::{AsRefStr, Display, EnumString};

/// Schema level kind of a field or element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumString, Serialize)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum SchemaPrimitiveKind {
    String,
    Number,
    Integer,
    Boolean,
    Date,
    DateTime,
    Object,
    Array,
}

impl SchemaPrimitiveKind {
    /// True for kinds a numeric range applies to
    pub const fn is_numeric(self) -> bool { matches!(self, Self::Number | Self::Integer) }

    /// True for kinds rendered as JSON strings, including the temporal ones
    pub const fn is_textual(self) -> bool {
        matches!(self, Self::String | Self::Date | Self::DateTime)
    }

    /// The JSON schema `type` keyword for this kind
    ///
    /// Temporal kinds are strings on the wire.
    pub const fn json_type(self) -> &'static str {
        match self {
            Self::String | Self::Date | Self::DateTime => "string",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Object => "object",
            Self::Array => "array",
        }
    }

    /// The `format` keyword implied by the kind itself
    pub const fn json_format(self) -> Option<&'static str> {
        match self {
            Self::Date => Some("date"),
            Self::DateTime => Some("date-time"),
            _ => None,
        }
    }
}
