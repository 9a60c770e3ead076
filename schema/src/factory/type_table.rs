//! Declared type to schema primitive lookup

use crate::constants::{
    FORMAT_BYTE, FORMAT_DOUBLE, FORMAT_FLOAT, FORMAT_INT32, FORMAT_INT64, FORMAT_TIME, FORMAT_UUID,
};
use crate::model::{RawType, TemporalType};
use crate::tree::SchemaPrimitiveKind;

/// Kind and format of a scalar value
pub type ScalarSchema = (SchemaPrimitiveKind, Option<&'static str>);

/// Schema primitive of a temporal type
///
/// A field declared with date granularity is a date whatever its type; otherwise the date-only
/// and time-only types keep their own meaning and everything else is a date-time.
pub const fn temporal_schema(raw: RawType, temporal: Option<TemporalType>) -> ScalarSchema {
    match (raw, temporal) {
        (_, Some(TemporalType::Date)) | (RawType::Date, _) => (SchemaPrimitiveKind::Date, None),
        (RawType::Time, _) => (SchemaPrimitiveKind::String, Some(FORMAT_TIME)),
        _ => (SchemaPrimitiveKind::DateTime, None),
    }
}

/// Schema primitive of a non-temporal scalar, `None` for types with no schema mapping
pub const fn scalar_schema(raw: RawType) -> Option<ScalarSchema> {
    let schema = match raw {
        RawType::String | RawType::Char => (SchemaPrimitiveKind::String, None),
        RawType::Bool => (SchemaPrimitiveKind::Boolean, None),
        RawType::Int32 => (SchemaPrimitiveKind::Integer, Some(FORMAT_INT32)),
        RawType::Int64 => (SchemaPrimitiveKind::Integer, Some(FORMAT_INT64)),
        RawType::BigInteger => (SchemaPrimitiveKind::Integer, None),
        RawType::Float => (SchemaPrimitiveKind::Number, Some(FORMAT_FLOAT)),
        RawType::Double => (SchemaPrimitiveKind::Number, Some(FORMAT_DOUBLE)),
        RawType::Decimal => (SchemaPrimitiveKind::Number, None),
        RawType::Uuid => (SchemaPrimitiveKind::String, Some(FORMAT_UUID)),
        RawType::Bytes => (SchemaPrimitiveKind::String, Some(FORMAT_BYTE)),
        RawType::Json | RawType::Record => (SchemaPrimitiveKind::Object, None),
        RawType::Date | RawType::Time | RawType::DateTime | RawType::Calendar => {
            return Some(temporal_schema(raw, None));
        }
        RawType::List | RawType::Set | RawType::Map | RawType::Optional | RawType::Named => {
            return None;
        }
    };
    Some(schema)
}
