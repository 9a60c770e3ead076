//! OpenAPI and JSON schema keyword names
//!
//! Type-safe names for the keywords the renderer emits, so no schema key is spelled out as a
//! string literal at its use site.

use serde_json::{Map, Value};
use strum::{AsRefStr, Display};

/// Schema object keywords
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "camelCase")]
pub enum SchemaKeyword {
    /// Value schema of map-like objects
    AdditionalProperties,
    /// Composition used to decorate a `$ref`
    AllOf,
    /// Boolean flag turning `maximum` exclusive
    ExclusiveMaximum,
    /// Boolean flag turning `minimum` exclusive
    ExclusiveMinimum,
    Format,
    /// Array element schema
    Items,
    Maximum,
    MaxItems,
    MaxLength,
    Minimum,
    MinItems,
    MinLength,
    Pattern,
    /// Object member schemas
    Properties,
    ReadOnly,
    /// Reference to a named component schema
    #[strum(serialize = "$ref")]
    Ref,
    /// Required member names
    Required,
    Title,
    Type,
    UniqueItems,
}

/// Document level keywords
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "camelCase")]
pub enum DocumentKeyword {
    Components,
    Content,
    Description,
    Info,
    In,
    Name,
    #[strum(serialize = "openapi")]
    OpenApi,
    OperationId,
    Parameters,
    Paths,
    RequestBody,
    Responses,
    Schema,
    Schemas,
    Summary,
    Title,
    Version,
    /// Vendor extension listing registered providers
    #[strum(serialize = "x-providers")]
    XProviders,
}

/// Insert a keyword entry into a JSON object
pub trait KeywordMap {
    /// Insert `value` under `keyword`
    fn put(&mut self, keyword: impl AsRef<str>, value: impl Into<Value>);
}

impl KeywordMap for Map<String, Value> {
    fn put(&mut self, keyword: impl AsRef<str>, value: impl Into<Value>) {
        self.insert(keyword.as_ref().to_string(), value.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_spelling() {
        assert_eq!(SchemaKeyword::AdditionalProperties.as_ref(), "additionalProperties");
        assert_eq!(SchemaKeyword::Ref.as_ref(), "$ref");
        assert_eq!(SchemaKeyword::MaxItems.as_ref(), "maxItems");
        assert_eq!(DocumentKeyword::OpenApi.as_ref(), "openapi");
        assert_eq!(DocumentKeyword::RequestBody.as_ref(), "requestBody");
    }

    #[test]
    fn test_put_inserts_by_keyword() {
        let mut map = Map::new();
        map.put(SchemaKeyword::ReadOnly, true);
        assert_eq!(map.get("readOnly"), Some(&Value::Bool(true)));
    }
}
