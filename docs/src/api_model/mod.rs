//! API model files
//!
//! An API model is a JSON description of the record sets, component types and managed
//! components of a `PropertyBox` based REST API. Record sets refer to each other by name and
//! may do so cyclically.

mod build;

use std::collections::HashMap;
use std::path::Path;

pub use build::BuiltModel;
use error_stack::{Report, ResultExt};
use propbox_schema::classify::TypeBindings;
use propbox_schema::model::{Localizable, TemporalType, ValidationRule};
use propbox_schema::registration::{HttpMethod, Lifecycle, RegistrationConfig};
use propbox_schema::resolve::ResolverConfig;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Title and version of the generated document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocsInfo {
    pub title:   String,
    pub version: String,
}

impl Default for DocsInfo {
    fn default() -> Self {
        Self {
            title:   "PropertyBox API".to_string(),
            version: "1.0.0".to_string(),
        }
    }
}

/// The whole model file
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApiModel {
    pub info:            DocsInfo,
    pub registration:    RegistrationConfig,
    pub resolver:        ResolverConfig,
    /// Aliases and variable bindings for generic-aware classification
    pub type_model:      TypeBindings,
    /// Localized field labels by key
    pub messages:        HashMap<String, String>,
    pub record_sets:     Vec<RecordSetSpec>,
    pub component_types: Vec<ComponentTypeSpec>,
    /// Managed objects offered for registration
    pub components:      Vec<CandidateSpec>,
}

/// A named field set
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecordSetSpec {
    pub name:   String,
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
}

/// One field of a record set
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldSpec {
    pub name:       String,
    /// Type expression such as `Vec<PropertyBox>`
    #[serde(rename = "type")]
    pub value_type: String,
    #[serde(default)]
    pub read_only:  bool,
    #[serde(default)]
    pub temporal:   Option<TemporalType>,
    #[serde(default)]
    pub rules:      Vec<ValidationRule>,
    #[serde(default)]
    pub label:      Option<Localizable>,
    /// Name of the record set describing a record typed field
    #[serde(default)]
    pub nested:     Option<String>,
    #[serde(default)]
    pub computed:   bool,
}

/// A component type
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ComponentTypeSpec {
    pub name:       String,
    #[serde(default)]
    pub path:       Option<String>,
    #[serde(default)]
    pub provider:   bool,
    /// Name of another component type
    #[serde(default)]
    pub supertype:  Option<String>,
    #[serde(default)]
    pub operations: Vec<OperationSpec>,
}

/// An endpoint operation
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OperationSpec {
    pub method:   HttpMethod,
    #[serde(default)]
    pub path:     Option<String>,
    #[serde(default)]
    pub summary:  Option<String>,
    #[serde(default)]
    pub request:  Option<BodySpec>,
    #[serde(default)]
    pub response: Option<BodySpec>,
}

/// A request or response payload
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BodySpec {
    #[serde(rename = "type")]
    pub value_type: String,
    /// Name of the record set describing record payloads
    #[serde(default)]
    pub record_set: Option<String>,
}

/// A managed object
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CandidateSpec {
    pub name:      String,
    #[serde(default)]
    pub lifecycle: Lifecycle,
    /// Name of the component type
    #[serde(rename = "type")]
    pub type_name: String,
}

impl ApiModel {
    /// Read and parse a model file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Report::new(Error::io_failed("read", path, e)))?;
        Self::parse(&content).attach(format!("Model file: {}", path.display()))
    }

    /// Parse model JSON
    pub fn parse(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| Report::new(Error::invalid("model JSON", e)))
    }
}
