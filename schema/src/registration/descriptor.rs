//! Endpoint descriptors and the sink they are registered into

use super::component::Operation;
use crate::error::Result;

/// What kind of endpoint a descriptor registers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EndpointKind {
    /// A provider: serializer, exception mapper or other runtime extension
    Provider,
    /// A resource served under `path`
    Resource {
        /// Effective path joined with the configured base path
        path: String,
    },
}

/// One accepted candidate, ready to register
#[derive(Debug, Clone)]
pub struct EndpointDescriptor {
    /// Managed object name
    pub name:       String,
    /// Component type name
    pub type_name:  String,
    /// Provider or resource
    pub kind:       EndpointKind,
    /// Own and inherited operations
    pub operations: Vec<Operation>,
}

impl EndpointDescriptor {
    /// Resource path, `None` for providers
    pub fn path(&self) -> Option<&str> {
        match &self.kind {
            EndpointKind::Provider => None,
            EndpointKind::Resource { path } => Some(path),
        }
    }

    /// True for providers
    pub const fn is_provider(&self) -> bool { matches!(self.kind, EndpointKind::Provider) }

    /// Full path of `operation`, `None` for providers
    pub fn operation_path(&self, operation: &Operation) -> Option<String> {
        let path = self.path()?;
        Some(operation.path().map_or_else(|| path.to_string(), |own| join_path(path, own)))
    }
}

/// Receives descriptors from the registration pipeline
pub trait RegistrationSink {
    /// Register one descriptor
    fn register(&mut self, descriptor: &EndpointDescriptor) -> Result<()>;
}

/// Collects descriptors in registration order
impl RegistrationSink for Vec<EndpointDescriptor> {
    fn register(&mut self, descriptor: &EndpointDescriptor) -> Result<()> {
        self.push(descriptor.clone());
        Ok(())
    }
}

/// Join two path segments with exactly one `/` between them and a leading `/`
pub fn join_path(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    match (base.is_empty(), path.is_empty()) {
        (true, true) => "/".to_string(),
        (false, true) => ensure_leading_slash(base),
        (true, false) => format!("/{path}"),
        (false, false) => format!("{}/{path}", ensure_leading_slash(base)),
    }
}

fn ensure_leading_slash(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registration::HttpMethod;

    #[test]
    fn test_join_path() {
        assert_eq!(join_path("", "people"), "/people");
        assert_eq!(join_path("/api/", "/people"), "/api/people");
        assert_eq!(join_path("api", ""), "/api");
        assert_eq!(join_path("", "/"), "/");
    }

    #[test]
    fn test_operation_path() {
        let descriptor = EndpointDescriptor {
            name:       "people".to_string(),
            type_name:  "PeopleResource".to_string(),
            kind:       EndpointKind::Resource {
                path: "/api/people".to_string(),
            },
            operations: Vec::new(),
        };
        assert_eq!(
            descriptor.operation_path(&Operation::new(HttpMethod::Get)),
            Some("/api/people".to_string())
        );
        assert_eq!(
            descriptor.operation_path(&Operation::new(HttpMethod::Get).with_path("{id}")),
            Some("/api/people/{id}".to_string())
        );
    }
}
