//! Endpoint discovery and registration
//!
//! The pipeline filters managed-object candidates down to providers and resources, checks that
//! every provider is a singleton and hands one descriptor per accepted candidate to a
//! `RegistrationSink`. Lifecycle problems are fatal and reported before anything is produced.

mod component;
mod descriptor;

pub use component::{Body, Candidate, ComponentType, HttpMethod, Lifecycle, Operation};
pub use descriptor::{EndpointDescriptor, EndpointKind, RegistrationSink, join_path};
use error_stack::{Report, ResultExt};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Registration settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistrationConfig {
    /// Prefix joined in front of every resource path
    pub base_path:         String,
    /// Register provider-like candidates
    pub include_providers: bool,
    /// Register path-like candidates
    pub include_resources: bool,
}

impl Default for RegistrationConfig {
    fn default() -> Self {
        Self {
            base_path:         String::new(),
            include_providers: true,
            include_resources: true,
        }
    }
}

/// Discovers and registers endpoints
#[derive(Debug, Clone, Default)]
pub struct ResourceRegistrationPipeline {
    config: RegistrationConfig,
}

impl ResourceRegistrationPipeline {
    /// Create a pipeline with the given settings
    pub const fn new(config: RegistrationConfig) -> Self { Self { config } }

    /// The settings the pipeline was built with
    pub const fn config(&self) -> &RegistrationConfig { &self.config }

    /// Build one descriptor per provider-like or path-like candidate
    ///
    /// Every provider-like candidate must be a singleton. The check runs over all candidates
    /// before any descriptor is built, so a failure leaves nothing half-registered.
    pub fn discover(&self, candidates: &[Candidate]) -> Result<Vec<EndpointDescriptor>> {
        if !self.config.base_path.is_empty() && !self.config.base_path.starts_with('/') {
            return Err(Report::new(Error::invalid(
                "base path",
                format!("'{}' must start with '/'", self.config.base_path),
            )));
        }

        if let Some(candidate) = candidates
            .iter()
            .find(|candidate| {
                candidate.component.is_provider() && candidate.lifecycle != Lifecycle::Singleton
            })
        {
            return Err(Report::new(Error::InvalidLifecycle {
                name:      candidate.name.clone(),
                lifecycle: candidate.lifecycle,
            })
            .attach(format!("Component type: {}", candidate.component.name())));
        }

        let descriptors: Vec<EndpointDescriptor> = candidates
            .iter()
            .filter_map(|candidate| self.describe(candidate))
            .collect();

        info!(
            candidates = candidates.len(),
            accepted = descriptors.len(),
            "Discovered endpoints"
        );
        Ok(descriptors)
    }

    /// Forward one descriptor to `sink`
    pub fn register(
        &self,
        descriptor: &EndpointDescriptor,
        sink: &mut dyn RegistrationSink,
    ) -> Result<()> {
        sink.register(descriptor)
            .attach(format!("Endpoint: {}", descriptor.name))?;
        debug!(
            endpoint = %descriptor.name,
            path = descriptor.path(),
            "Registered endpoint"
        );
        Ok(())
    }

    /// Forward descriptors in order, stopping at the first sink error
    ///
    /// Returns the number of descriptors registered.
    pub fn register_all(
        &self,
        descriptors: &[EndpointDescriptor],
        sink: &mut dyn RegistrationSink,
    ) -> Result<usize> {
        for descriptor in descriptors {
            self.register(descriptor, sink)?;
        }
        Ok(descriptors.len())
    }

    fn describe(&self, candidate: &Candidate) -> Option<EndpointDescriptor> {
        let component = &candidate.component;
        let kind = if component.is_provider() {
            if !self.config.include_providers {
                debug!(candidate = %candidate.name, "Providers disabled - skipping candidate");
                return None;
            }
            EndpointKind::Provider
        } else if let Some(path) = component.effective_path() {
            if !self.config.include_resources {
                debug!(candidate = %candidate.name, "Resources disabled - skipping candidate");
                return None;
            }
            EndpointKind::Resource {
                path: join_path(&self.config.base_path, path),
            }
        } else {
            return None;
        };

        Some(EndpointDescriptor {
            name: candidate.name.clone(),
            type_name: component.name().to_string(),
            kind,
            operations: component.effective_operations().cloned().collect(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests")]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn resource(name: &str, path: &str) -> Candidate {
        Candidate::new(
            name,
            Lifecycle::Request,
            ComponentType::new(format!("{name}Resource"))
                .with_path(path)
                .with_operation(Operation::new(HttpMethod::Get)),
        )
    }

    fn provider(name: &str, lifecycle: Lifecycle) -> Candidate {
        Candidate::new(name, lifecycle, ComponentType::new(name).provider())
    }

    /// Refuses every descriptor after the first `accept`
    struct LimitedSink {
        accept:     usize,
        registered: Vec<String>,
    }

    impl RegistrationSink for LimitedSink {
        fn register(&mut self, descriptor: &EndpointDescriptor) -> Result<()> {
            if self.registered.len() >= self.accept {
                return Err(Report::new(Error::registration_failed(
                    &descriptor.name,
                    "sink is full",
                )));
            }
            self.registered.push(descriptor.name.clone());
            Ok(())
        }
    }

    #[test]
    fn test_discover_keeps_providers_and_resources() {
        let pipeline = ResourceRegistrationPipeline::new(RegistrationConfig {
            base_path: "/api".to_string(),
            ..RegistrationConfig::default()
        });
        let candidates = [
            resource("people", "people"),
            provider("json", Lifecycle::Singleton),
            Candidate::new("helper", Lifecycle::Singleton, ComponentType::new("Helper")),
        ];

        let descriptors = pipeline.discover(&candidates).unwrap();
        assert_eq!(descriptors.len(), 2);
        assert_eq!(descriptors[0].path(), Some("/api/people"));
        assert_eq!(descriptors[0].operations.len(), 1);
        assert!(descriptors[1].is_provider());
    }

    #[test]
    fn test_non_singleton_provider_fails_before_registration() {
        let pipeline = ResourceRegistrationPipeline::default();
        let candidates = [
            resource("people", "/people"),
            provider("mapper", Lifecycle::Prototype),
        ];

        let report = pipeline.discover(&candidates).unwrap_err();
        assert!(matches!(
            report.current_context(),
            Error::InvalidLifecycle { name, lifecycle: Lifecycle::Prototype } if name == "mapper"
        ));
    }

    #[test]
    fn test_lifecycle_checked_even_when_providers_disabled() {
        let pipeline = ResourceRegistrationPipeline::new(RegistrationConfig {
            include_providers: false,
            ..RegistrationConfig::default()
        });
        assert!(
            pipeline
                .discover(&[provider("mapper", Lifecycle::Session)])
                .is_err()
        );

        let descriptors = pipeline
            .discover(&[provider("json", Lifecycle::Singleton), resource("people", "/people")])
            .unwrap();
        assert_eq!(descriptors.len(), 1);
        assert!(!descriptors[0].is_provider());
    }

    #[test]
    fn test_provider_marker_wins_over_path() {
        let component = Arc::new(ComponentType::new("Both").with_path("/both").provider());
        let descriptors = ResourceRegistrationPipeline::default()
            .discover(&[Candidate::new("both", Lifecycle::Singleton, component)])
            .unwrap();
        assert_eq!(descriptors[0].kind, EndpointKind::Provider);
    }

    #[test]
    fn test_invalid_base_path() {
        let pipeline = ResourceRegistrationPipeline::new(RegistrationConfig {
            base_path: "api".to_string(),
            ..RegistrationConfig::default()
        });
        assert!(pipeline.discover(&[]).is_err());
    }

    #[test]
    fn test_register_all_stops_at_first_error() {
        let pipeline = ResourceRegistrationPipeline::default();
        let descriptors = pipeline
            .discover(&[
                resource("a", "/a"),
                resource("b", "/b"),
                resource("c", "/c"),
            ])
            .unwrap();

        let mut sink = LimitedSink {
            accept:     1,
            registered: Vec::new(),
        };
        let report = pipeline.register_all(&descriptors, &mut sink).unwrap_err();
        assert!(matches!(report.current_context(), Error::Registration(_)));
        assert_eq!(sink.registered, vec!["a".to_string()]);

        let mut collected: Vec<EndpointDescriptor> = Vec::new();
        assert_eq!(pipeline.register_all(&descriptors, &mut collected).unwrap(), 3);
    }
}
