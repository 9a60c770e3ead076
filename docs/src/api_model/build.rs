//! Turning a parsed model into record sets and registration candidates

use std::collections::HashMap;
use std::sync::Arc;

use error_stack::{Report, ResultExt};
use propbox_schema::classify::TypeBindings;
use propbox_schema::model::{
    DeclaredType, FieldDefinition, FieldSet, FieldSetLink, MessageCatalog, ValidationRule,
};
use propbox_schema::registration::{
    Body, Candidate, ComponentType, Operation, RegistrationConfig,
};
use propbox_schema::resolve::ResolverConfig;
use regex::Regex;
use tracing::{debug, warn};

use super::{ApiModel, BodySpec, ComponentTypeSpec, DocsInfo, FieldSpec, OperationSpec};
use crate::error::{Error, Result};

/// A model with its record sets and components built
#[derive(Debug)]
pub struct BuiltModel {
    pub info:         DocsInfo,
    pub registration: RegistrationConfig,
    pub resolver:     ResolverConfig,
    pub bindings:     TypeBindings,
    pub messages:     MessageCatalog,
    /// Owners of every record set, in model order; nested references between sets are weak
    pub record_sets:  Vec<Arc<FieldSet>>,
    pub candidates:   Vec<Candidate>,
}

impl BuiltModel {
    /// Look up a record set by name
    pub fn record_set(&self, name: &str) -> Option<&Arc<FieldSet>> {
        self.record_sets
            .iter()
            .find(|set| set.name() == Some(name))
    }
}

impl ApiModel {
    /// Build record sets, component types and candidates
    ///
    /// Record sets are linked by name so they may refer to each other cyclically. Component
    /// supertype chains must be acyclic.
    pub fn build(self) -> Result<BuiltModel> {
        let record_sets = build_record_sets(&self)?;
        let by_name: HashMap<&str, &Arc<FieldSet>> = record_sets
            .iter()
            .filter_map(|set| set.name().map(|name| (name, set)))
            .collect();

        let mut types = ComponentTypes::new(&self.component_types, &by_name)?;
        // unreferenced types are checked too, so their dangling references surface here
        for spec in &self.component_types {
            types.get(&spec.name)?;
        }
        let candidates = self
            .components
            .iter()
            .map(|spec| -> Result<Candidate> {
                let component = types.get(&spec.type_name)?;
                Ok(Candidate::new(spec.name.clone(), spec.lifecycle, component))
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(
            record_sets = record_sets.len(),
            candidates = candidates.len(),
            "Built API model"
        );

        Ok(BuiltModel {
            info: self.info,
            registration: self.registration,
            resolver: self.resolver,
            bindings: self.type_model,
            messages: MessageCatalog::from(self.messages),
            record_sets,
            candidates,
        })
    }
}

fn build_record_sets(model: &ApiModel) -> Result<Vec<Arc<FieldSet>>> {
    let mut links: HashMap<&str, FieldSetLink> = HashMap::with_capacity(model.record_sets.len());
    for spec in &model.record_sets {
        if links.insert(&spec.name, FieldSetLink::new()).is_some() {
            return Err(Report::new(Error::invalid(
                "record sets",
                format!("'{}' is declared twice", spec.name),
            )));
        }
    }

    let mut record_sets = Vec::with_capacity(model.record_sets.len());
    for spec in &model.record_sets {
        let fields = spec
            .fields
            .iter()
            .map(|field| build_field(&spec.name, field, &links))
            .collect::<Result<Vec<_>>>()?;
        let set = FieldSet::named(&spec.name, fields)
            .change_context(Error::invalid("record set", &spec.name))?;
        if let Some(link) = links.get(spec.name.as_str()) {
            link.bind(&set)
                .change_context(Error::invalid("record set", &spec.name))?;
        }
        record_sets.push(set);
    }
    Ok(record_sets)
}

fn build_field(
    set: &str,
    spec: &FieldSpec,
    links: &HashMap<&str, FieldSetLink>,
) -> Result<FieldDefinition> {
    let value_type = DeclaredType::parse(&spec.value_type)
        .change_context(Error::invalid("field type", format!("{set}.{}", spec.name)))?;

    let mut field = FieldDefinition::new(&spec.name, value_type);
    if spec.read_only {
        field = field.read_only();
    }
    if let Some(temporal) = spec.temporal {
        field = field.with_temporal(temporal);
    }
    for rule in &spec.rules {
        check_pattern(set, &spec.name, rule);
        field = field.with_rule(rule.clone());
    }
    if let Some(label) = &spec.label {
        field = field.with_label(label.clone());
    }
    if let Some(nested) = &spec.nested {
        let link = links
            .get(nested.as_str())
            .ok_or_else(|| Report::new(Error::unknown("record set", nested)))
            .attach(format!("Field: {set}.{}", spec.name))?;
        field = field.with_nested(link.clone());
    }
    if spec.computed {
        field = field.computed();
    }
    Ok(field)
}

/// Invalid patterns are still copied verbatim; clients get to see what was declared
fn check_pattern(set: &str, field: &str, rule: &ValidationRule) {
    if let ValidationRule::Pattern { regex } = rule {
        if let Err(e) = Regex::new(regex) {
            warn!(
                field = %format!("{set}.{field}"),
                pattern = %regex,
                error = %e,
                "Pattern rule is not a valid regular expression"
            );
        }
    }
}

/// Component types built on demand so supertypes exist before their subtypes
struct ComponentTypes<'m> {
    specs:       HashMap<&'m str, &'m ComponentTypeSpec>,
    record_sets: &'m HashMap<&'m str, &'m Arc<FieldSet>>,
    built:       HashMap<String, Arc<ComponentType>>,
}

impl<'m> ComponentTypes<'m> {
    fn new(
        specs: &'m [ComponentTypeSpec],
        record_sets: &'m HashMap<&'m str, &'m Arc<FieldSet>>,
    ) -> Result<Self> {
        let mut by_name = HashMap::with_capacity(specs.len());
        for spec in specs {
            if by_name.insert(spec.name.as_str(), spec).is_some() {
                return Err(Report::new(Error::invalid(
                    "component types",
                    format!("'{}' is declared twice", spec.name),
                )));
            }
        }
        Ok(Self {
            specs: by_name,
            record_sets,
            built: HashMap::new(),
        })
    }

    fn get(&mut self, name: &str) -> Result<Arc<ComponentType>> {
        self.build(name, &mut Vec::new())
    }

    fn build(&mut self, name: &str, chain: &mut Vec<String>) -> Result<Arc<ComponentType>> {
        if let Some(built) = self.built.get(name) {
            return Ok(Arc::clone(built));
        }
        if chain.iter().any(|seen| seen == name) {
            return Err(Report::new(Error::invalid(
                "component type",
                format!("supertype cycle {} -> {name}", chain.join(" -> ")),
            )));
        }
        let spec = *self
            .specs
            .get(name)
            .ok_or_else(|| Report::new(Error::unknown("component type", name)))?;

        chain.push(name.to_string());
        let mut component = ComponentType::new(name);
        if let Some(supertype) = &spec.supertype {
            component = component.with_supertype(self.build(supertype, chain)?);
        }
        chain.pop();

        if let Some(path) = &spec.path {
            component = component.with_path(path);
        }
        if spec.provider {
            component = component.provider();
        }
        for operation in &spec.operations {
            component = component.with_operation(self.operation(name, operation)?);
        }

        let component = Arc::new(component);
        self.built.insert(name.to_string(), Arc::clone(&component));
        Ok(component)
    }

    fn operation(&self, component: &str, spec: &OperationSpec) -> Result<Operation> {
        let mut operation = Operation::new(spec.method);
        if let Some(path) = &spec.path {
            operation = operation.with_path(path);
        }
        if let Some(summary) = &spec.summary {
            operation = operation.with_summary(summary);
        }
        if let Some(request) = &spec.request {
            operation = operation.with_request(self.body(component, request)?);
        }
        if let Some(response) = &spec.response {
            operation = operation.with_response(self.body(component, response)?);
        }
        Ok(operation)
    }

    fn body(&self, component: &str, spec: &BodySpec) -> Result<Body> {
        let value_type = DeclaredType::parse(&spec.value_type)
            .change_context(Error::invalid("payload type", component))?;
        let mut body = Body::new(value_type);
        if let Some(name) = &spec.record_set {
            let set = self
                .record_sets
                .get(name.as_str())
                .ok_or_else(|| Report::new(Error::unknown("record set", name)))
                .attach(format!("Component type: {component}"))?;
            body = body.with_field_set(set);
        }
        Ok(body)
    }
}
