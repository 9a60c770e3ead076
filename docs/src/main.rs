//! # propbox-docs
//!
//! Generates an OpenAPI document for a `PropertyBox` based REST API.
//!
//! The API model file declares record sets, component types and managed components. Every
//! registrable component becomes an endpoint, and every record payload is resolved into a
//! serialization tree and rendered as a JSON schema.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use api_model::{ApiModel, BuiltModel};
use clap::Parser;
use error::{Error, Result};
use error_stack::{Report, ResultExt};
use openapi::OpenApiDocument;
use propbox_schema::classify::{GenericTypeModel, TypeClassifier};
use propbox_schema::factory::SchemaFieldFactory;
use propbox_schema::registration::ResourceRegistrationPipeline;
use propbox_schema::resolve::{SchemaPathsOnly, SerializationTreeResolver};
use support::TracingLevel;
use tracing::{error, info};

mod api_model;
mod error;
mod openapi;
mod support;

#[derive(Parser)]
#[command(name = "propbox-docs")]
#[command(about = "Generate an OpenAPI document from a PropertyBox API model")]
#[command(version)]
struct Cli {
    /// Path to the API model JSON file
    model: PathBuf,

    /// Write the document here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Trace log level: error, warn, info, debug, trace
    #[arg(long, default_value = "warn")]
    log_level: TracingLevel,

    /// Classify declared types without the model's aliases and type variable bindings
    #[arg(long)]
    raw_types: bool,

    /// Keep computed fields in record schemas
    #[arg(long)]
    include_computed: bool,

    /// Only add these record sets to the document components (repeatable)
    #[arg(long = "record-set", value_name = "NAME")]
    record_sets: Vec<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Keep the guard alive so buffered events reach the log file
    let _guard = support::init_file_tracing();
    support::set_tracing_level(cli.log_level);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(report) => {
            error!("{report:?}");
            eprintln!("{report:?}");
            eprintln!("Trace log: {}", support::trace_log_path().display());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let model = ApiModel::load(&cli.model)?.build()?;
    let resolver = build_resolver(cli, &model);

    let pipeline = ResourceRegistrationPipeline::new(model.registration.clone());
    let descriptors = pipeline
        .discover(&model.candidates)
        .change_context(Error::Registration("endpoint discovery".to_string()))?;

    let mut document = OpenApiDocument::new(model.info.clone(), &resolver);
    let registered = pipeline
        .register_all(&descriptors, &mut document)
        .change_context(Error::Registration("endpoint registration".to_string()))?;

    if cli.record_sets.is_empty() {
        document.add_record_sets(&model.record_sets);
    } else {
        let selected = cli
            .record_sets
            .iter()
            .map(|name| {
                model
                    .record_set(name)
                    .ok_or_else(|| Report::new(Error::unknown("record set", name)))
            })
            .collect::<Result<Vec<_>>>()?;
        document.add_record_sets(selected);
    }

    info!(
        endpoints = registered,
        paths = document.path_count(),
        cached_trees = resolver.cache().len(),
        "Generated OpenAPI document"
    );

    let json = document.to_json()?;
    match &cli.output {
        Some(path) => std::fs::write(path, json)
            .map_err(|e| Report::new(Error::io_failed("write", path, e)))?,
        None => println!("{json}"),
    }
    Ok(())
}

fn build_resolver(cli: &Cli, model: &BuiltModel) -> SerializationTreeResolver {
    let classifier = if cli.raw_types {
        TypeClassifier::raw()
    } else {
        let bindings: Arc<dyn GenericTypeModel> = Arc::new(model.bindings.clone());
        TypeClassifier::probe(Some(bindings))
    };
    let factory =
        SchemaFieldFactory::new(classifier).with_localizer(Arc::new(model.messages.clone()));

    let resolver = SerializationTreeResolver::with_config(factory, model.resolver);
    if cli.include_computed {
        resolver
    } else {
        resolver.with_filter(SchemaPathsOnly)
    }
}
