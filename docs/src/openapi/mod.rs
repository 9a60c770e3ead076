//! OpenAPI rendering of registered endpoints and resolved serialization trees

mod document;
mod keywords;

pub use document::OpenApiDocument;
