use thiserror::Error;

use crate::registration::Lifecycle;

// Error message prefixes
const MSG_FAILED_TO_PREFIX: &str = "Failed to";
const MSG_INVALID_PREFIX: &str = "Invalid";
const MSG_MISSING_PREFIX: &str = "Missing";

/// Result type for the `propbox_schema` library
pub type Result<T> = std::result::Result<T, error_stack::Report<Error>>;

/// Error categories raised by the schema engine and the registration pipeline
///
/// Per-field problems during resolution are never surfaced through this type: an unmappable
/// field is dropped from its tree. Only configuration problems are errors.
#[derive(Error)]
pub enum Error {
    /// A field set was built with two fields sharing one name
    #[error("Duplicate field '{field}' in field set{}", set_suffix(.set.as_deref()))]
    DuplicateField {
        /// Name of the offending field
        field: String,
        /// Name of the field set, when it has one
        set:   Option<String>,
    },

    /// Generic failure with a preformatted message
    #[error("{0}")]
    General(String),

    /// An argument did not satisfy its contract
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A provider-like component was not registered as a singleton
    #[error(
        "Provider component '{name}' must be registered with singleton lifecycle, found {lifecycle}"
    )]
    InvalidLifecycle {
        /// Managed object name of the component
        name:      String,
        /// Lifecycle the component was registered with
        lifecycle: Lifecycle,
    },

    /// The registration sink refused a descriptor
    #[error("Registration failed: {0}")]
    Registration(String),

    /// A type expression could not be parsed
    #[error("Type expression error: {0}")]
    TypeExpression(String),
}

fn set_suffix(set: Option<&str>) -> String {
    set.map_or_else(String::new, |name| format!(" '{name}'"))
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateField { field, set } => f
                .debug_struct("DuplicateField")
                .field("field", field)
                .field("set", set)
                .finish(),
            Self::General(s) => f.debug_tuple("General").field(s).finish(),
            Self::InvalidArgument(s) => f.debug_tuple("InvalidArgument").field(s).finish(),
            Self::InvalidLifecycle { name, lifecycle } => f
                .debug_struct("InvalidLifecycle")
                .field("name", name)
                .field("lifecycle", lifecycle)
                .finish(),
            Self::Registration(s) => f.debug_tuple("Registration").field(s).finish(),
            Self::TypeExpression(s) => f.debug_tuple("TypeExpression").field(s).finish(),
        }
    }
}

impl Error {
    // Builder methods for common patterns

    /// Create a "Failed to X" error
    pub fn failed_to(action: &str, details: impl std::fmt::Display) -> Self {
        Self::General(format!("{MSG_FAILED_TO_PREFIX} {action}: {details}"))
    }

    /// Create an "Invalid X" error
    pub fn invalid(what: &str, details: impl std::fmt::Display) -> Self {
        Self::InvalidArgument(format!("{MSG_INVALID_PREFIX} {what}: {details}"))
    }

    /// Create a "Missing X" error
    pub fn missing(what: &str) -> Self {
        Self::InvalidArgument(format!("{MSG_MISSING_PREFIX} {what}"))
    }

    /// Create error for sink registration failures
    pub fn registration_failed(endpoint: &str, reason: impl std::fmt::Display) -> Self {
        Self::Registration(format!(
            "{MSG_FAILED_TO_PREFIX} register endpoint '{endpoint}': {reason}"
        ))
    }

    /// Create error for an unparseable type expression
    pub fn type_expression(expression: &str, reason: impl std::fmt::Display) -> Self {
        Self::TypeExpression(format!("'{expression}': {reason}"))
    }
}
