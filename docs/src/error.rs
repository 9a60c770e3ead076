use thiserror::Error;

// Error message prefixes
const MSG_FAILED_TO_PREFIX: &str = "Failed to";
const MSG_INVALID_PREFIX: &str = "Invalid";
const MSG_UNKNOWN_PREFIX: &str = "Unknown";

/// Result type for the `propbox-docs` binary
pub type Result<T> = std::result::Result<T, error_stack::Report<Error>>;

// Error categories of the documentation pass
#[derive(Error)]
pub enum Error {
    #[error("File operation failed: {0}")]
    FileOperation(String),

    #[error("Invalid API model: {0}")]
    InvalidModel(String),

    #[error("Registration failed: {0}")]
    Registration(String),

    #[error("Serialization failed: {0}")]
    Serialization(String),
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FileOperation(s) => f.debug_tuple("FileOperation").field(s).finish(),
            Self::InvalidModel(s) => f.debug_tuple("InvalidModel").field(s).finish(),
            Self::Registration(s) => f.debug_tuple("Registration").field(s).finish(),
            Self::Serialization(s) => f.debug_tuple("Serialization").field(s).finish(),
        }
    }
}

impl Error {
    // Builder methods for common patterns

    /// Create an "Invalid X" model error
    pub fn invalid(what: &str, details: impl std::fmt::Display) -> Self {
        Self::InvalidModel(format!("{MSG_INVALID_PREFIX} {what}: {details}"))
    }

    /// Create an "Unknown X" model error for dangling references
    pub fn unknown(what: &str, name: &str) -> Self {
        Self::InvalidModel(format!("{MSG_UNKNOWN_PREFIX} {what} '{name}'"))
    }

    /// Create error for IO operations
    pub fn io_failed(
        operation: &str,
        path: &std::path::Path,
        error: impl std::fmt::Display,
    ) -> Self {
        Self::FileOperation(format!(
            "{MSG_FAILED_TO_PREFIX} {operation} {}: {error}",
            path.display()
        ))
    }
}
