//! Error types for fixture document resolution.

use thiserror::Error;

/// Result type alias for fixture operations.
pub type FixtureResult<T> = Result<T, FixtureError>;

/// Errors that can occur while parsing and resolving fixture documents.
///
/// All failure modes are ordinary returned errors, including template
/// inheritance cycles; nothing here aborts the process.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// File system error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Fixture file does not exist.
    #[error("fixture file not found: {0}")]
    FileNotFound(String),

    /// YAML syntax error.
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Structurally invalid document.
    #[error("invalid document: {0}")]
    Document(String),

    /// A row field holds something that is not a scalar value.
    #[error("invalid value for {table}.{column}: {message}")]
    InvalidValue {
        /// Table the row belongs to.
        table: String,
        /// Column name.
        column: String,
        /// What was wrong.
        message: String,
    },

    /// An include chain revisited a document.
    #[error("cyclic include detected: {0}")]
    IncludeCycle(String),

    /// A template inheritance chain revisited a template.
    #[error("cyclic template inheritance: '{name}' in table {table}")]
    TemplateCycle {
        /// Table scope of the template.
        table: String,
        /// Template name.
        name: String,
    },

    /// A row or template referenced a template that was never registered.
    #[error("template not found: '{name}' for table {table}")]
    TemplateNotFound {
        /// Table scope of the reference.
        table: String,
        /// Referenced template name.
        name: String,
    },
}

impl FixtureError {
    /// Create a document error.
    pub fn document(message: impl Into<String>) -> Self {
        Self::Document(message.into())
    }

    /// Create an invalid-value error.
    pub fn invalid_value(
        table: impl Into<String>,
        column: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            table: table.into(),
            column: column.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FixtureError::TemplateNotFound {
            table: "public.users".to_string(),
            name: "admin".to_string(),
        };
        assert!(err.to_string().contains("admin"));
        assert!(err.to_string().contains("public.users"));
    }

    #[test]
    fn test_invalid_value_display() {
        let err = FixtureError::invalid_value("public.users", "tags", "expected a scalar");
        assert!(err.to_string().contains("public.users.tags"));
    }
}
