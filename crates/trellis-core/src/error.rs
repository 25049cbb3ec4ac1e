//! Error types for Trellis

use thiserror::Error;

/// Result type alias using Trellis's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Trellis error types with helpful messages and suggestions
#[derive(Error, Debug)]
pub enum Error {
    // Entity errors (E001-E099)
    #[error("Project '{0}' not found. Run `trellis projects list` to see all projects.")]
    ProjectNotFound(String),

    #[error("A project named '{0}' already exists. Project names must be unique.")]
    DuplicateName(String),

    // Input errors (E100-E199)
    #[error("Invalid {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Unknown template '{0}'. Run `trellis templates list` to see the catalog.")]
    UnknownTemplate(String),

    // Database errors (E400-E499)
    #[error("Storage error: {0}")]
    Storage(#[from] sqlx::Error),

    // Config errors (E600-E699)
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Build a field-level validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Get error code for this error type
    pub fn code(&self) -> &'static str {
        match self {
            Self::ProjectNotFound(_) => "E001",
            Self::DuplicateName(_) => "E002",
            Self::Validation { .. } => "E100",
            Self::UnknownTemplate(_) => "E101",
            Self::Storage(_) => "E400",
            Self::Config(_) => "E600",
            Self::Io(_) => "E9999",
        }
    }

    /// Get suggestion for how to fix this error
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::ProjectNotFound(_) => Some("trellis projects list".to_string()),
            Self::UnknownTemplate(_) => Some("trellis templates list".to_string()),
            Self::DuplicateName(name) => Some(format!("trellis projects update {}", name)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_stable() {
        assert_eq!(Error::ProjectNotFound("x".into()).code(), "E001");
        assert_eq!(Error::DuplicateName("x".into()).code(), "E002");
        assert_eq!(Error::validation("budget", "must be >= 0").code(), "E100");
        assert_eq!(Error::UnknownTemplate("x".into()).code(), "E101");
    }

    #[test]
    fn test_suggestions() {
        assert_eq!(
            Error::UnknownTemplate("x".into()).suggestion().as_deref(),
            Some("trellis templates list")
        );
        assert!(Error::validation("name", "empty").suggestion().is_none());
    }

    #[test]
    fn test_validation_message_names_field() {
        let err = Error::validation("execution_progress", "must be between 0 and 100");
        assert_eq!(
            err.to_string(),
            "Invalid execution_progress: must be between 0 and 100"
        );
    }
}
