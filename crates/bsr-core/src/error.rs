use crate::types::DocFormat;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BsrError {
    #[error("{what} not found: {}", path.display())]
    NotFound { what: &'static str, path: PathBuf },

    #[error("Failed to parse {what}: {cause}")]
    Parse {
        format: DocFormat,
        what: String,
        cause: String,
    },

    #[error("Unsupported file type: {extension}")]
    UnsupportedFormat { extension: String },

    #[error("{message}")]
    Validation { field: String, message: String },

    #[error("Failed to write file: {cause}")]
    WriteFailed { path: PathBuf, cause: String },

    #[error("invalid {what}: {value}")]
    InvalidValue { what: &'static str, value: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

impl BsrError {
    pub fn not_found(what: &'static str, path: impl Into<PathBuf>) -> Self {
        BsrError::NotFound {
            what,
            path: path.into(),
        }
    }

    pub fn yaml(what: impl Into<String>, cause: impl ToString) -> Self {
        BsrError::Parse {
            format: DocFormat::Yaml,
            what: what.into(),
            cause: cause.to_string(),
        }
    }

    pub fn required(field: impl Into<String>, message: impl Into<String>) -> Self {
        BsrError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, BsrError::NotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, BsrError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_keep_searchable_substrings() {
        let e = BsrError::not_found("BMAD directory", "/nope");
        assert_eq!(e.to_string(), "BMAD directory not found: /nope");
        assert!(e.is_not_found());

        let e = BsrError::yaml("project YAML", "bad indent");
        assert_eq!(e.to_string(), "Failed to parse project YAML: bad indent");

        let e = BsrError::UnsupportedFormat {
            extension: ".txt".to_string(),
        };
        assert!(e.to_string().contains("Unsupported"));
    }

    #[test]
    fn validation_renders_message_only() {
        let e = BsrError::required("name", "Project name is required");
        assert_eq!(e.to_string(), "Project name is required");
        assert!(matches!(e, BsrError::Validation { ref field, .. } if field == "name"));
    }
}
