//! Structured error types for configuration loading.
//!
//! Malformed cards and entities never surface here: they degrade to sentinel
//! values inside the model. Only structural problems with the document as a
//! whole, or with the environment it was read from, become errors.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading, merging or loading a panel configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration text is not valid YAML.
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A document that must be a mapping was something else.
    #[error("expected a mapping for {what}, found {found}")]
    NotAMapping { what: String, found: &'static str },

    /// Merge recursion exceeded the depth guard.
    #[error("configuration nesting exceeds {limit} levels")]
    MergeTooDeep { limit: usize },

    /// A requested app section does not exist in the document.
    #[error("section '{0}' not found in configuration")]
    MissingSection(String),

    /// The embedded default document failed to parse.
    #[error("embedded default configuration is invalid: {0}")]
    InvalidDefaults(String),
}

impl ConfigError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn not_a_mapping(what: impl Into<String>, value: &serde_json::Value) -> Self {
        Self::NotAMapping {
            what: what.into(),
            found: value_kind(value),
        }
    }
}

/// Short human name for the JSON kind of a value.
pub fn value_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "sequence",
        serde_json::Value::Object(_) => "mapping",
    }
}

/// Result type for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_not_a_mapping_message() {
        let err = ConfigError::not_a_mapping("document", &json!([1, 2]));
        assert_eq!(
            err.to_string(),
            "expected a mapping for document, found sequence"
        );
    }

    #[test]
    fn test_value_kind() {
        assert_eq!(value_kind(&json!(null)), "null");
        assert_eq!(value_kind(&json!("x")), "string");
        assert_eq!(value_kind(&json!({"a": 1})), "mapping");
    }
}
