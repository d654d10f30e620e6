//! Elasticsearch client configuration errors

use thiserror::Error;

/// A single invalid configuration property
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{key}: {reason}")]
pub struct FieldError {
    pub key: String,
    pub reason: String,
}

impl FieldError {
    pub fn new(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

/// Every property that failed to resolve, reported together
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error: {}", join_errors(.errors))]
pub struct ConfigError {
    errors: Vec<FieldError>,
}

impl ConfigError {
    pub fn new(errors: Vec<FieldError>) -> Self {
        Self { errors }
    }

    pub fn field(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(vec![FieldError::new(key, reason)])
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Whether the given property key is among the failures
    pub fn has_field(&self, key: &str) -> bool {
        self.errors.iter().any(|e| e.key == key)
    }
}

fn join_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("No component of type {0} was configured")]
    NotFound(&'static str),

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest_middleware::Error),
}
