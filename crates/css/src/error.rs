//! Style compilation error types

use std::fmt;
use thiserror::Error;

/// Style compilation result type
pub type CssResult<T> = Result<T, CssError>;

/// Chain of declaration keys leading to a value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyPath {
    keys: Vec<String>,
}

impl KeyPath {
    pub fn new() -> Self {
        Self::default()
    }

    /// Path one level deeper
    pub fn child(&self, key: &str) -> Self {
        let mut keys = self.keys.clone();
        keys.push(key.to_string());
        Self { keys }
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn is_root(&self) -> bool {
        self.keys.is_empty()
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            return write!(f, "<root>");
        }
        write!(f, "{}", self.keys.join(" > "))
    }
}

/// Style compilation errors
#[derive(Debug, Error)]
pub enum CssError {
    #[error("Expected a string, dynamic value or nested declaration but found {found} at {path}")]
    UnexpectedValue {
        found: &'static str,
        path: KeyPath,
    },

    #[error("Expected a declaration object but found {found}")]
    NotADeclaration {
        found: &'static str,
    },

    #[error("Invalid dynamic value at {path}: {message}")]
    InvalidDynamic {
        message: String,
        path: KeyPath,
    },

    #[error("Field '{field}' is missing from the input record")]
    MissingField {
        field: String,
    },

    #[error("Field '{field}' holds {found}, which cannot be used as a CSS value")]
    UnusableField {
        field: String,
        found: &'static str,
    },

    #[error("No case matches '{value}' for field '{field}' and no default is given")]
    NoMatchingCase {
        field: String,
        value: String,
    },

    #[error("Dynamic value failed: {0}")]
    Dynamic(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CssError {
    /// Get the key path of this error, if it has one
    pub fn path(&self) -> Option<&KeyPath> {
        match self {
            Self::UnexpectedValue { path, .. } => Some(path),
            Self::InvalidDynamic { path, .. } => Some(path),
            _ => None,
        }
    }

    pub fn unexpected_value(found: &'static str, path: KeyPath) -> Self {
        Self::UnexpectedValue { found, path }
    }

    pub fn invalid_dynamic(message: impl Into<String>, path: KeyPath) -> Self {
        Self::InvalidDynamic { message: message.into(), path }
    }

    /// Error for use inside a fallible dynamic value
    pub fn dynamic(message: impl Into<String>) -> Self {
        Self::Dynamic(message.into())
    }
}
