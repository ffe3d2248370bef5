//! Library error type.
//!
//! The console front end treats startup directory failures as fatal and
//! reports everything else at the menu. [`WebToAppError::is_validation`]
//! separates bad input from a broken environment.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WebToAppError {
    #[error("I/O error{}: {message}", at(.path))]
    Io {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<io::Error>,
    },

    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: Option<rusqlite::Error>,
    },

    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Rejected user input; `field` names the offending value.
    #[error("Validation error for {field}: {message}")]
    Validation { field: String, message: String },

    #[error("App not found: {name}")]
    AppNotFound { name: String },
}

pub type Result<T> = std::result::Result<T, WebToAppError>;

fn at(path: &Option<PathBuf>) -> String {
    path.as_deref()
        .map(|p| format!(" at {}", p.display()))
        .unwrap_or_default()
}

impl WebToAppError {
    /// I/O failure on a known path.
    pub fn io_with_path(err: io::Error, path: impl AsRef<Path>) -> Self {
        Self::Io {
            message: err.to_string(),
            path: Some(path.as_ref().to_path_buf()),
            source: Some(err),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

impl From<io::Error> for WebToAppError {
    fn from(err: io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
            path: None,
            source: Some(err),
        }
    }
}

impl From<rusqlite::Error> for WebToAppError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Database {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl From<serde_json::Error> for WebToAppError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = WebToAppError::AppNotFound {
            name: "My Tool".into(),
        };
        assert_eq!(err.to_string(), "App not found: My Tool");
    }

    #[test]
    fn test_validation_error() {
        let err = WebToAppError::validation("url", "URL is required");
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "Validation error for url: URL is required");
        assert!(!WebToAppError::AppNotFound { name: "x".into() }.is_validation());
    }

    #[test]
    fn test_io_error_names_path() {
        let io = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let err = WebToAppError::io_with_path(io, "/tmp/apps.json");
        assert_eq!(err.to_string(), "I/O error at /tmp/apps.json: denied");

        let bare = WebToAppError::from(io::Error::new(io::ErrorKind::Other, "boom"));
        assert_eq!(bare.to_string(), "I/O error: boom");
    }
}
