//! Error types and utilities for dotconf

use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for dotconf operations
pub type Result<T> = std::result::Result<T, DotConfError>;

/// Main error type for dotconf operations
#[derive(Error, Debug)]
pub enum DotConfError {
    /// A source directory or namespace source does not exist
    #[error("Configuration not found: {message}")]
    NotFound {
        message: String,
        path: Option<PathBuf>,
    },

    /// A namespace source could not be turned into a mapping
    #[error("Invalid configuration format: {message}")]
    InvalidFormat {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The caller passed a value the operation cannot accept
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Tool or logging settings could not be read or are inconsistent
    #[error("Settings error: {message}")]
    Settings {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A shared store lock was poisoned by a panicking holder
    #[error("Configuration store lock is poisoned")]
    LockPoisoned,
}

/// Coarse category of a [`DotConfError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`DotConfError::NotFound`]
    NotFound,
    /// See [`DotConfError::InvalidFormat`]
    InvalidFormat,
    /// See [`DotConfError::InvalidArgument`]
    InvalidArgument,
    /// See [`DotConfError::Io`]
    Io,
    /// See [`DotConfError::Settings`]
    Settings,
    /// See [`DotConfError::LockPoisoned`]
    LockPoisoned,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NotFound => "not-found",
            Self::InvalidFormat => "invalid-format",
            Self::InvalidArgument => "invalid-argument",
            Self::Io => "io",
            Self::Settings => "settings",
            Self::LockPoisoned => "lock-poisoned",
        };
        f.write_str(name)
    }
}

impl DotConfError {
    /// Create a not-found error without an associated path
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound {
            message: msg.into(),
            path: None,
        }
    }

    /// Create a not-found error for a missing file or directory
    pub fn not_found_at(msg: impl Into<String>, path: impl AsRef<Path>) -> Self {
        Self::NotFound {
            message: msg.into(),
            path: Some(path.as_ref().to_path_buf()),
        }
    }

    /// Create a new invalid-format error
    pub fn invalid_format(msg: impl Into<String>) -> Self {
        Self::InvalidFormat {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new invalid-format error with source
    pub fn invalid_format_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::InvalidFormat {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new invalid-argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: msg.into(),
        }
    }

    /// Create a new settings error
    pub fn settings(msg: impl Into<String>) -> Self {
        Self::Settings {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new settings error with source
    pub fn settings_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Settings {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Category of this error
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::InvalidFormat { .. } => ErrorKind::InvalidFormat,
            Self::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            Self::Io(_) => ErrorKind::Io,
            Self::Settings { .. } => ErrorKind::Settings,
            Self::LockPoisoned => ErrorKind::LockPoisoned,
        }
    }

    /// Whether this is one of the configuration source errors (not-found or invalid-format)
    #[must_use]
    pub const fn is_configuration_error(&self) -> bool {
        matches!(self.kind(), ErrorKind::NotFound | ErrorKind::InvalidFormat)
    }

    /// Path involved in a not-found error, when known
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::NotFound { path, .. } => path.as_deref(),
            _ => None,
        }
    }
}
