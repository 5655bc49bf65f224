//! Error types for checkgen.
//!
//! This module defines a single error type for the checkgen CLI tool,
//! providing specific error variants for different failure modes and enabling
//! programmatic error handling.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// The main error type for checkgen operations.
///
/// `ExportError` provides specific error variants for different failure modes,
/// making it possible to programmatically handle different error cases.
#[derive(Debug)]
pub enum ExportError {
    /// An error occurred while loading or parsing a rule profile.
    Profile {
        /// Description of the profile issue.
        message: String,
        /// The profile file path, if applicable.
        path: Option<PathBuf>,
        /// The underlying error.
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An error occurred while loading or parsing configuration.
    Config {
        /// Description of the configuration issue.
        message: String,
        /// The config file path, if applicable.
        path: Option<PathBuf>,
        /// The underlying error.
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An error occurred during file system operations.
    Io {
        /// The operation being performed.
        operation: String,
        /// The path involved in the error.
        path: Option<PathBuf>,
        /// The underlying IO error.
        source: Option<io::Error>,
    },

    /// A write to the output sink failed while a document was being generated.
    ///
    /// This is the only failure the generation pass itself can produce; the
    /// sink may already hold a partial document when it is raised.
    Sink {
        /// Identifier of the export operation that was in progress.
        target: String,
        /// The underlying IO error.
        source: io::Error,
    },
}

impl ExportError {
    /// Creates a new `Profile` error with a file path.
    pub fn profile_error_with_path(message: impl Into<String>, path: PathBuf) -> Self {
        Self::Profile {
            message: message.into(),
            path: Some(path),
            source: None,
        }
    }

    /// Creates a new `Config` error with a file path.
    pub fn config_error_with_path(message: impl Into<String>, path: PathBuf) -> Self {
        Self::Config {
            message: message.into(),
            path: Some(path),
            source: None,
        }
    }

    /// Creates a new `Io` error with a path and underlying error.
    pub fn io_error_with_source(
        operation: impl Into<String>,
        path: PathBuf,
        source: io::Error,
    ) -> Self {
        Self::Io {
            operation: operation.into(),
            path: Some(path),
            source: Some(source),
        }
    }

    /// Creates a new `Sink` error for the given export target.
    pub fn sink(target: impl Into<String>, source: io::Error) -> Self {
        Self::Sink {
            target: target.into(),
            source,
        }
    }

    /// Returns the name of the error variant.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Profile { .. } => "Profile",
            Self::Config { .. } => "Config",
            Self::Io { .. } => "Io",
            Self::Sink { .. } => "Sink",
        }
    }

    /// Returns suggested recovery actions for the error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Profile { .. } => vec![
                "Check that the profile file contains valid JSON".to_string(),
                "Verify every rule entry carries a module path and a rule key".to_string(),
            ],
            Self::Config { .. } => vec![
                "Check the configuration file syntax".to_string(),
                "Ensure the file is valid TOML format".to_string(),
                "Review the documentation for configuration options".to_string(),
            ],
            Self::Io { .. } => vec![
                "Check that the path exists and is accessible".to_string(),
                "Verify you have the necessary permissions".to_string(),
            ],
            Self::Sink { .. } => vec![
                "Check that the output location is writable".to_string(),
                "Verify the disk is not full".to_string(),
            ],
        }
    }
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Profile { message, path, .. } => {
                if let Some(p) = path {
                    write!(f, "Profile error in '{}': {}", p.display(), message)
                } else {
                    write!(f, "Profile error: {}", message)
                }
            }
            Self::Config { message, path, .. } => {
                if let Some(p) = path {
                    write!(f, "Configuration error in '{}': {}", p.display(), message)
                } else {
                    write!(f, "Configuration error: {}", message)
                }
            }
            Self::Io {
                operation, path, ..
            } => {
                if let Some(p) = path {
                    write!(
                        f,
                        "IO error during '{}' at '{}': operation failed",
                        operation,
                        p.display()
                    )
                } else {
                    write!(f, "IO error during '{}': operation failed", operation)
                }
            }
            Self::Sink { target, .. } => {
                write!(
                    f,
                    "Export of '{}' failed: could not write to the output sink",
                    target
                )
            }
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Profile { source, .. } => source.as_ref().map(|s| s.as_ref() as _),
            Self::Config { source, .. } => source.as_ref().map(|s| s.as_ref() as _),
            Self::Io { source, .. } => source.as_ref().map(|e| e as _),
            Self::Sink { source, .. } => Some(source),
        }
    }
}

// Implement From conversions for common error types

impl From<io::Error> for ExportError {
    fn from(err: io::Error) -> Self {
        Self::Io {
            operation: "file operation".to_string(),
            path: None,
            source: Some(err),
        }
    }
}

/// A type alias for `Result<T, ExportError>`.
///
/// This is the recommended return type for functions that can fail with
/// checkgen-specific errors.
pub type Result<T> = std::result::Result<T, ExportError>;
