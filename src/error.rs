//! Error types for version-helper

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our custom Error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for version-helper
#[derive(Error, Debug)]
pub enum Error {
    /// File system operation failed
    #[error("File system error at {path}: {source}")]
    FileSystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A required field never appeared in the version file
    #[error("{field} not found in {path}")]
    MissingVersionField { field: &'static str, path: PathBuf },

    /// A version file line could not be turned into a number
    #[error("Invalid {field} in {path}: {line:?}")]
    InvalidVersionField {
        field: &'static str,
        path: PathBuf,
        line: String,
    },

    /// `git describe` output does not have the expected shape
    #[error("Unexpected git describe output {output:?}: {reason}")]
    GitDescribe { output: String, reason: String },

    /// External command could not be started
    #[error("Failed to run {command}: {source}")]
    CommandSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// External command exited unsuccessfully
    #[error("{command} failed with {status}: {stderr}")]
    CommandFailed {
        command: String,
        status: String,
        stderr: String,
    },

    /// The Dockerfile glob matched nothing
    #[error("No Dockerfiles match {pattern}")]
    NoDockerfiles { pattern: String },

    /// Unknown release channel name
    #[error("Unknown version type: {0} (expected stable or testing)")]
    InvalidVersionType(String),

    /// Version number arithmetic overflowed
    #[error("Version component overflow: {0}")]
    Overflow(&'static str),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] toml::de::Error),

    /// Invalid glob pattern
    #[error("Invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// Glob walk error
    #[error("Glob error: {0}")]
    Glob(#[from] glob::GlobError),
}

impl Error {
    /// Create a file system error
    pub fn filesystem(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileSystem {
            path: path.into(),
            source,
        }
    }

    /// Create a git describe parse error
    pub fn git_describe(output: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::GitDescribe {
            output: output.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid version field error
    pub fn invalid_field(
        field: &'static str,
        path: impl Into<PathBuf>,
        line: impl Into<String>,
    ) -> Self {
        Self::InvalidVersionField {
            field,
            path: path.into(),
            line: line.into(),
        }
    }
}
