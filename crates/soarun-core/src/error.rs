//! Error types for soarun

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using SoarunError
pub type Result<T> = std::result::Result<T, SoarunError>;

/// Main error type for soarun operations
#[derive(Debug, Error)]
pub enum SoarunError {
    /// Configuration-related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Process-related errors
    #[error(transparent)]
    Process(#[from] ProcessError),

    /// Report discovery and conversion errors
    #[error(transparent)]
    Report(#[from] ReportError),

    /// Workflow-related errors
    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid configuration value
    #[error("Invalid configuration: {field} - {message}")]
    InvalidValue { field: String, message: String },

    /// Additional parameters could not be split into arguments
    #[error("Invalid additional parameters '{params}': {message}")]
    InvalidParams { params: String, message: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// IO error
    #[error("IO error reading config: {0}")]
    Io(#[from] std::io::Error),
}

/// Process execution errors.
///
/// A non-zero exit code is not an error; it is reported through
/// [`RunDetails`](crate::types::RunDetails).
#[derive(Debug, Error)]
pub enum ProcessError {
    /// The process could not be started at all
    #[error("Failed to start '{program}': {source}")]
    SpawnFailed {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Waiting on the process failed after it was started
    #[error("Failed to wait for '{program}': {source}")]
    WaitFailed {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The process outlived the configured timeout and was killed
    #[error("'{program}' timed out after {seconds}s")]
    TimedOut { program: String, seconds: u64 },
}

/// Report discovery and conversion errors
#[derive(Debug, Error)]
pub enum ReportError {
    /// No XML report matched the configured location
    #[error("Parasoft SOAtest XML report not found at the specified location: {location}")]
    NotFound { location: String },

    /// A bundled transform asset is missing
    #[error("Transform asset '{name}' not found at {path}")]
    AssetMissing { name: String, path: PathBuf },

    /// The report path does not carry the `.xml` extension
    #[error("Report is not an XML file: {0}")]
    NotXml(PathBuf),
}

/// Workflow-related errors
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// Working directory is missing
    #[error("Working directory does not exist: {}", .0.display())]
    WorkingDirNotFound(PathBuf),

    /// SOAtest workspace (`-data`) directory is missing
    #[error("SOAtest workspace directory does not exist: {}", .0.display())]
    WorkspaceNotFound(PathBuf),

    /// User cancelled
    #[error("Operation cancelled by user")]
    Cancelled,
}

impl SoarunError {
    /// Create a new "other" error with a message
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Self::Other(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workflow_messages_name_the_path() {
        let err = WorkflowError::WorkingDirNotFound(PathBuf::from("notFound"));
        assert_eq!(err.to_string(), "Working directory does not exist: notFound");

        let err = WorkflowError::WorkspaceNotFound(PathBuf::from("null"));
        assert_eq!(
            err.to_string(),
            "SOAtest workspace directory does not exist: null"
        );
    }

    #[test]
    fn test_report_not_found_message() {
        let err: SoarunError = ReportError::NotFound {
            location: "reports".to_string(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Parasoft SOAtest XML report not found at the specified location: reports"
        );
    }

    #[test]
    fn test_spawn_failure_keeps_source() {
        use std::error::Error as _;

        let err = ProcessError::SpawnFailed {
            program: "soatestcli".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        assert!(err.to_string().starts_with("Failed to start 'soatestcli'"));
        assert!(err.source().is_some());
    }
}
