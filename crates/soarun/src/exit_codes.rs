//! Exit codes for the CLI
//!
//! A completed pipeline exits with the code of its last process. The codes
//! below are used only when the pipeline itself fails.

use soarun_core::{SoarunError, WorkflowError};

/// Success
pub const SUCCESS: i32 = 0;

/// General error
pub const ERROR: i32 = 1;

/// Configuration error
pub const CONFIG_ERROR: i32 = 2;

/// Working directory or workspace missing
pub const PRECONDITION_ERROR: i32 = 3;

/// No XML report matched the configured location
pub const REPORT_NOT_FOUND: i32 = 4;

/// A process could not be started, waited on, or timed out
pub const PROCESS_ERROR: i32 = 5;

/// User cancelled
pub const CANCELLED: i32 = 130;

/// Exit code for an error that ended the pipeline
pub fn for_error(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<SoarunError>() {
        Some(SoarunError::Config(_)) => CONFIG_ERROR,
        Some(SoarunError::Workflow(WorkflowError::Cancelled)) => CANCELLED,
        Some(SoarunError::Workflow(_)) => PRECONDITION_ERROR,
        Some(SoarunError::Report(soarun_core::ReportError::NotFound { .. })) => REPORT_NOT_FOUND,
        Some(SoarunError::Process(_)) => PROCESS_ERROR,
        _ => ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use soarun_core::{ConfigError, ProcessError, ReportError};
    use std::path::PathBuf;

    fn code(err: impl Into<SoarunError>) -> i32 {
        for_error(&anyhow::Error::from(err.into()))
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            code(ConfigError::InvalidValue {
                field: "timeout_secs".to_string(),
                message: "must be positive".to_string(),
            }),
            CONFIG_ERROR
        );
        assert_eq!(
            code(WorkflowError::WorkingDirNotFound(PathBuf::from("x"))),
            PRECONDITION_ERROR
        );
        assert_eq!(code(WorkflowError::Cancelled), CANCELLED);
        assert_eq!(
            code(ReportError::NotFound {
                location: "reports".to_string()
            }),
            REPORT_NOT_FOUND
        );
        assert_eq!(
            code(ReportError::NotXml(PathBuf::from("report.html"))),
            ERROR
        );
        assert_eq!(
            code(ProcessError::TimedOut {
                program: "soatestcli".to_string(),
                seconds: 5
            }),
            PROCESS_ERROR
        );
        assert_eq!(code(SoarunError::other("boom")), ERROR);
    }

    #[test]
    fn test_foreign_errors_are_general() {
        assert_eq!(for_error(&anyhow::anyhow!("clap failed")), ERROR);
    }
}
