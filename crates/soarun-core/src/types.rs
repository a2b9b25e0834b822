//! Core types for soarun

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Exit code substituted when a process ended without one (killed by a signal)
pub const SIGNAL_EXIT_CODE: i32 = 150;

/// Exit code used when a step could not even be attempted
pub const NOT_ATTEMPTED_EXIT_CODE: i32 = -1;

/// Options for one SOAtest invocation.
///
/// Built once from the CLI and configuration file, read-only afterwards.
/// String fields that are `None` or blank are left off the command line.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunOptions {
    /// Installation folder of Parasoft SOAtest
    pub install_dir: Option<String>,
    /// Directory the tool runs in; reports resolve against it
    pub working_dir: PathBuf,
    /// SOAtest workspace passed as `-data`
    pub workspace: Option<String>,
    /// Test configuration to run
    pub test_config: Option<String>,
    /// Report location passed as `-report`
    pub report: Option<String>,
    /// `.properties` settings file
    pub settings: Option<String>,
    /// Test suite(s) to run
    pub resource: Option<String>,
    /// Value for the `report.format` property
    pub report_format: Option<String>,
    /// `.env` environment file
    pub environment: Option<String>,
    /// Root of a Java installation used for report conversion
    pub java_root_path: Option<String>,
    /// Extra arguments appended verbatim
    pub additional_params: Option<String>,
    /// Whether to convert the XML report to XUnit after a successful run
    pub convert_report: bool,
    /// Kill the tool if it runs longer than this
    pub timeout: Option<Duration>,
    /// Directory holding the Saxon jar and the XUnit stylesheet
    pub assets_dir: Option<PathBuf>,
}

impl RunOptions {
    /// Create options for the given working directory
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: working_dir.into(),
            ..Default::default()
        }
    }

    pub fn with_install_dir(mut self, dir: impl Into<String>) -> Self {
        self.install_dir = Some(dir.into());
        self
    }

    pub fn with_workspace(mut self, dir: impl Into<String>) -> Self {
        self.workspace = Some(dir.into());
        self
    }

    pub fn with_test_config(mut self, config: impl Into<String>) -> Self {
        self.test_config = Some(config.into());
        self
    }

    pub fn with_report(mut self, report: impl Into<String>) -> Self {
        self.report = Some(report.into());
        self
    }

    pub fn with_settings(mut self, settings: impl Into<String>) -> Self {
        self.settings = Some(settings.into());
        self
    }

    pub fn with_resource(mut self, resource: impl Into<String>) -> Self {
        self.resource = Some(resource.into());
        self
    }

    pub fn with_report_format(mut self, format: impl Into<String>) -> Self {
        self.report_format = Some(format.into());
        self
    }

    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = Some(environment.into());
        self
    }

    pub fn with_java_root_path(mut self, path: impl Into<String>) -> Self {
        self.java_root_path = Some(path.into());
        self
    }

    pub fn with_additional_params(mut self, params: impl Into<String>) -> Self {
        self.additional_params = Some(params.into());
        self
    }

    pub fn with_convert_report(mut self, convert: bool) -> Self {
        self.convert_report = convert;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_assets_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.assets_dir = Some(dir.into());
        self
    }

    /// Installation directory, if set and non-blank
    pub fn install_dir(&self) -> Option<&Path> {
        present(&self.install_dir).map(Path::new)
    }

    /// Workspace directory, if set and non-blank
    pub fn workspace(&self) -> Option<&Path> {
        present(&self.workspace).map(Path::new)
    }

    /// Java root, if set and non-blank
    pub fn java_root_path(&self) -> Option<&Path> {
        present(&self.java_root_path).map(Path::new)
    }

    /// Report location as given by the user (empty when unset)
    pub fn report_location(&self) -> &str {
        present(&self.report).unwrap_or("")
    }
}

/// Returns the value when it is set and not blank
pub fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

/// Outcome of a spawned process or a conversion attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunDetails {
    /// Exit code; see [`SIGNAL_EXIT_CODE`] and [`NOT_ATTEMPTED_EXIT_CODE`]
    pub exit_code: i32,
}

impl RunDetails {
    pub fn new(exit_code: i32) -> Self {
        Self { exit_code }
    }

    /// Normalize a process exit code, mapping "no code" to [`SIGNAL_EXIT_CODE`]
    pub fn from_code(code: Option<i32>) -> Self {
        Self::new(code.unwrap_or(SIGNAL_EXIT_CODE))
    }

    /// The step could not be attempted at all
    pub fn not_attempted() -> Self {
        Self::new(NOT_ATTEMPTED_EXIT_CODE)
    }

    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_details_from_code() {
        assert_eq!(RunDetails::from_code(Some(0)).exit_code, 0);
        assert_eq!(RunDetails::from_code(Some(2)).exit_code, 2);
        assert_eq!(RunDetails::from_code(None).exit_code, 150);
        assert_eq!(RunDetails::not_attempted().exit_code, -1);
        assert!(RunDetails::new(0).success());
        assert!(!RunDetails::not_attempted().success());
    }

    #[test]
    fn test_blank_fields_are_absent() {
        let opts = RunOptions::new("/work")
            .with_install_dir("  ")
            .with_workspace("/ws");

        assert!(opts.install_dir().is_none());
        assert_eq!(opts.workspace(), Some(Path::new("/ws")));
        assert!(opts.java_root_path().is_none());
        assert_eq!(opts.report_location(), "");
    }
}
