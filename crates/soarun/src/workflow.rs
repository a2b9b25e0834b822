//! SOAtest run pipeline
//!
//! Validate inputs, run `soatestcli`, then optionally locate the XML report
//! and convert it to XUnit. The final exit code is the tool's code, or the
//! converter's code when a conversion was attempted.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};

use soarun_core::environment::Environment;
use soarun_core::error::{ReportError, Result, WorkflowError};
use soarun_core::process::{execute, ExecOptions};
use soarun_core::reporter::{RunEvent, RunReporter};
use soarun_core::types::{RunDetails, RunOptions, NOT_ATTEMPTED_EXIT_CODE};
use soarun_core::SoatestCommand;
use soarun_report::{convert, locate, xunit_output_path, ConvertOptions, JavaSearch, TransformAssets};

/// Pipeline step that produced the final exit code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// `soatestcli`
    Run,
    /// Report location and XUnit conversion
    Convert,
}

/// Outcome of a pipeline run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Final exit code
    pub exit_code: i32,
    /// Step the exit code came from
    pub stage: Stage,
    /// Rendered `soatestcli` command line (empty when the tool was not run)
    pub command_line: String,
    /// XML report used for conversion
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<PathBuf>,
    /// XUnit report written by a successful conversion
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xunit_report: Option<PathBuf>,
}

impl RunSummary {
    /// Summary of a conversion run on its own
    pub fn from_conversion(conversion: Conversion) -> Self {
        Self {
            exit_code: conversion.details.exit_code,
            stage: Stage::Convert,
            command_line: String::new(),
            report: Some(conversion.report),
            xunit_report: conversion.xunit_report,
        }
    }

    /// Message describing a failed run, worded after the step that failed
    pub fn failure_message(&self) -> Option<String> {
        match (self.exit_code, self.stage) {
            (0, _) => None,
            (code, Stage::Run) => Some(format!("Failed to run SOAtest (exit code: {})", code)),
            (NOT_ATTEMPTED_EXIT_CODE, Stage::Convert) => Some(
                "Unable to convert the XML report to XUnit: no Java runtime found".to_string(),
            ),
            (code, Stage::Convert) => Some(format!(
                "Failed to convert the XML report to XUnit (exit code: {})",
                code
            )),
        }
    }
}

/// Result of locating and converting a report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    pub report: PathBuf,
    pub details: RunDetails,
    pub xunit_report: Option<PathBuf>,
}

/// Check that the working directory and the SOAtest workspace exist
pub fn validate(options: &RunOptions) -> Result<()> {
    if !options.working_dir.is_dir() {
        return Err(WorkflowError::WorkingDirNotFound(options.working_dir.clone()).into());
    }

    if let Some(workspace) = options.workspace() {
        if !resolve(&options.working_dir, workspace).is_dir() {
            return Err(WorkflowError::WorkspaceNotFound(workspace.to_path_buf()).into());
        }
    }

    Ok(())
}

/// Run SOAtest and, when requested, convert its report.
///
/// `env` is the complete environment for every spawned process.
pub async fn run(
    options: &RunOptions,
    env: &Environment,
    reporter: &dyn RunReporter,
) -> Result<RunSummary> {
    validate(options)?;
    info!(
        "Running SOAtest in working directory: {}",
        options.working_dir.display()
    );

    let command = SoatestCommand::from_options(options);
    let command_line = command.display();
    let spec = command.to_spec()?;
    reporter.report(&RunEvent::Started {
        command: command_line.clone(),
    });

    let details = execute(
        &spec,
        ExecOptions {
            cwd: &options.working_dir,
            env,
            timeout: options.timeout,
        },
        reporter,
    )
    .await?;

    let summary = RunSummary {
        exit_code: details.exit_code,
        stage: Stage::Run,
        command_line,
        report: None,
        xunit_report: None,
    };

    if !details.success() {
        warn!("Failed to run SOAtest (exit code: {})", details.exit_code);
        return Ok(summary);
    }
    info!("SOAtest finished (exit code: {})", details.exit_code);

    if !options.convert_report {
        debug!("report conversion not requested");
        return Ok(summary);
    }

    let conversion = convert_report(options, env, reporter).await?;
    Ok(RunSummary {
        command_line: summary.command_line,
        ..RunSummary::from_conversion(conversion)
    })
}

/// Locate the configured report and convert it to XUnit
pub async fn convert_report(
    options: &RunOptions,
    env: &Environment,
    reporter: &dyn RunReporter,
) -> Result<Conversion> {
    let location = options.report_location();
    let report = locate(Path::new(location), &options.working_dir, reporter).ok_or_else(|| {
        ReportError::NotFound {
            location: location.to_string(),
        }
    })?;

    let java = JavaSearch {
        java_root: options.java_root_path().map(Path::to_path_buf),
        install_dir: options.install_dir().map(Path::to_path_buf),
    }
    .find(reporter);

    let assets = match &options.assets_dir {
        Some(dir) => TransformAssets::in_dir(dir),
        None => TransformAssets::beside_executable()?,
    };

    let details = convert(
        &report,
        ConvertOptions {
            working_dir: &options.working_dir,
            java: java.as_deref(),
            assets: &assets,
            env,
            timeout: options.timeout,
        },
        reporter,
    )
    .await?;

    let xunit_report = if details.success() {
        Some(xunit_output_path(&report)?)
    } else {
        None
    };

    Ok(Conversion {
        report,
        details,
        xunit_report,
    })
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
