//! Run command - Execute SOAtest and convert its report

use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use tracing::info;

use soarun_core::{build_environment, RunOptions, SoarunError, TracingReporter, WorkflowError};

use super::{apply_config, input, working_dir};
use crate::cli::{output, Cli, OutputFormat};
use crate::workflow::{self, RunSummary, Stage};

/// Run SOAtest and optionally convert its report to XUnit
#[derive(Debug, Args)]
pub struct RunCommand {
    /// Installation folder of Parasoft SOAtest (soatestcli is looked up on PATH when unset)
    #[arg(long, env = "INPUT_INSTALLDIR")]
    pub install_dir: Option<String>,

    /// Working directory for running SOAtest [default: $GITHUB_WORKSPACE or current directory]
    #[arg(long, env = "INPUT_WORKINGDIR")]
    pub working_dir: Option<PathBuf>,

    /// SOAtest workspace, passed as -data
    #[arg(long = "soatest-workspace", env = "INPUT_SOATESTWORKSPACE")]
    pub workspace: Option<String>,

    /// Test configuration, e.g. "builtin://Demo Configuration"
    #[arg(long, env = "INPUT_TESTCONFIG")]
    pub test_config: Option<String>,

    /// Test suite(s) to run
    #[arg(long, env = "INPUT_RESOURCE")]
    pub resource: Option<String>,

    /// Settings file (.properties)
    #[arg(long, env = "INPUT_SETTINGS")]
    pub settings: Option<String>,

    /// Report file or directory
    #[arg(long, env = "INPUT_REPORT")]
    pub report: Option<String>,

    /// Report format, passed as -property report.format=<value>
    #[arg(long, env = "INPUT_REPORTFORMAT")]
    pub report_format: Option<String>,

    /// Environment file (.env)
    #[arg(long, env = "INPUT_ENVIRONMENT")]
    pub environment: Option<String>,

    /// Extra soatestcli parameters, split like a POSIX shell would
    #[arg(long, env = "INPUT_ADDITIONALPARAMS", allow_hyphen_values = true)]
    pub additional_params: Option<String>,

    /// Java installation used for the XUnit conversion
    #[arg(long, env = "INPUT_JAVAROOTPATH")]
    pub java_root_path: Option<String>,

    /// Convert the XML report to XUnit after a successful run
    #[arg(long = "convert-report", env = "INPUT_CONVERTREPORTTOXUNIT")]
    pub convert_report: bool,

    /// Kill SOAtest and the converter after this many seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Directory holding the Saxon jar and XUnit stylesheet [default: next to the executable]
    #[arg(long, env = "SOARUN_ASSETS_DIR")]
    pub assets_dir: Option<PathBuf>,
}

impl RunCommand {
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<i32> {
        let runtime = tokio::runtime::Runtime::new()?;
        runtime.block_on(self.execute_async(cli))
    }

    async fn execute_async(&self, cli: &Cli) -> anyhow::Result<i32> {
        let options = self.options()?;
        info!(
            working_dir = %options.working_dir.display(),
            convert = options.convert_report,
            "executing run command"
        );

        let env = build_environment(std::env::vars_os());
        let reporter = TracingReporter;

        let summary = tokio::select! {
            result = workflow::run(&options, &env, &reporter) => result?,
            _ = tokio::signal::ctrl_c() => {
                return Err(SoarunError::from(WorkflowError::Cancelled).into());
            }
        };

        print_summary(&summary, cli)?;
        Ok(summary.exit_code)
    }

    /// Merge flags with config-file defaults
    fn options(&self) -> anyhow::Result<RunOptions> {
        let mut options = RunOptions {
            install_dir: input(&self.install_dir),
            working_dir: working_dir(self.working_dir.as_deref())?,
            workspace: input(&self.workspace),
            test_config: input(&self.test_config),
            report: input(&self.report),
            settings: input(&self.settings),
            resource: input(&self.resource),
            report_format: input(&self.report_format),
            environment: input(&self.environment),
            java_root_path: input(&self.java_root_path),
            additional_params: input(&self.additional_params),
            convert_report: self.convert_report,
            timeout: self.timeout.map(Duration::from_secs),
            assets_dir: self.assets_dir.clone(),
        };
        apply_config(&mut options)?;
        Ok(options)
    }
}

/// Print a pipeline summary in the requested format
pub(super) fn print_summary(summary: &RunSummary, cli: &Cli) -> anyhow::Result<()> {
    if cli.format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(summary)?);
        return Ok(());
    }

    if let Some(message) = summary.failure_message() {
        output::failure(&message);
        return Ok(());
    }

    if cli.quiet {
        return Ok(());
    }

    output::success(match summary.stage {
        Stage::Run => "SOAtest run completed",
        Stage::Convert => "XUnit report generated",
    });
    if cli.verbose && !summary.command_line.is_empty() {
        println!("{}", output::key_value("command", &summary.command_line));
    }
    if let Some(report) = &summary.report {
        println!("{}", output::key_value("report", &report.display().to_string()));
    }
    if let Some(xunit) = &summary.xunit_report {
        println!(
            "{}",
            output::key_value(
                "xunit",
                &output::path_style().apply_to(xunit.display()).to_string()
            )
        );
    }
    Ok(())
}
