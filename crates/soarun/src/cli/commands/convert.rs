//! Convert command - XUnit conversion of an existing report

use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use tracing::info;

use soarun_core::{build_environment, RunOptions, SoarunError, TracingReporter, WorkflowError};

use super::run::print_summary;
use super::{apply_config, input, working_dir};
use crate::cli::Cli;
use crate::workflow::{self, RunSummary};

/// Convert an existing SOAtest XML report to XUnit
#[derive(Debug, Args)]
pub struct ConvertCommand {
    /// Report file or directory, relative to the working directory [default: configured report]
    pub report: Option<String>,

    /// Directory the report location is resolved against
    #[arg(long, env = "INPUT_WORKINGDIR")]
    pub working_dir: Option<PathBuf>,

    /// Installation folder of Parasoft SOAtest, searched for its bundled Java
    #[arg(long, env = "INPUT_INSTALLDIR")]
    pub install_dir: Option<String>,

    /// Java installation to use instead of the bundled one
    #[arg(long, env = "INPUT_JAVAROOTPATH")]
    pub java_root_path: Option<String>,

    /// Directory holding the Saxon jar and XUnit stylesheet [default: next to the executable]
    #[arg(long, env = "SOARUN_ASSETS_DIR")]
    pub assets_dir: Option<PathBuf>,

    /// Kill the converter after this many seconds
    #[arg(long)]
    pub timeout: Option<u64>,
}

impl ConvertCommand {
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<i32> {
        let runtime = tokio::runtime::Runtime::new()?;
        runtime.block_on(self.execute_async(cli))
    }

    async fn execute_async(&self, cli: &Cli) -> anyhow::Result<i32> {
        let options = self.options()?;
        info!(location = options.report_location(), "executing convert command");

        let env = build_environment(std::env::vars_os());
        let reporter = TracingReporter;

        let conversion = tokio::select! {
            result = workflow::convert_report(&options, &env, &reporter) => result?,
            _ = tokio::signal::ctrl_c() => {
                return Err(SoarunError::from(WorkflowError::Cancelled).into());
            }
        };

        let summary = RunSummary::from_conversion(conversion);
        print_summary(&summary, cli)?;
        Ok(summary.exit_code)
    }

    fn options(&self) -> anyhow::Result<RunOptions> {
        let mut options = RunOptions::new(working_dir(self.working_dir.as_deref())?)
            .with_convert_report(true);
        options.report = input(&self.report);
        options.install_dir = input(&self.install_dir);
        options.java_root_path = input(&self.java_root_path);
        options.assets_dir = self.assets_dir.clone();
        options.timeout = self.timeout.map(Duration::from_secs);
        apply_config(&mut options)?;
        Ok(options)
    }
}
