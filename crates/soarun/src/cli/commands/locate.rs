//! Locate command

use std::path::{Path, PathBuf};

use clap::Args;
use tracing::info;

use soarun_core::{ReportError, RunOptions, SoarunError, TracingReporter};
use soarun_report::locate;

use super::{apply_config, input, working_dir};
use crate::cli::{output, Cli, OutputFormat};

/// Find the SOAtest XML report for a location
#[derive(Debug, Args)]
pub struct LocateCommand {
    /// Report file or directory, relative to the working directory [default: configured report]
    pub report: Option<String>,

    /// Directory the report location is resolved against
    #[arg(long, env = "INPUT_WORKINGDIR")]
    pub working_dir: Option<PathBuf>,
}

impl LocateCommand {
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<i32> {
        let mut options = RunOptions::new(working_dir(self.working_dir.as_deref())?);
        options.report = input(&self.report);
        apply_config(&mut options)?;

        let location = options.report_location();
        info!(location, "executing locate command");

        let report = locate(Path::new(location), &options.working_dir, &TracingReporter)
            .ok_or_else(|| {
                SoarunError::from(ReportError::NotFound {
                    location: location.to_string(),
                })
            })?;

        match cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::json!({ "report": report }));
            }
            OutputFormat::Text => {
                println!("{}", output::path_style().apply_to(report.display()));
            }
        }
        Ok(crate::exit_codes::SUCCESS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Commands;
    use clap::Parser;
    use tempfile::TempDir;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("soarun").chain(args.iter().copied())).unwrap()
    }

    fn run(cli: &Cli) -> anyhow::Result<i32> {
        match &cli.command {
            Commands::Locate(cmd) => cmd.execute(cli),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_locate_existing_report() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("report.xml"), "<ResultsSession/>").unwrap();
        let work = temp.path().to_string_lossy().into_owned();

        let cli = cli(&["locate", "--working-dir", &work, "-q"]);
        assert_eq!(run(&cli).unwrap(), 0);
    }

    #[test]
    fn test_locate_missing_report_maps_to_exit_code() {
        let temp = TempDir::new().unwrap();
        let work = temp.path().to_string_lossy().into_owned();

        let cli = cli(&["locate", "reports", "--working-dir", &work]);
        let err = run(&cli).unwrap_err();
        assert_eq!(
            crate::exit_codes::for_error(&err),
            crate::exit_codes::REPORT_NOT_FOUND
        );
        assert!(err.to_string().ends_with("specified location: reports"));
    }
}
