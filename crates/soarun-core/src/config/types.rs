//! Configuration types

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::types::RunOptions;

/// File-based defaults for a SOAtest run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Installation folder of Parasoft SOAtest
    pub install_dir: Option<String>,

    /// SOAtest workspace (`-data`)
    pub workspace: Option<String>,

    /// Test configuration
    pub test_config: Option<String>,

    /// Test suite(s) to run
    pub resource: Option<String>,

    /// `.properties` settings file
    pub settings: Option<String>,

    /// Report location
    pub report: Option<String>,

    /// Report format
    pub report_format: Option<String>,

    /// `.env` environment file
    pub environment: Option<String>,

    /// Extra parameters for soatestcli
    pub additional_params: Option<String>,

    /// Java installation used for report conversion
    pub java_root_path: Option<String>,

    /// Convert the XML report to XUnit after a successful run
    pub convert_report: bool,

    /// Kill soatestcli after this many seconds
    pub timeout_secs: Option<u64>,

    /// Directory holding the Saxon jar and XUnit stylesheet
    pub assets_dir: Option<PathBuf>,
}

impl Config {
    /// Fill every option the command line left unset from this config
    pub fn apply_to(&self, options: &mut RunOptions) {
        fill(&mut options.install_dir, &self.install_dir);
        fill(&mut options.workspace, &self.workspace);
        fill(&mut options.test_config, &self.test_config);
        fill(&mut options.resource, &self.resource);
        fill(&mut options.settings, &self.settings);
        fill(&mut options.report, &self.report);
        fill(&mut options.report_format, &self.report_format);
        fill(&mut options.environment, &self.environment);
        fill(&mut options.additional_params, &self.additional_params);
        fill(&mut options.java_root_path, &self.java_root_path);

        options.convert_report |= self.convert_report;
        if options.timeout.is_none() {
            options.timeout = self.timeout_secs.map(Duration::from_secs);
        }
        if options.assets_dir.is_none() {
            options.assets_dir = self.assets_dir.clone();
        }
    }
}

fn fill<T: Clone>(target: &mut Option<T>, default: &Option<T>) {
    if target.is_none() {
        *target = default.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_keeps_explicit_options() {
        let config = Config {
            test_config: Some("user://Nightly".to_string()),
            report: Some("reports".to_string()),
            convert_report: true,
            timeout_secs: Some(60),
            ..Default::default()
        };

        let mut options = RunOptions::new("/work").with_report("out/report.xml");
        config.apply_to(&mut options);

        assert_eq!(options.report.as_deref(), Some("out/report.xml"));
        assert_eq!(options.test_config.as_deref(), Some("user://Nightly"));
        assert!(options.convert_report);
        assert_eq!(options.timeout, Some(Duration::from_secs(60)));
    }

    #[test]
    fn test_default_config_is_empty() {
        let mut options = RunOptions::new("/work");
        Config::default().apply_to(&mut options);
        assert!(options.report.is_none());
        assert!(!options.convert_report);
        assert!(options.timeout.is_none());
    }
}
