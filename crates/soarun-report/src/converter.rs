//! SOAtest XML to XUnit conversion
//!
//! The conversion runs the Saxon XSLT processor on the bundled Java runtime.
//! When no Java runtime can be found the conversion is not attempted and
//! [`NOT_ATTEMPTED_EXIT_CODE`](soarun_core::NOT_ATTEMPTED_EXIT_CODE) is
//! returned; there is no in-process fallback.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::debug;

use soarun_core::command::CommandSpec;
use soarun_core::environment::Environment;
use soarun_core::error::{ReportError, Result};
use soarun_core::process::{execute, ExecOptions};
use soarun_core::reporter::{RunEvent, RunReporter};
use soarun_core::types::RunDetails;

/// Saxon jar, relative to the assets directory
pub const SAXON_JAR: &str = "SaxonHE12-2J/saxon-he-12.2.jar";

/// SOAtest to XUnit stylesheet, relative to the assets directory
pub const XUNIT_STYLESHEET: &str = "soatest-xunit.xsl";

/// Stylesheet parameter carrying the CI working directory
pub const WORKING_DIR_PARAM: &str = "pipelineBuildWorkingDirectory";

const XML_SUFFIX: &str = ".xml";
const XUNIT_SUFFIX: &str = "-xunit.xml";

/// Location of the XSLT engine and stylesheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformAssets {
    pub jar: PathBuf,
    pub stylesheet: PathBuf,
}

impl TransformAssets {
    /// Assets laid out under `dir`
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            jar: dir.join(SAXON_JAR),
            stylesheet: dir.join(XUNIT_STYLESHEET),
        }
    }

    /// Assets installed next to the running executable
    pub fn beside_executable() -> Result<Self> {
        let exe = std::env::current_exe()?;
        let dir = exe.parent().unwrap_or_else(|| Path::new("."));
        Ok(Self::in_dir(dir))
    }

    /// Fail if the jar or the stylesheet is missing
    pub fn verify(&self) -> Result<()> {
        for (name, path) in [("Saxon jar", &self.jar), ("XUnit stylesheet", &self.stylesheet)] {
            if !path.is_file() {
                return Err(ReportError::AssetMissing {
                    name: name.to_string(),
                    path: path.clone(),
                }
                .into());
            }
        }
        Ok(())
    }
}

/// Path of the XUnit report written next to `report`.
///
/// `reports/report.xml` becomes `reports/report-xunit.xml`.
pub fn xunit_output_path(report: &Path) -> Result<PathBuf> {
    let text = report.to_string_lossy();
    match text.strip_suffix(XML_SUFFIX) {
        Some(base) => Ok(PathBuf::from(format!("{}{}", base, XUNIT_SUFFIX))),
        None => Err(ReportError::NotXml(report.to_path_buf()).into()),
    }
}

/// Inputs for a conversion
#[derive(Debug, Clone, Copy)]
pub struct ConvertOptions<'a> {
    /// CI working directory, stamped into the XUnit output
    pub working_dir: &'a Path,
    /// Java executable; `None` means conversion cannot be attempted
    pub java: Option<&'a Path>,
    /// Transform engine and stylesheet
    pub assets: &'a TransformAssets,
    /// Environment for the Java process
    pub env: &'a Environment,
    /// Kill the Java process if it runs longer than this
    pub timeout: Option<Duration>,
}

/// Convert a SOAtest XML report into a sibling `-xunit.xml` file
pub async fn convert(
    report: &Path,
    opts: ConvertOptions<'_>,
    reporter: &dyn RunReporter,
) -> Result<RunDetails> {
    let output = xunit_output_path(report)?;

    let Some(java) = opts.java else {
        debug!("no Java runtime, skipping conversion");
        return Ok(RunDetails::not_attempted());
    };

    opts.assets.verify()?;

    reporter.report(&RunEvent::ConversionStarted {
        source: report.to_path_buf(),
    });

    let spec = transform_command(java, opts.assets, report, &output, opts.working_dir);
    reporter.report(&RunEvent::Started {
        command: spec.display(),
    });

    let details = execute(
        &spec,
        ExecOptions {
            cwd: opts.working_dir,
            env: opts.env,
            timeout: opts.timeout,
        },
        reporter,
    )
    .await?;

    if details.success() {
        reporter.report(&RunEvent::ConversionSucceeded { output });
    } else {
        reporter.report(&RunEvent::ConversionFailed {
            source: report.to_path_buf(),
            exit_code: details.exit_code,
        });
    }

    Ok(details)
}

/// Saxon command line: `java -jar <jar> -xsl:<xsl> -s:<src> -o:<out> param=value`
pub fn transform_command(
    java: &Path,
    assets: &TransformAssets,
    source: &Path,
    output: &Path,
    working_dir: &Path,
) -> CommandSpec {
    CommandSpec::new(java)
        .arg("-jar")
        .arg(assets.jar.as_os_str())
        .arg(format!("-xsl:{}", assets.stylesheet.display()))
        .arg(format!("-s:{}", source.display()))
        .arg(format!("-o:{}", output.display()))
        .arg(format!("{}={}", WORKING_DIR_PARAM, working_dir.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use soarun_core::error::SoarunError;
    use soarun_core::reporter::CollectingReporter;
    use tempfile::TempDir;

    #[cfg(unix)]
    fn assets_in(dir: &Path) -> TransformAssets {
        let assets = TransformAssets::in_dir(dir);
        std::fs::create_dir_all(assets.jar.parent().unwrap()).unwrap();
        std::fs::write(&assets.jar, "").unwrap();
        std::fs::write(&assets.stylesheet, "").unwrap();
        assets
    }

    #[test]
    fn test_xunit_output_path() {
        assert_eq!(
            xunit_output_path(Path::new("reports/report.xml")).unwrap(),
            PathBuf::from("reports/report-xunit.xml")
        );
        assert_eq!(
            xunit_output_path(Path::new("/tmp/a.xml.d/report_17.xml")).unwrap(),
            PathBuf::from("/tmp/a.xml.d/report_17-xunit.xml")
        );
        assert!(xunit_output_path(Path::new("reports/report.html")).is_err());
    }

    #[test]
    fn test_transform_command_arguments() {
        let assets = TransformAssets::in_dir(Path::new("/opt/soarun"));
        let spec = transform_command(
            Path::new("path/to/SOAtest/bundled/java"),
            &assets,
            Path::new("sourceReport.xml"),
            Path::new("report-xunit.xml"),
            Path::new("workspace"),
        );

        let line = spec.display();
        assert!(line.starts_with("path/to/SOAtest/bundled/java -jar"));
        assert!(line.contains("-xsl:/opt/soarun"));
        assert!(line.contains("soatest-xunit.xsl -s:"));
        assert!(line.contains("-s:sourceReport.xml"));
        assert!(line.contains("-o:report-xunit.xml"));
        assert!(line.ends_with("pipelineBuildWorkingDirectory=workspace"));
    }

    #[test]
    fn test_verify_reports_missing_asset() {
        let temp = TempDir::new().unwrap();
        let assets = TransformAssets::in_dir(temp.path());

        let err = assets.verify().unwrap_err();
        assert!(matches!(
            err,
            SoarunError::Report(ReportError::AssetMissing { .. })
        ));
    }

    #[tokio::test]
    async fn test_without_java_conversion_is_not_attempted() {
        let temp = TempDir::new().unwrap();
        let report = temp.path().join("report.xml");
        std::fs::write(&report, "<ResultsSession/>").unwrap();
        let assets = TransformAssets::in_dir(temp.path());
        let env = Environment::new();
        let reporter = CollectingReporter::default();

        let details = convert(
            &report,
            ConvertOptions {
                working_dir: temp.path(),
                java: None,
                assets: &assets,
                env: &env,
                timeout: None,
            },
            &reporter,
        )
        .await
        .unwrap();

        assert_eq!(details.exit_code, -1);
        assert!(!temp.path().join("report-xunit.xml").exists());
    }

    #[cfg(unix)]
    fn fake_java(dir: &Path, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let java = dir.join("java");
        std::fs::write(&java, format!("#!/bin/sh\n{}\n", body)).unwrap();
        std::fs::set_permissions(&java, std::fs::Permissions::from_mode(0o755)).unwrap();
        java
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_java_conversion_writes_xunit_report() {
        let temp = TempDir::new().unwrap();
        let report = temp.path().join("report.xml");
        std::fs::write(&report, "<ResultsSession/>").unwrap();
        let assets = assets_in(&temp.path().join("assets"));
        let java = fake_java(
            temp.path(),
            r#"for a in "$@"; do case "$a" in -o:*) out="${a#-o:}";; esac; done
echo "<testsuites/>" > "$out""#,
        );
        let env: Environment = std::env::vars_os().collect();
        let reporter = CollectingReporter::default();

        let details = convert(
            &report,
            ConvertOptions {
                working_dir: temp.path(),
                java: Some(&java),
                assets: &assets,
                env: &env,
                timeout: None,
            },
            &reporter,
        )
        .await
        .unwrap();

        let output = temp.path().join("report-xunit.xml");
        assert_eq!(details.exit_code, 0);
        assert_eq!(
            std::fs::read_to_string(&output).unwrap().trim(),
            "<testsuites/>"
        );
        assert!(reporter
            .events()
            .contains(&RunEvent::ConversionSucceeded { output }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_java_failure_exit_code_is_returned() {
        let temp = TempDir::new().unwrap();
        let report = temp.path().join("report.xml");
        std::fs::write(&report, "<ResultsSession/>").unwrap();
        let assets = assets_in(&temp.path().join("assets"));
        let java = fake_java(temp.path(), "echo 'Error on line 1' >&2; exit 2");
        let env: Environment = std::env::vars_os().collect();
        let reporter = CollectingReporter::default();

        let details = convert(
            &report,
            ConvertOptions {
                working_dir: temp.path(),
                java: Some(&java),
                assets: &assets,
                env: &env,
                timeout: None,
            },
            &reporter,
        )
        .await
        .unwrap();

        assert_eq!(details.exit_code, 2);
        assert_eq!(reporter.output_lines(), vec!["Error on line 1".to_string()]);
        assert!(reporter.events().contains(&RunEvent::ConversionFailed {
            source: report,
            exit_code: 2
        }));
    }

    #[tokio::test]
    async fn test_missing_assets_fail_before_running_java() {
        let temp = TempDir::new().unwrap();
        let report = temp.path().join("report.xml");
        let env = Environment::new();
        let reporter = CollectingReporter::default();

        let err = convert(
            &report,
            ConvertOptions {
                working_dir: temp.path(),
                java: Some(Path::new("/usr/bin/java")),
                assets: &TransformAssets::in_dir(&temp.path().join("missing")),
                env: &env,
                timeout: None,
            },
            &reporter,
        )
        .await
        .unwrap_err();

        assert!(matches!(
            err,
            SoarunError::Report(ReportError::AssetMissing { .. })
        ));
        assert!(reporter.events().is_empty());
    }
}
