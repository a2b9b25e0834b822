//! SOAtest command-line assembly
//!
//! Options are turned into a structured [`CommandSpec`] (program plus
//! discrete arguments) so that no shell ever re-parses user-supplied paths.
//! The quoted single-line rendering is kept for logs and is byte-identical
//! across platforms for identical input.

use std::ffi::OsString;
use std::path::PathBuf;

use crate::error::{ConfigError, Result};
use crate::types::{present, RunOptions};

/// Name of the SOAtest command-line executable
pub const SOATEST_CLI: &str = "soatestcli";

/// Specification for a command to execute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    /// The program to execute
    pub program: PathBuf,
    /// Arguments as discrete elements
    pub args: Vec<OsString>,
}

impl CommandSpec {
    /// Create a new spec for the given program
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Add a single argument
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Add multiple arguments
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Program name for messages
    pub fn program_name(&self) -> String {
        self.program.display().to_string()
    }

    /// Render as a single line, quoting arguments that contain whitespace
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_os_str())
            .chain(self.args.iter().map(OsString::as_os_str))
            .map(|part| {
                let part = part.to_string_lossy();
                if part.is_empty() || part.chars().any(char::is_whitespace) {
                    format!("\"{}\"", part)
                } else {
                    part.into_owned()
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// One piece of the SOAtest command line
#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    /// Flag name, rendered as-is
    Flag(&'static str),
    /// User value, rendered in double quotes
    Quoted(String),
    /// Free-form parameters, rendered verbatim and split into words
    Raw(String),
}

/// Assembled SOAtest invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoatestCommand {
    program: String,
    quote_program: bool,
    tokens: Vec<Token>,
}

impl SoatestCommand {
    /// Assemble the invocation for the given options.
    ///
    /// Flags follow a fixed order: `-data`, `-config`, `-resource`,
    /// `-settings`, `-report`, `-property report.format=…`, `-environment`,
    /// then the additional parameters. Blank options are skipped.
    pub fn from_options(options: &RunOptions) -> Self {
        let (program, quote_program) = match options.install_dir.as_deref().map(str::trim) {
            Some(dir) if !dir.is_empty() => (join_program(dir, SOATEST_CLI), true),
            _ => (SOATEST_CLI.to_string(), false),
        };

        let mut tokens = Vec::new();
        push_flag(&mut tokens, "-data", &options.workspace);
        push_flag(&mut tokens, "-config", &options.test_config);
        push_flag(&mut tokens, "-resource", &options.resource);
        push_flag(&mut tokens, "-settings", &options.settings);
        push_flag(&mut tokens, "-report", &options.report);
        if let Some(format) = present(&options.report_format) {
            tokens.push(Token::Flag("-property"));
            tokens.push(Token::Quoted(format!("report.format={}", format)));
        }
        push_flag(&mut tokens, "-environment", &options.environment);

        if let Some(params) = present(&options.additional_params) {
            tokens.push(Token::Raw(params.trim().to_string()));
        }

        Self {
            program,
            quote_program,
            tokens,
        }
    }

    /// Single-line rendering used in logs
    pub fn display(&self) -> String {
        let mut line = if self.quote_program {
            format!("\"{}\"", self.program)
        } else {
            self.program.clone()
        };

        for token in &self.tokens {
            line.push(' ');
            match token {
                Token::Flag(name) => line.push_str(name),
                Token::Quoted(value) => {
                    line.push('"');
                    line.push_str(value);
                    line.push('"');
                }
                Token::Raw(params) => line.push_str(params),
            }
        }

        line.trim().to_string()
    }

    /// Structured form for execution.
    ///
    /// Additional parameters are split with POSIX shell-word rules.
    pub fn to_spec(&self) -> Result<CommandSpec> {
        let mut spec = CommandSpec::new(&self.program);
        for token in &self.tokens {
            spec = match token {
                Token::Flag(name) => spec.arg(*name),
                Token::Quoted(value) => spec.arg(value),
                Token::Raw(params) => {
                    let words = shell_words::split(params).map_err(|e| {
                        ConfigError::InvalidParams {
                            params: params.clone(),
                            message: e.to_string(),
                        }
                    })?;
                    spec.args(words)
                }
            };
        }
        Ok(spec)
    }
}

fn push_flag(tokens: &mut Vec<Token>, name: &'static str, value: &Option<String>) {
    if let Some(v) = present(value) {
        tokens.push(Token::Flag(name));
        tokens.push(Token::Quoted(v.to_string()));
    }
}

/// Join an install directory and executable name with a forward slash
fn join_program(dir: &str, exe: &str) -> String {
    let dir = dir.trim_end_matches(['/', '\\']);
    if dir.is_empty() {
        format!("/{}", exe)
    } else {
        format!("{}/{}", dir, exe)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_options() -> RunOptions {
        RunOptions::new("/work")
            .with_install_dir("C:/Program Files/Parasoft/SOAtest_Virtualize/2022.1")
            .with_workspace("D:/soa-workspace/soatest")
            .with_test_config("builtin://Demo Configuration")
            .with_resource("TestAssets")
            .with_settings("localsettings.properties")
            .with_report("reports")
            .with_report_format("xml")
            .with_environment("testEvirontment")
            .with_additional_params("params")
    }

    #[test]
    fn test_only_working_dir_gives_bare_executable() {
        let cmd = SoatestCommand::from_options(&RunOptions::new("/work"));
        assert_eq!(cmd.display(), "soatestcli");

        let spec = cmd.to_spec().unwrap();
        assert_eq!(spec.program, PathBuf::from("soatestcli"));
        assert!(spec.args.is_empty());
    }

    #[test]
    fn test_all_fields_render_in_fixed_order() {
        let cmd = SoatestCommand::from_options(&full_options());
        assert_eq!(
            cmd.display(),
            "\"C:/Program Files/Parasoft/SOAtest_Virtualize/2022.1/soatestcli\" \
             -data \"D:/soa-workspace/soatest\" \
             -config \"builtin://Demo Configuration\" \
             -resource \"TestAssets\" \
             -settings \"localsettings.properties\" \
             -report \"reports\" \
             -property \"report.format=xml\" \
             -environment \"testEvirontment\" params"
        );
    }

    #[test]
    fn test_each_flag_appears_once() {
        let line = SoatestCommand::from_options(&full_options()).display();
        for flag in [
            "-data ",
            "-config ",
            "-resource ",
            "-settings ",
            "-report ",
            "-property ",
            "-environment ",
        ] {
            assert_eq!(line.matches(flag).count(), 1, "flag {}", flag);
        }
    }

    #[test]
    fn test_blank_fields_are_omitted() {
        let opts = RunOptions::new("/work")
            .with_test_config("")
            .with_report("   ")
            .with_resource("suite.tst");
        let line = SoatestCommand::from_options(&opts).display();
        assert_eq!(line, "soatestcli -resource \"suite.tst\"");
        assert!(!line.contains("\"\""));
    }

    #[test]
    fn test_spec_keeps_values_as_single_arguments() {
        let opts = full_options().with_additional_params("-showdetails -D \"a b=c\"");
        let spec = SoatestCommand::from_options(&opts).to_spec().unwrap();

        assert_eq!(
            spec.program,
            PathBuf::from("C:/Program Files/Parasoft/SOAtest_Virtualize/2022.1/soatestcli")
        );
        let args: Vec<String> = spec
            .args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            args,
            vec![
                "-data",
                "D:/soa-workspace/soatest",
                "-config",
                "builtin://Demo Configuration",
                "-resource",
                "TestAssets",
                "-settings",
                "localsettings.properties",
                "-report",
                "reports",
                "-property",
                "report.format=xml",
                "-environment",
                "testEvirontment",
                "-showdetails",
                "-D",
                "a b=c",
            ]
        );
    }

    #[test]
    fn test_unbalanced_quotes_in_params_are_rejected() {
        let opts = RunOptions::new("/work").with_additional_params("-D \"oops");
        let err = SoatestCommand::from_options(&opts).to_spec().unwrap_err();
        assert!(err.to_string().contains("Invalid additional parameters"));
    }

    #[test]
    fn test_install_dir_trailing_separator() {
        let opts = RunOptions::new("/work").with_install_dir("/opt/parasoft/soatest/");
        assert_eq!(
            SoatestCommand::from_options(&opts).display(),
            "\"/opt/parasoft/soatest/soatestcli\""
        );
    }

    #[test]
    fn test_command_spec_display_quotes_whitespace() {
        let spec = CommandSpec::new("/usr/bin/java")
            .arg("-jar")
            .arg("/opt/my tools/saxon.jar")
            .arg("");
        assert_eq!(
            spec.display(),
            "/usr/bin/java -jar \"/opt/my tools/saxon.jar\" \"\""
        );
    }
}
