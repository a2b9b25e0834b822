//! soarun core - shared types, configuration and process execution
//!
//! This crate holds everything needed to launch Parasoft SOAtest from a CI
//! job: the run options, the command-line assembler, the child environment,
//! and an async process executor that streams output to a [`RunReporter`].

pub mod command;
pub mod config;
pub mod environment;
pub mod error;
pub mod process;
pub mod reporter;
pub mod types;

pub use command::{CommandSpec, SoatestCommand, SOATEST_CLI};
pub use config::Config;
pub use environment::{build_environment, Environment};
pub use error::{ConfigError, ProcessError, ReportError, Result, SoarunError, WorkflowError};
pub use process::{execute, ExecOptions};
pub use reporter::{CollectingReporter, RunEvent, RunReporter, TracingReporter};
pub use types::{RunDetails, RunOptions, NOT_ATTEMPTED_EXIT_CODE, SIGNAL_EXIT_CODE};
