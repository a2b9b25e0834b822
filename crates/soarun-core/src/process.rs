//! Process execution with streamed output

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tracing::debug;

use crate::command::CommandSpec;
use crate::environment::Environment;
use crate::error::{ProcessError, Result};
use crate::reporter::{RunEvent, RunReporter};
use crate::types::RunDetails;

/// Consecutive read failures tolerated on one pipe before it is abandoned
const MAX_READ_ERRORS: u32 = 16;

#[cfg(windows)]
const CREATE_NO_WINDOW: u32 = 0x0800_0000;

/// How to launch a process
#[derive(Debug, Clone, Copy)]
pub struct ExecOptions<'a> {
    /// Directory the process runs in
    pub cwd: &'a Path,
    /// Complete environment for the process
    pub env: &'a Environment,
    /// Kill the process if it runs longer than this
    pub timeout: Option<Duration>,
}

/// Run a command to completion.
///
/// Every line written to stdout or stderr is forwarded to `reporter` with
/// trailing whitespace removed. Bytes that are not valid UTF-8 are replaced,
/// never dropped, and both pipes are drained until the process closes them. The two streams are drained concurrently, so
/// their relative order is not preserved. A process that ends without an exit
/// code (killed by a signal) yields [`SIGNAL_EXIT_CODE`](crate::types::SIGNAL_EXIT_CODE).
/// Failure to start the process is an error, never an exit code.
pub async fn execute(
    spec: &CommandSpec,
    opts: ExecOptions<'_>,
    reporter: &dyn RunReporter,
) -> Result<RunDetails> {
    let program = spec.program_name();
    debug!(program = %program, cwd = %opts.cwd.display(), "spawning process");

    let mut cmd = Command::new(&spec.program);
    cmd.args(&spec.args)
        .current_dir(opts.cwd)
        .env_clear()
        .envs(opts.env)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    #[cfg(windows)]
    cmd.creation_flags(CREATE_NO_WINDOW);

    let mut child = cmd.spawn().map_err(|source| ProcessError::SpawnFailed {
        program: program.clone(),
        source,
    })?;

    let stdout = child.stdout.take();
    let stderr = child.stderr.take();

    let run = async {
        let (_, _, status) = tokio::join!(
            forward_lines(stdout, false, reporter),
            forward_lines(stderr, true, reporter),
            child.wait()
        );
        status
    };

    let status = match opts.timeout {
        Some(limit) => {
            let outcome = tokio::time::timeout(limit, run).await;
            match outcome {
                Ok(status) => status,
                Err(_) => {
                    let _ = child.kill().await;
                    return Err(ProcessError::TimedOut {
                        program,
                        seconds: limit.as_secs(),
                    }
                    .into());
                }
            }
        }
        None => run.await,
    };

    let status = status.map_err(|source| ProcessError::WaitFailed {
        program: program.clone(),
        source,
    })?;

    let details = RunDetails::from_code(status.code());
    reporter.report(&RunEvent::Exited {
        program,
        exit_code: details.exit_code,
    });
    Ok(details)
}

/// Forward each line of a child stream to the reporter.
///
/// Lines are split on raw `\n` bytes and decoded lossily. A read error is
/// logged and reading continues, so the child never blocks on a full pipe.
async fn forward_lines<R>(stream: Option<R>, is_stderr: bool, reporter: &dyn RunReporter)
where
    R: AsyncRead + Unpin,
{
    let Some(stream) = stream else {
        return;
    };

    let mut reader = BufReader::new(stream);
    let mut buf = Vec::new();
    let mut errors = 0u32;
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => break,
            Ok(_) => {
                errors = 0;
                reporter.report(&RunEvent::Output {
                    line: String::from_utf8_lossy(&buf).trim_end().to_string(),
                    is_stderr,
                });
            }
            Err(e) if errors < MAX_READ_ERRORS => {
                errors += 1;
                debug!(error = %e, is_stderr, "error reading process output");
            }
            Err(e) => {
                debug!(error = %e, is_stderr, "giving up on process output");
                break;
            }
        }
    }
}
