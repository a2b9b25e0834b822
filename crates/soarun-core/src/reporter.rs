//! Pipeline progress reporting

use std::path::PathBuf;
use std::sync::Mutex;

/// Events emitted while running SOAtest and converting its report
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunEvent {
    /// A process is about to start
    Started { command: String },
    /// A process produced a line of output
    Output { line: String, is_stderr: bool },
    /// A process finished
    Exited { program: String, exit_code: i32 },
    /// Exactly one XML report matched
    ReportFound { path: PathBuf },
    /// Several XML reports matched and the newest was taken
    LatestReportSelected { path: PathBuf, candidates: usize },
    /// A Java executable was located for report conversion
    JavaFound { path: PathBuf },
    /// No usable Java executable
    JavaMissing { reason: String },
    /// Conversion of a report is starting
    ConversionStarted { source: PathBuf },
    /// The XUnit report was written
    ConversionSucceeded { output: PathBuf },
    /// The conversion process exited non-zero
    ConversionFailed { source: PathBuf, exit_code: i32 },
}

/// Trait for reporting pipeline progress
pub trait RunReporter: Send + Sync {
    /// Handle a pipeline event
    fn report(&self, event: &RunEvent);
}

/// Reporter that logs to tracing
#[derive(Debug, Default)]
pub struct TracingReporter;

impl RunReporter for TracingReporter {
    fn report(&self, event: &RunEvent) {
        match event {
            RunEvent::Started { command } => {
                tracing::info!("{}", command);
            }
            RunEvent::Output { line, .. } => {
                tracing::info!("{}", line);
            }
            RunEvent::Exited { program, exit_code } => {
                tracing::debug!(program = %program, exit_code, "process exited");
            }
            RunEvent::ReportFound { path } => {
                tracing::info!("Found Parasoft SOAtest XML report file: {}", path.display());
            }
            RunEvent::LatestReportSelected { path, candidates } => {
                tracing::debug!(candidates, "comparing report modification times");
                tracing::info!(
                    "Found multiple Parasoft SOAtest XML reports and took the latest one: {}",
                    path.display()
                );
            }
            RunEvent::JavaFound { path } => {
                tracing::debug!("Found Java located at: {}", path.display());
            }
            RunEvent::JavaMissing { reason } => {
                tracing::warn!(
                    "Unable to process the XML report using Java bundled with SOAtest because {}",
                    reason
                );
            }
            RunEvent::ConversionStarted { source } => {
                tracing::info!(
                    "Converting Parasoft SOAtest report to XUnit format: {}",
                    source.display()
                );
            }
            RunEvent::ConversionSucceeded { output } => {
                tracing::info!("XUnit report generated successfully: {}", output.display());
            }
            RunEvent::ConversionFailed { source, exit_code } => {
                tracing::error!(
                    "Failed to convert report {} (exit code: {})",
                    source.display(),
                    exit_code
                );
            }
        }
    }
}

/// Reporter that collects events for later inspection (useful for testing)
#[derive(Debug, Default)]
pub struct CollectingReporter {
    events: Mutex<Vec<RunEvent>>,
}

impl CollectingReporter {
    /// Get all collected events
    pub fn events(&self) -> Vec<RunEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Lines of process output, in arrival order
    pub fn output_lines(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                RunEvent::Output { line, .. } => Some(line),
                _ => None,
            })
            .collect()
    }
}

impl RunReporter for CollectingReporter {
    fn report(&self, event: &RunEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}
