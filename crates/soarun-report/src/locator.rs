//! XML report discovery
//!
//! SOAtest writes `report.xml` (or `<name>.xml` next to a configured
//! `<name>.html`) and, depending on settings, timestamped siblings such as
//! `report_1700000000.xml`. The locator picks the newest one.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, Local};
use tracing::debug;
use walkdir::WalkDir;

use soarun_core::reporter::{RunEvent, RunReporter};

/// Name prefix searched for when the report location is a directory
pub const DEFAULT_REPORT_PREFIX: &str = "report";

const XML_EXTENSION: &str = ".xml";

/// A report candidate with its modification time
#[derive(Debug, Clone)]
struct Candidate {
    path: PathBuf,
    modified: SystemTime,
}

/// Locate the SOAtest XML report for a configured location.
///
/// `report` may be a file or directory, absolute or relative to
/// `working_dir`. A file contributes its directory and stem as the search
/// directory and name prefix; a directory is searched for names starting with
/// [`DEFAULT_REPORT_PREFIX`]. Matches must end in `.xml`. When several match,
/// the most recently modified wins; on equal times the name that sorts last
/// wins. Returns `None` when nothing matches; never fails.
pub fn locate(report: &Path, working_dir: &Path, reporter: &dyn RunReporter) -> Option<PathBuf> {
    let resolved = if report.is_absolute() {
        report.to_path_buf()
    } else {
        working_dir.join(report)
    };
    debug!(path = %resolved.display(), "looking for SOAtest XML report");

    let metadata = match std::fs::metadata(&resolved) {
        Ok(metadata) => metadata,
        Err(_) => {
            debug!(path = %resolved.display(), "report location does not exist");
            return None;
        }
    };

    let (search_dir, prefix) = if metadata.is_dir() {
        (resolved, DEFAULT_REPORT_PREFIX.to_string())
    } else {
        let dir = resolved.parent()?.to_path_buf();
        let stem = resolved.file_stem()?.to_string_lossy().into_owned();
        (dir, stem)
    };

    let mut candidates = find_candidates(&search_dir, &prefix);
    match candidates.len() {
        0 => {
            debug!(
                dir = %search_dir.display(),
                prefix = %prefix,
                "no XML report matched"
            );
            None
        }
        1 => {
            let path = candidates.remove(0).path;
            reporter.report(&RunEvent::ReportFound { path: path.clone() });
            Some(path)
        }
        count => {
            let latest = candidates.into_iter().max_by_key(|c| c.modified)?;
            debug!(
                modified = %DateTime::<Local>::from(latest.modified).to_rfc3339(),
                "selected latest report"
            );
            reporter.report(&RunEvent::LatestReportSelected {
                path: latest.path.clone(),
                candidates: count,
            });
            Some(latest.path)
        }
    }
}

/// List `<prefix>*.xml` files directly inside `dir`, ordered by file name.
///
/// Symlinks are followed; a link counts by its target's type and mtime.
fn find_candidates(dir: &Path, prefix: &str) -> Vec<Candidate> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            let name = entry.file_name().to_string_lossy();
            name.starts_with(prefix) && name.ends_with(XML_EXTENSION)
        })
        .filter_map(|entry| {
            let modified = entry.metadata().ok()?.modified().ok()?;
            Some(Candidate {
                path: entry.into_path(),
                modified,
            })
        })
        .collect()
}
