//! Discovery of the Java runtime bundled with SOAtest

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use soarun_core::command::SOATEST_CLI;
use soarun_core::reporter::{RunEvent, RunReporter};

/// Directory name prefix of the SOAtest plugin that ships a JDK
pub const JDK_PLUGIN_PREFIX: &str = "com.parasoft.ptest.jdk.eclipse.core.web";

/// Platform-specific name of the Java launcher
pub fn java_executable_name() -> &'static str {
    if cfg!(windows) {
        "java.exe"
    } else {
        "java"
    }
}

/// Where to look for Java
#[derive(Debug, Clone, Default)]
pub struct JavaSearch {
    /// Explicit Java installation root; wins over everything else
    pub java_root: Option<PathBuf>,
    /// SOAtest installation; looked up on `PATH` when unset
    pub install_dir: Option<PathBuf>,
}

impl JavaSearch {
    /// Resolve the Java executable, reporting what was found.
    ///
    /// With an explicit root only `<root>/bin/java` is probed. Otherwise the
    /// SOAtest installation is searched for its bundled JDK plugin.
    pub fn find(&self, reporter: &dyn RunReporter) -> Option<PathBuf> {
        if let Some(root) = &self.java_root {
            let java = root.join("bin").join(java_executable_name());
            if java.is_file() {
                reporter.report(&RunEvent::JavaFound { path: java.clone() });
                return Some(java);
            }
            reporter.report(&RunEvent::JavaMissing {
                reason: format!("no Java executable exists at {}", java.display()),
            });
            return None;
        }

        let install_dir = match self.install_dir() {
            Some(dir) if dir.is_dir() => dir,
            _ => {
                reporter.report(&RunEvent::JavaMissing {
                    reason: "the SOAtest installation directory is missing".to_string(),
                });
                return None;
            }
        };

        match bundled_java(&install_dir) {
            Some(java) => {
                reporter.report(&RunEvent::JavaFound { path: java.clone() });
                Some(java)
            }
            None => {
                reporter.report(&RunEvent::JavaMissing {
                    reason: "it is missing".to_string(),
                });
                None
            }
        }
    }

    /// The explicit installation directory, or the directory of `soatestcli` on `PATH`
    fn install_dir(&self) -> Option<PathBuf> {
        if let Some(dir) = &self.install_dir {
            return Some(dir.clone());
        }
        let cli = which::which(SOATEST_CLI).ok()?;
        debug!(path = %cli.display(), "found soatestcli on PATH");
        cli.parent().map(Path::to_path_buf)
    }
}

/// Find the JDK bundled with a SOAtest installation.
///
/// Plugin directories are ordered by name and the first one carrying
/// [`JDK_PLUGIN_PREFIX`] is used; later matches are not consulted.
pub fn bundled_java(install_dir: &Path) -> Option<PathBuf> {
    let plugins = install_dir.join("plugins");
    if !plugins.is_dir() {
        debug!(path = %plugins.display(), "no plugins directory");
        return None;
    }

    let plugin = WalkDir::new(&plugins)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_dir())
        .find(|entry| {
            entry
                .file_name()
                .to_string_lossy()
                .starts_with(JDK_PLUGIN_PREFIX)
        })?;

    let java = plugin
        .path()
        .join("jdk")
        .join("bin")
        .join(java_executable_name());
    debug!(path = %java.display(), "probing bundled java");
    java.is_file().then_some(java)
}
