//! CLI commands

mod completions;
mod convert;
mod init;
mod locate;
mod run;

use std::path::{Path, PathBuf};

use tracing::debug;

use soarun_core::config::load_config_or_default;
use soarun_core::RunOptions;

pub use completions::CompletionsCommand;
pub use convert::ConvertCommand;
pub use init::InitCommand;
pub use locate::LocateCommand;
pub use run::RunCommand;

/// Resolve the working directory.
///
/// Order: explicit flag (or `INPUT_WORKINGDIR`), `GITHUB_WORKSPACE`, then the
/// current directory. Relative paths are made absolute against the current
/// directory.
fn working_dir(explicit: Option<&Path>) -> anyhow::Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    let dir = explicit
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .or_else(|| {
            std::env::var_os("GITHUB_WORKSPACE")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
        })
        .unwrap_or_else(|| cwd.clone());

    Ok(if dir.is_absolute() { dir } else { cwd.join(dir) })
}

/// Fill options left unset on the command line from the nearest config file
fn apply_config(options: &mut RunOptions) -> anyhow::Result<()> {
    let (config, path) = load_config_or_default(&options.working_dir)?;
    if let Some(path) = path {
        debug!(path = %path.display(), "applying config defaults");
    }
    config.apply_to(options);
    Ok(())
}

/// Blank inputs count as unset
fn input(value: &Option<String>) -> Option<String> {
    value.clone().filter(|v| !v.trim().is_empty())
}
