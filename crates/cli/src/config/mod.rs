//! Locating and reading `.mockgen.json` for the CLI

use anyhow::{Context, Result};
use mockgen_core::Config;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Loads the nearest config file at or above `cwd`.
///
/// Paths inside the file are relative to the directory holding it.
pub fn load_file_config(cwd: &Path, skip: bool) -> Result<Config> {
    if skip {
        return Ok(Config::default());
    }

    let Some(config_path) = Config::find_config_file(cwd) else {
        debug!("No config file found from {}", cwd.display());
        return Ok(Config::default());
    };

    debug!("Loading config from {}", config_path.display());
    let mut config = Config::load_from_file(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    let base = config_path.parent().unwrap_or(cwd);
    config.output_file = config.output_file.map(|p| relative_to(base, p));
    config.packages_file = config.packages_file.map(|p| relative_to(base, p));
    Ok(config)
}

fn relative_to(base: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}

/// Applies `-C`, returning the directory the run works in
pub fn enter_directory(chdir: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = chdir {
        std::env::set_current_dir(dir)
            .with_context(|| format!("Failed to change directory to {}", dir.display()))?;
    }
    std::env::current_dir().context("Failed to get current directory")
}
