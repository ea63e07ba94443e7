// src/core/paths.rs

use crate::constants::{PROJECT_CONFIG_FILENAME, USER_CONFIG_FILENAME};
use lazy_static::lazy_static;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;

lazy_static! {
    static ref XCPILOT_CONFIG_DIR: Mutex<Option<PathBuf>> = Mutex::new(None);
}

#[derive(Error, Debug)]
pub enum PathError {
    #[error("Could not find system config directory.")]
    ConfigDirNotFound,
    #[error("Could not create config directory at '{path}': {source}")]
    ConfigDirCreation {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Returns the path to the xcpilot configuration directory (`~/.config/xcpilot`).
/// Creates it if it doesn't exist.
///
/// This function is memoized: the first call computes and caches the path,
/// subsequent calls return the cached value instantly.
pub fn get_config_dir() -> Result<PathBuf, PathError> {
    let mut cached_path_guard = XCPILOT_CONFIG_DIR
        .lock()
        .expect("config dir mutex poisoned");

    if let Some(path) = &*cached_path_guard {
        return Ok(path.clone());
    }

    let config_path = dirs::config_dir()
        .ok_or(PathError::ConfigDirNotFound)?
        .join("xcpilot");

    if !config_path.exists() {
        fs::create_dir_all(&config_path).map_err(|e| PathError::ConfigDirCreation {
            path: config_path.display().to_string(),
            source: e,
        })?;
    }

    *cached_path_guard = Some(config_path.clone());

    Ok(config_path)
}

/// Path of the user-global configuration file inside a config directory.
pub fn user_config_path(config_dir: &Path) -> PathBuf {
    config_dir.join(USER_CONFIG_FILENAME)
}

/// Path of the optional project-local configuration file for a project root.
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(PROJECT_CONFIG_FILENAME)
}

/// Expands `~` and environment variables in a user-supplied path.
pub fn expand_user_path(input: &str) -> Result<PathBuf, anyhow::Error> {
    let expanded = shellexpand::full(input)
        .map_err(|e| anyhow::anyhow!("Failed to expand path '{}': {}", input, e))?;
    Ok(PathBuf::from(expanded.into_owned()))
}
