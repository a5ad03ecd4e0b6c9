// SPDX-License-Identifier: MPL-2.0
//! Centralized path management for application directories.
//!
//! # Path Resolution Order
//!
//! Paths are resolved in the following priority order:
//! 1. **Explicit override** - parameter to `_with_override()` functions (for tests)
//! 2. **CLI arguments** (`--data-dir`, `--config-dir`) - set via [`init_cli_overrides`]
//! 3. **Environment variables** (`VIDWATCH_DATA_DIR`, `VIDWATCH_CONFIG_DIR`)
//! 4. **Platform default** - via `dirs` crate

use std::path::PathBuf;
use std::sync::OnceLock;

/// Application name used for directory naming.
const APP_NAME: &str = "vidwatch";

/// Environment variable to override the data directory.
pub const ENV_DATA_DIR: &str = "VIDWATCH_DATA_DIR";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "VIDWATCH_CONFIG_DIR";

static CLI_DATA_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();
static CLI_CONFIG_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Records `--data-dir` / `--config-dir` once at startup.
///
/// Later calls are ignored and logged; the first values stay in effect.
pub fn init_cli_overrides(data_dir: Option<PathBuf>, config_dir: Option<PathBuf>) {
    set_overrides(&CLI_DATA_DIR, &CLI_CONFIG_DIR, data_dir, config_dir);
}

/// Fills each empty cell; both are attempted even if one is already set.
///
/// Returns false if either cell was already initialized.
fn set_overrides(
    data_cell: &OnceLock<Option<PathBuf>>,
    config_cell: &OnceLock<Option<PathBuf>>,
    data_dir: Option<PathBuf>,
    config_dir: Option<PathBuf>,
) -> bool {
    let data_set = data_cell.set(data_dir).is_ok();
    let config_set = config_cell.set(config_dir).is_ok();
    if !data_set || !config_set {
        tracing::warn!(data_set, config_set, "CLI path overrides already initialized");
    }
    data_set && config_set
}

fn resolve(
    override_path: Option<PathBuf>,
    cli: &OnceLock<Option<PathBuf>>,
    env_var: &str,
    platform: fn() -> Option<PathBuf>,
) -> Option<PathBuf> {
    if let Some(path) = override_path {
        return Some(path);
    }

    if let Some(path) = cli.get().and_then(Clone::clone) {
        return Some(path);
    }

    if let Ok(env_path) = std::env::var(env_var) {
        if !env_path.is_empty() {
            return Some(PathBuf::from(env_path));
        }
    }

    platform().map(|mut path| {
        path.push(APP_NAME);
        path
    })
}

/// Returns the directory for application state (review history).
///
/// Returns `None` if the platform data directory cannot be determined.
pub fn get_app_data_dir() -> Option<PathBuf> {
    get_app_data_dir_with_override(None)
}

/// Returns the application data directory, preferring `override_path`.
pub fn get_app_data_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    resolve(override_path, &CLI_DATA_DIR, ENV_DATA_DIR, dirs::data_dir)
}

/// Returns the directory holding `settings.toml`.
pub fn get_app_config_dir() -> Option<PathBuf> {
    get_app_config_dir_with_override(None)
}

/// Returns the application config directory, preferring `override_path`.
pub fn get_app_config_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    resolve(override_path, &CLI_CONFIG_DIR, ENV_CONFIG_DIR, dirs::config_dir)
}
