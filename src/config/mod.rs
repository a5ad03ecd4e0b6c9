// SPDX-License-Identifier: MPL-2.0
//! Application configuration stored in `settings.toml`.
//!
//! # Configuration Sections
//!
//! - `[upload]` - Accepted video limits, collaborator timeouts, thumbnail
//! - `[overlay]` - Detection visibility window
//! - `[playback]` - Initial volume and mute state
//! - `[api]` - Audit log API location
//! - `[export]` - Where detection exports are written
//!
//! Every field is optional; missing values fall back to [`defaults`].
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. `--config-dir` on the command line
//! 3. Set `VIDWATCH_CONFIG_DIR` environment variable
//! 4. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use vidwatch::config;
//!
//! let (mut config, _warning) = config::load();
//! config.upload.max_duration_secs = Some(600.0);
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::domain::video::{VisibilityWindow, Volume};
use crate::error::{Error, Result};
use crate::paths;
use crate::upload::{PipelineOptions, UploadConstraints};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";

// =============================================================================
// Section Structs
// =============================================================================

/// Upload validation and pipeline settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UploadConfig {
    /// Longest accepted video in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_duration_secs: Option<f64>,

    /// Highest accepted frame rate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_fps: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata_timeout_ms: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis_timeout_ms: Option<u64>,

    /// Thumbnail locator given to new videos.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_placeholder: Option<String>,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_duration_secs: Some(DEFAULT_MAX_DURATION_SECS),
            max_fps: Some(DEFAULT_MAX_FPS),
            metadata_timeout_ms: Some(DEFAULT_METADATA_TIMEOUT_MS),
            analysis_timeout_ms: Some(DEFAULT_ANALYSIS_TIMEOUT_MS),
            thumbnail_placeholder: Some(DEFAULT_THUMBNAIL_PLACEHOLDER.to_string()),
        }
    }
}

fn timeout_or(ms: Option<u64>, default: u64) -> Duration {
    Duration::from_millis(ms.unwrap_or(default).max(MIN_TIMEOUT_MS))
}

fn positive_or(value: Option<f64>, default: f64) -> f64 {
    match value {
        Some(v) if v.is_finite() && v > 0.0 => v,
        _ => default,
    }
}

impl UploadConfig {
    /// Pipeline options with out-of-range values replaced by defaults.
    #[must_use]
    pub fn pipeline_options(&self) -> PipelineOptions {
        PipelineOptions {
            constraints: UploadConstraints {
                max_duration_secs: positive_or(self.max_duration_secs, DEFAULT_MAX_DURATION_SECS),
                max_fps: positive_or(self.max_fps, DEFAULT_MAX_FPS),
            },
            metadata_timeout: timeout_or(self.metadata_timeout_ms, DEFAULT_METADATA_TIMEOUT_MS),
            analysis_timeout: timeout_or(self.analysis_timeout_ms, DEFAULT_ANALYSIS_TIMEOUT_MS),
            thumbnail: self
                .thumbnail_placeholder
                .clone()
                .unwrap_or_else(|| DEFAULT_THUMBNAIL_PLACEHOLDER.to_string()),
        }
    }
}

/// Overlay settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OverlayConfig {
    /// Seconds a detection stays visible after its timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility_window_secs: Option<f64>,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            visibility_window_secs: Some(DEFAULT_VISIBILITY_WINDOW_SECS),
        }
    }
}

impl OverlayConfig {
    #[must_use]
    pub fn window(&self) -> VisibilityWindow {
        VisibilityWindow::new(
            self.visibility_window_secs
                .unwrap_or(DEFAULT_VISIBILITY_WINDOW_SECS),
        )
    }
}

/// Playback settings applied when a video is loaded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlaybackConfig {
    /// Volume (0.0 to 1.0).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<f32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub muted: Option<bool>,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            volume: Some(DEFAULT_VOLUME),
            muted: Some(false),
        }
    }
}

impl PlaybackConfig {
    #[must_use]
    pub fn volume(&self) -> Volume {
        Volume::new(self.volume.unwrap_or(DEFAULT_VOLUME))
    }

    #[must_use]
    pub fn muted(&self) -> bool {
        self.muted.unwrap_or(false)
    }
}

/// Remote API settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: Some(DEFAULT_API_BASE_URL.to_string()),
        }
    }
}

impl ApiConfig {
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_API_BASE_URL)
    }
}

/// Export settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ExportConfig {
    /// Directory for detection exports. Current directory when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
}

impl ExportConfig {
    #[must_use]
    pub fn directory(&self) -> PathBuf {
        self.directory.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Application configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub upload: UploadConfig,

    #[serde(default)]
    pub overlay: OverlayConfig,

    #[serde(default)]
    pub playback: PlaybackConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub export: ExportConfig,
}

// =============================================================================
// Config Path Resolution
// =============================================================================

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with a warning message explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "config load failed");
                    return (
                        Config::default(),
                        Some("notification-config-load-error".to_string()),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_settings() {
        let config = Config {
            upload: UploadConfig {
                max_duration_secs: Some(600.0),
                max_fps: Some(60.0),
                ..UploadConfig::default()
            },
            overlay: OverlayConfig {
                visibility_window_secs: Some(3.5),
            },
            playback: PlaybackConfig {
                volume: Some(0.4),
                muted: Some(true),
            },
            api: ApiConfig {
                base_url: Some("https://review.example.com/api".to_string()),
            },
            export: ExportConfig {
                directory: Some(PathBuf::from("/tmp/exports")),
            },
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_path_invalid_toml_errors() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        match load_from_path(&config_path) {
            Err(Error::Config(_)) => {}
            other => panic!("expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn load_with_override_warns_and_falls_back() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        fs::write(temp_dir.path().join(CONFIG_FILE), "[upload\nbroken")
            .expect("failed to write invalid toml");

        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
        assert_eq!(warning.as_deref(), Some("notification-config-load-error"));
    }

    #[test]
    fn missing_file_gives_defaults_without_warning() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
        assert!(warning.is_none());
    }

    #[test]
    fn partial_sections_fill_in_missing_fields() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "[upload]\nmax_fps = 24.0\n").expect("write");

        let loaded = load_from_path(&config_path).expect("load");
        let options = loaded.upload.pipeline_options();
        assert_abs_diff_eq!(options.constraints.max_fps, 24.0);
        assert_abs_diff_eq!(options.constraints.max_duration_secs, DEFAULT_MAX_DURATION_SECS);
        assert_eq!(loaded.api.base_url(), DEFAULT_API_BASE_URL);
    }

    #[test]
    fn pipeline_options_reject_out_of_range_values() {
        let upload = UploadConfig {
            max_duration_secs: Some(-5.0),
            max_fps: Some(f64::NAN),
            metadata_timeout_ms: Some(0),
            analysis_timeout_ms: None,
            thumbnail_placeholder: None,
        };
        let options = upload.pipeline_options();
        assert_abs_diff_eq!(options.constraints.max_duration_secs, DEFAULT_MAX_DURATION_SECS);
        assert_abs_diff_eq!(options.constraints.max_fps, DEFAULT_MAX_FPS);
        assert_eq!(options.metadata_timeout, Duration::from_millis(MIN_TIMEOUT_MS));
        assert_eq!(
            options.analysis_timeout,
            Duration::from_millis(DEFAULT_ANALYSIS_TIMEOUT_MS)
        );
        assert_eq!(options.thumbnail, DEFAULT_THUMBNAIL_PLACEHOLDER);
    }

    #[test]
    fn default_sections_match_domain_defaults() {
        let config = Config::default();
        assert_abs_diff_eq!(config.overlay.window().secs(), 2.0);
        assert_abs_diff_eq!(config.playback.volume().value(), 1.0);
        assert!(!config.playback.muted());
        assert_eq!(config.export.directory(), PathBuf::from("."));
    }

    #[test]
    fn playback_volume_is_clamped() {
        let playback = PlaybackConfig {
            volume: Some(3.0),
            muted: None,
        };
        assert_abs_diff_eq!(playback.volume().value(), 1.0);
    }
}
