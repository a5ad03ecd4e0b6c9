// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! # Categories
//!
//! - **Upload**: Accepted video limits and collaborator timeouts
//! - **Overlay**: Detection visibility window
//! - **Playback**: Initial audio settings
//! - **API**: Audit log endpoint

use crate::domain::video::newtypes::{volume_bounds, window_bounds};

// ==========================================================================
// Upload Defaults
// ==========================================================================

/// Longest accepted video (5 minutes).
pub const DEFAULT_MAX_DURATION_SECS: f64 = 300.0;

/// Highest accepted frame rate.
pub const DEFAULT_MAX_FPS: f64 = 30.0;

/// Bound on reading metadata from an uploaded file.
pub const DEFAULT_METADATA_TIMEOUT_MS: u64 = 5_000;

/// Bound on one detection provider call.
pub const DEFAULT_ANALYSIS_TIMEOUT_MS: u64 = 60_000;

/// Minimum timeout accepted from the settings file.
pub const MIN_TIMEOUT_MS: u64 = 100;

/// Thumbnail given to freshly uploaded videos.
pub const DEFAULT_THUMBNAIL_PLACEHOLDER: &str = "/placeholder.svg?height=180&width=320";

// ==========================================================================
// Overlay Defaults
// ==========================================================================

/// Seconds a detection stays on screen after its timestamp.
pub const DEFAULT_VISIBILITY_WINDOW_SECS: f64 = window_bounds::DEFAULT;

// ==========================================================================
// Playback Defaults
// ==========================================================================

/// Initial volume of a loaded video.
pub const DEFAULT_VOLUME: f32 = volume_bounds::DEFAULT;

// ==========================================================================
// API Defaults
// ==========================================================================

/// Base URL of the audit log API.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(DEFAULT_MAX_DURATION_SECS > 0.0);
    assert!(DEFAULT_MAX_FPS > 0.0);

    assert!(DEFAULT_METADATA_TIMEOUT_MS >= MIN_TIMEOUT_MS);
    assert!(DEFAULT_ANALYSIS_TIMEOUT_MS >= MIN_TIMEOUT_MS);
    assert!(DEFAULT_ANALYSIS_TIMEOUT_MS > DEFAULT_METADATA_TIMEOUT_MS);

    assert!(DEFAULT_VISIBILITY_WINDOW_SECS >= window_bounds::MIN);
    assert!(DEFAULT_VISIBILITY_WINDOW_SECS <= window_bounds::MAX);

    assert!(DEFAULT_VOLUME >= volume_bounds::MIN);
    assert!(DEFAULT_VOLUME <= volume_bounds::MAX);
};
