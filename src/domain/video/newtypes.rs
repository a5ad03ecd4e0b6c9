// SPDX-License-Identifier: MPL-2.0
//! Clamped playback values.
//!
//! Each wrapper clamps on construction, so the controller and overlay never
//! see a volume outside the media element's range or a window that would
//! hide every detection.

// =============================================================================
// Volume
// =============================================================================

/// Media element volume range.
pub mod volume_bounds {
    pub const MIN: f32 = 0.0;
    pub const MAX: f32 = 1.0;
    /// Volume of a freshly loaded video.
    pub const DEFAULT: f32 = 1.0;
}

/// Playback volume in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Volume(f32);

impl Volume {
    /// Clamps `volume` into range. NaN maps to silence.
    #[must_use]
    pub fn new(volume: f32) -> Self {
        if volume.is_nan() {
            return Self(volume_bounds::MIN);
        }
        Self(volume.clamp(volume_bounds::MIN, volume_bounds::MAX))
    }

    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Returns true at exactly zero, which is what mutes the player.
    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0 <= volume_bounds::MIN
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self(volume_bounds::DEFAULT)
    }
}

// =============================================================================
// VisibilityWindow
// =============================================================================

/// Visibility window bounds in seconds.
pub mod window_bounds {
    /// Smallest window; anything shorter would flicker.
    pub const MIN: f64 = 0.1;
    pub const MAX: f64 = 30.0;
    pub const DEFAULT: f64 = 2.0;
}

/// How long after its timestamp a detection stays on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityWindow(f64);

impl VisibilityWindow {
    /// Clamps `secs` into range. NaN falls back to the default.
    #[must_use]
    pub fn new(secs: f64) -> Self {
        if secs.is_nan() {
            return Self::default();
        }
        Self(secs.clamp(window_bounds::MIN, window_bounds::MAX))
    }

    #[must_use]
    pub fn secs(self) -> f64 {
        self.0
    }

    /// Returns true if `time` lies in `[start, start + window]`.
    #[must_use]
    pub fn contains(self, start: f64, time: f64) -> bool {
        time >= start && time <= start + self.0
    }
}

impl Default for VisibilityWindow {
    fn default() -> Self {
        Self(window_bounds::DEFAULT)
    }
}

// =============================================================================
// KeyboardSeekStep
// =============================================================================

/// Relative seek distance bounds in seconds.
pub mod seek_step_bounds {
    pub const MIN: f64 = 0.5;
    pub const MAX: f64 = 30.0;
    pub const DEFAULT: f64 = 5.0;
}

/// Distance of one step forward/backward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyboardSeekStep(f64);

impl KeyboardSeekStep {
    #[must_use]
    pub fn new(secs: f64) -> Self {
        if secs.is_nan() {
            return Self::default();
        }
        Self(secs.clamp(seek_step_bounds::MIN, seek_step_bounds::MAX))
    }

    #[must_use]
    pub fn secs(self) -> f64 {
        self.0
    }
}

impl Default for KeyboardSeekStep {
    fn default() -> Self {
        Self(seek_step_bounds::DEFAULT)
    }
}
