// SPDX-License-Identifier: MPL-2.0
//! Video playback state machine states.

/// Represents the current playback state of the active video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackStatus {
    /// No video loaded.
    #[default]
    Idle,
    /// Video loaded, not advancing.
    Paused,
    /// Video is currently playing.
    Playing,
}

impl PlaybackStatus {
    /// Returns true if the video is currently playing.
    #[must_use]
    pub fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }

    /// Returns true if the video is paused.
    #[must_use]
    pub fn is_paused(self) -> bool {
        matches!(self, Self::Paused)
    }

    /// Returns true if no video is loaded.
    #[must_use]
    pub fn is_idle(self) -> bool {
        matches!(self, Self::Idle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_idle() {
        assert_eq!(PlaybackStatus::default(), PlaybackStatus::Idle);
    }

    #[test]
    fn test_state_checks() {
        assert!(PlaybackStatus::Playing.is_playing());
        assert!(!PlaybackStatus::Paused.is_playing());

        assert!(PlaybackStatus::Paused.is_paused());
        assert!(!PlaybackStatus::Playing.is_paused());

        assert!(PlaybackStatus::Idle.is_idle());
        assert!(!PlaybackStatus::Paused.is_idle());
    }
}
