// SPDX-License-Identifier: MPL-2.0
//! Playback state machine for the current video.
//!
//! Manages the lifecycle of playback with three states:
//! - Idle: no video loaded, every command is ignored
//! - Paused: video loaded at a position
//! - Playing: the media clock is advancing
//!
//! The controller mirrors every command onto a [`MediaSurface`]. Surface
//! failures never reach callers; a rejected `play` leaves the controller
//! `Paused` and is logged.

mod surface;

pub use surface::{MediaSurface, NullSurface};

use crate::detection_store::DetectionStore;
use crate::domain::video::{KeyboardSeekStep, PlaybackStatus, Video, Volume};

/// Drives the media surface and tracks playback position.
pub struct PlaybackController {
    surface: Box<dyn MediaSurface>,
    status: PlaybackStatus,
    current_time: f64,
    duration: f64,
    volume: Volume,
    muted: bool,
    /// Audio settings restored whenever a new video is loaded.
    initial_volume: Volume,
    initial_muted: bool,
    seek_step: KeyboardSeekStep,
}

impl std::fmt::Debug for PlaybackController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackController")
            .field("status", &self.status)
            .field("current_time", &self.current_time)
            .field("duration", &self.duration)
            .field("volume", &self.volume)
            .field("muted", &self.muted)
            .finish_non_exhaustive()
    }
}

impl Default for PlaybackController {
    fn default() -> Self {
        Self::new(Box::new(NullSurface))
    }
}

impl PlaybackController {
    /// Creates an idle controller with full volume.
    #[must_use]
    pub fn new(surface: Box<dyn MediaSurface>) -> Self {
        Self {
            surface,
            status: PlaybackStatus::Idle,
            current_time: 0.0,
            duration: 0.0,
            volume: Volume::default(),
            muted: false,
            initial_volume: Volume::default(),
            initial_muted: false,
            seek_step: KeyboardSeekStep::default(),
        }
    }

    /// Sets the audio settings applied on every load.
    #[must_use]
    pub fn with_audio(mut self, volume: Volume, muted: bool) -> Self {
        self.initial_volume = volume;
        self.initial_muted = muted;
        self.volume = volume;
        self.muted = muted;
        self
    }

    #[must_use]
    pub fn with_seek_step(mut self, step: KeyboardSeekStep) -> Self {
        self.seek_step = step;
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[must_use]
    pub fn status(&self) -> PlaybackStatus {
        self.status
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.status.is_playing()
    }

    /// Position in seconds.
    #[must_use]
    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    #[must_use]
    pub fn duration(&self) -> f64 {
        self.duration
    }

    #[must_use]
    pub fn volume(&self) -> Volume {
        self.volume
    }

    #[must_use]
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Volume actually applied to the surface (zero while muted).
    #[must_use]
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.volume.value()
        }
    }

    /// Position as a percentage of the duration, for the progress bar.
    #[must_use]
    pub fn progress_percent(&self) -> f64 {
        if self.duration > 0.0 {
            (self.current_time / self.duration * 100.0).clamp(0.0, 100.0)
        } else {
            0.0
        }
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Loads a video: `Idle | Paused | Playing -> Paused` at position 0.
    ///
    /// Audio settings return to their initial values.
    pub fn load(&mut self, video: &Video) {
        self.surface.load(&video.url);
        self.duration = video.duration.max(0.0);
        self.current_time = 0.0;
        self.volume = self.initial_volume;
        self.muted = self.initial_muted;
        self.status = PlaybackStatus::Paused;

        self.surface.set_current_time(0.0);
        self.surface.set_volume(self.effective_volume());
        self.surface.set_muted(self.muted);
        tracing::debug!(video_id = %video.id, duration = self.duration, "playback loaded");
    }

    /// Detaches the video and returns to `Idle`.
    pub fn unload(&mut self) {
        if self.status.is_playing() {
            self.surface.pause();
        }
        self.status = PlaybackStatus::Idle;
        self.current_time = 0.0;
        self.duration = 0.0;
        tracing::debug!("playback unloaded");
    }

    // =========================================================================
    // Transport
    // =========================================================================

    /// Starts playback.
    ///
    /// - Idle: no-op
    /// - Paused -> Playing, unless the surface rejects it
    /// - Playing: no-op
    pub fn play(&mut self) {
        if !self.status.is_paused() {
            return;
        }
        match self.surface.play() {
            Ok(()) => {
                self.status = PlaybackStatus::Playing;
                tracing::debug!(position = self.current_time, "playback started");
            }
            Err(err) => {
                tracing::warn!(error = %err, "media surface rejected play");
                self.status = PlaybackStatus::Paused;
            }
        }
    }

    /// `Playing -> Paused`; no-op otherwise.
    pub fn pause(&mut self) {
        if self.status.is_playing() {
            self.surface.pause();
            self.status = PlaybackStatus::Paused;
            tracing::debug!(position = self.current_time, "playback paused");
        }
    }

    /// Play/pause button.
    pub fn toggle(&mut self) {
        if self.status.is_playing() {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Moves to `secs`, clamped to `[0, duration]`.
    ///
    /// Ignored while idle or for non-finite input. Does not change
    /// Playing/Paused.
    pub fn seek(&mut self, secs: f64) {
        if self.status.is_idle() || !secs.is_finite() {
            return;
        }
        self.current_time = secs.clamp(0.0, self.duration);
        self.surface.set_current_time(self.current_time);
    }

    /// Relative seek, clamped like [`seek`](Self::seek).
    pub fn seek_by(&mut self, delta_secs: f64) {
        self.seek(self.current_time + delta_secs);
    }

    /// Seeks forward by the keyboard step.
    pub fn step_forward(&mut self) {
        self.seek_by(self.seek_step.secs());
    }

    /// Seeks backward by the keyboard step.
    pub fn step_backward(&mut self) {
        self.seek_by(-self.seek_step.secs());
    }

    /// Seeks to a fraction of the duration (progress bar click).
    pub fn seek_to_fraction(&mut self, fraction: f64) {
        if !fraction.is_finite() {
            return;
        }
        self.seek(fraction.clamp(0.0, 1.0) * self.duration);
    }

    /// Jumps to a detection and starts playing.
    ///
    /// Returns `false` (and does nothing) if `id` is not in `store`.
    pub fn seek_to_detection(&mut self, id: &str, store: &DetectionStore) -> bool {
        let Some(detection) = store.get(id) else {
            return false;
        };
        if self.status.is_idle() {
            return false;
        }
        self.seek(detection.timestamp);
        if !self.status.is_playing() {
            self.play();
        }
        true
    }

    // =========================================================================
    // Surface events
    // =========================================================================

    /// Media clock tick reported by the surface.
    pub fn on_time_update(&mut self, secs: f64) {
        if self.status.is_idle() || !secs.is_finite() {
            return;
        }
        self.current_time = secs.clamp(0.0, self.duration);
    }

    /// End-of-media signal: `Playing -> Paused` at the end.
    pub fn on_ended(&mut self) {
        if self.status.is_playing() {
            self.status = PlaybackStatus::Paused;
            self.current_time = self.duration;
            tracing::debug!("playback reached end of media");
        }
    }

    // =========================================================================
    // Audio
    // =========================================================================

    /// Sets the volume; zero mutes, anything else unmutes.
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = Volume::new(volume);
        self.muted = self.volume.is_zero();
        self.surface.set_volume(self.effective_volume());
        self.surface.set_muted(self.muted);
    }

    /// Mutes, or unmutes restoring the stored volume (full volume if it was zero).
    pub fn toggle_mute(&mut self) {
        if self.muted {
            if self.volume.is_zero() {
                self.volume = Volume::new(1.0);
            }
            self.muted = false;
        } else {
            self.muted = true;
        }
        self.surface.set_volume(self.effective_volume());
        self.surface.set_muted(self.muted);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::detection::{BoundingBox, Detection, ObjectType};
    use crate::domain::error::SurfaceError;
    use crate::domain::video::sample_video;
    use crate::test_utils::assert_abs_diff_eq;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Load(String),
        Play,
        Pause,
        SetTime(f64),
        SetVolume(f32),
        SetMuted(bool),
    }

    /// Surface that records commands and can reject `play`.
    #[derive(Clone, Default)]
    struct RecordingSurface {
        calls: Arc<Mutex<Vec<Call>>>,
        reject_play: bool,
    }

    impl RecordingSurface {
        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: Call) {
            self.calls.lock().unwrap().push(call);
        }
    }

    impl MediaSurface for RecordingSurface {
        fn load(&mut self, url: &str) {
            self.record(Call::Load(url.to_string()));
        }

        fn play(&mut self) -> Result<(), SurfaceError> {
            self.record(Call::Play);
            if self.reject_play {
                Err(SurfaceError::PlaybackRejected("NotAllowedError".into()))
            } else {
                Ok(())
            }
        }

        fn pause(&mut self) {
            self.record(Call::Pause);
        }

        fn set_current_time(&mut self, secs: f64) {
            self.record(Call::SetTime(secs));
        }

        fn set_volume(&mut self, volume: f32) {
            self.record(Call::SetVolume(volume));
        }

        fn set_muted(&mut self, muted: bool) {
            self.record(Call::SetMuted(muted));
        }
    }

    fn loaded() -> (PlaybackController, RecordingSurface) {
        let surface = RecordingSurface::default();
        let mut controller = PlaybackController::new(Box::new(surface.clone()));
        controller.load(&sample_video("v1", "Lobby", &["person"]));
        (controller, surface)
    }

    fn store() -> DetectionStore {
        let mut store = DetectionStore::new();
        store.replace_all(vec![Detection::new(
            "gun-1",
            ObjectType::Gun,
            42.0,
            BoundingBox::new(0.1, 0.1, 0.2, 0.2),
            0.9,
            "Black pistol held in right hand",
        )]);
        store
    }

    #[test]
    fn play_is_noop_when_idle() {
        let surface = RecordingSurface::default();
        let mut controller = PlaybackController::new(Box::new(surface.clone()));
        controller.play();
        controller.seek(10.0);
        assert_eq!(controller.status(), PlaybackStatus::Idle);
        assert!(surface.calls().is_empty());
    }

    #[test]
    fn load_moves_to_paused_at_zero() {
        let (controller, surface) = loaded();
        assert_eq!(controller.status(), PlaybackStatus::Paused);
        assert_abs_diff_eq!(controller.current_time(), 0.0);
        assert_eq!(
            surface.calls().first(),
            Some(&Call::Load("file:///videos/v1.mp4".into()))
        );
    }

    #[test]
    fn play_pause_transitions() {
        let (mut controller, _) = loaded();
        controller.play();
        assert!(controller.is_playing());
        controller.pause();
        assert_eq!(controller.status(), PlaybackStatus::Paused);
        controller.toggle();
        assert!(controller.is_playing());
    }

    #[test]
    fn seek_clamps_and_keeps_status() {
        let (mut controller, surface) = loaded();
        controller.seek(500.0);
        assert_abs_diff_eq!(controller.current_time(), 120.0);
        controller.seek(-3.0);
        assert_abs_diff_eq!(controller.current_time(), 0.0);
        assert_eq!(controller.status(), PlaybackStatus::Paused);
        assert_eq!(surface.calls().last(), Some(&Call::SetTime(0.0)));

        controller.play();
        controller.seek(30.0);
        assert!(controller.is_playing());
    }

    #[test]
    fn relative_and_fractional_seeks() {
        let (mut controller, _) = loaded();
        controller.seek(10.0);
        controller.step_forward();
        assert_abs_diff_eq!(controller.current_time(), 15.0);
        controller.seek_by(-100.0);
        assert_abs_diff_eq!(controller.current_time(), 0.0);
        controller.seek_to_fraction(0.25);
        assert_abs_diff_eq!(controller.current_time(), 30.0);
        assert_abs_diff_eq!(controller.progress_percent(), 25.0);
    }

    #[test]
    fn seek_to_missing_detection_is_noop() {
        let (mut controller, surface) = loaded();
        controller.seek(7.0);
        let before = surface.calls().len();

        assert!(!controller.seek_to_detection("nope", &store()));
        assert_abs_diff_eq!(controller.current_time(), 7.0);
        assert_eq!(controller.status(), PlaybackStatus::Paused);
        assert_eq!(surface.calls().len(), before);
    }

    #[test]
    fn seek_to_detection_seeks_and_plays() {
        let (mut controller, _) = loaded();
        assert!(controller.seek_to_detection("gun-1", &store()));
        assert_abs_diff_eq!(controller.current_time(), 42.0);
        assert!(controller.is_playing());
    }

    #[test]
    fn rejected_play_stays_paused() {
        let surface = RecordingSurface {
            reject_play: true,
            ..RecordingSurface::default()
        };
        let mut controller = PlaybackController::new(Box::new(surface.clone()));
        controller.load(&sample_video("v1", "Lobby", &[]));

        controller.play();
        assert_eq!(controller.status(), PlaybackStatus::Paused);

        assert!(controller.seek_to_detection("gun-1", &store()));
        assert_eq!(controller.status(), PlaybackStatus::Paused);
        assert_abs_diff_eq!(controller.current_time(), 42.0);
    }

    #[test]
    fn end_of_media_pauses_at_end() {
        let (mut controller, _) = loaded();
        controller.play();
        controller.on_time_update(119.5);
        controller.on_ended();
        assert_eq!(controller.status(), PlaybackStatus::Paused);
        assert_abs_diff_eq!(controller.current_time(), 120.0);
    }

    #[test]
    fn time_updates_may_go_backward() {
        let (mut controller, _) = loaded();
        controller.on_time_update(50.0);
        controller.on_time_update(12.0);
        assert_abs_diff_eq!(controller.current_time(), 12.0);
    }

    #[test]
    fn zero_volume_mutes_and_unmute_restores_full() {
        let (mut controller, surface) = loaded();
        controller.set_volume(0.0);
        assert!(controller.is_muted());

        controller.toggle_mute();
        assert!(!controller.is_muted());
        assert_abs_diff_eq!(controller.volume().value(), 1.0);
        assert_eq!(surface.calls().last(), Some(&Call::SetMuted(false)));
    }

    #[test]
    fn mute_keeps_stored_volume() {
        let (mut controller, surface) = loaded();
        controller.set_volume(0.4);
        controller.toggle_mute();
        assert!(controller.is_muted());
        assert_abs_diff_eq!(controller.effective_volume(), 0.0);
        assert!(surface.calls().contains(&Call::SetVolume(0.0)));

        controller.toggle_mute();
        assert_abs_diff_eq!(controller.effective_volume(), 0.4);
    }

    #[test]
    fn load_resets_audio_and_position() {
        let (mut controller, _) = loaded();
        controller.set_volume(0.3);
        controller.seek(60.0);
        controller.load(&sample_video("v2", "Dock", &[]));
        assert_abs_diff_eq!(controller.volume().value(), 1.0);
        assert_abs_diff_eq!(controller.current_time(), 0.0);
    }

    #[test]
    fn unload_returns_to_idle() {
        let (mut controller, _) = loaded();
        controller.play();
        controller.unload();
        assert!(controller.status().is_idle());
        assert_abs_diff_eq!(controller.progress_percent(), 0.0);
    }
}
