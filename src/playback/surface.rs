// SPDX-License-Identifier: MPL-2.0
//! Port to the element that actually renders the video.

use crate::domain::error::SurfaceError;

/// The media element driven by the playback controller.
///
/// Implementations forward commands to a real player. Only `play` can fail;
/// the remaining commands are fire-and-forget.
pub trait MediaSurface: Send {
    /// Attaches a new source.
    fn load(&mut self, url: &str);

    /// Starts playback.
    ///
    /// # Errors
    ///
    /// Returns an error when the surface refuses to start (autoplay policy,
    /// missing source).
    fn play(&mut self) -> Result<(), SurfaceError>;

    fn pause(&mut self);

    fn set_current_time(&mut self, secs: f64);

    fn set_volume(&mut self, volume: f32);

    fn set_muted(&mut self, muted: bool);
}

/// Surface that accepts every command and renders nothing.
///
/// Used headless (CLI, tests of components that only need the clock).
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSurface;

impl MediaSurface for NullSurface {
    fn load(&mut self, _url: &str) {}

    fn play(&mut self) -> Result<(), SurfaceError> {
        Ok(())
    }

    fn pause(&mut self) {}

    fn set_current_time(&mut self, _secs: f64) {}

    fn set_volume(&mut self, _volume: f32) {}

    fn set_muted(&mut self, _muted: bool) {}
}
