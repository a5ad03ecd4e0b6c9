// SPDX-License-Identifier: MPL-2.0
//! Review session: the current video and everything tied to it.
//!
//! A [`Session`] is owned by one caller and passed by reference to whatever
//! needs it; there is no global state. It upholds the session invariants:
//!
//! - at most one video is current
//! - the detection store always holds the current video's detections
//! - removing the current video from history clears both

use crate::detection_store::DetectionStore;
use crate::domain::detection::Detection;
use crate::domain::video::Video;
use crate::history::HistoryManager;
use crate::overlay::{OverlayBox, OverlaySynchronizer, SurfaceSize};
use crate::playback::PlaybackController;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct Session {
    current: Option<Video>,
    detections: DetectionStore,
    playback: PlaybackController,
    history: HistoryManager,
    overlay: OverlaySynchronizer,
    /// Detection sets of videos analyzed in this session, by video id.
    archive: HashMap<String, Vec<Detection>>,
}

impl Session {
    #[must_use]
    pub fn new(
        playback: PlaybackController,
        history: HistoryManager,
        overlay: OverlaySynchronizer,
    ) -> Self {
        Self {
            current: None,
            detections: DetectionStore::new(),
            playback,
            history,
            overlay,
            archive: HashMap::new(),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[must_use]
    pub fn current_video(&self) -> Option<&Video> {
        self.current.as_ref()
    }

    #[must_use]
    pub fn detections(&self) -> &DetectionStore {
        &self.detections
    }

    #[must_use]
    pub fn playback(&self) -> &PlaybackController {
        &self.playback
    }

    pub fn playback_mut(&mut self) -> &mut PlaybackController {
        &mut self.playback
    }

    #[must_use]
    pub fn history(&self) -> &HistoryManager {
        &self.history
    }

    #[must_use]
    pub fn overlay(&self) -> OverlaySynchronizer {
        self.overlay
    }

    // =========================================================================
    // Video switching
    // =========================================================================

    /// Installs a freshly analyzed video.
    ///
    /// The video is added to history, becomes current, its detections
    /// replace the store and playback is loaded from the start.
    pub fn install_analyzed(&mut self, video: Video, detections: Vec<Detection>) {
        self.history.add(video.clone());
        self.archive.insert(video.id.clone(), detections.clone());
        self.make_current(video, detections);
    }

    /// Makes a history entry current again.
    ///
    /// Returns `false` if `id` is not in history. Detections are only
    /// available for videos analyzed during this session.
    pub fn select(&mut self, id: &str) -> bool {
        let Some(video) = self.history.get(id).cloned() else {
            return false;
        };
        let detections = self.archive.get(id).cloned().unwrap_or_default();
        self.make_current(video, detections);
        true
    }

    fn make_current(&mut self, video: Video, detections: Vec<Detection>) {
        tracing::info!(
            video_id = %video.id,
            detections = detections.len(),
            "current video changed"
        );
        self.playback.load(&video);
        self.detections.replace_all(detections);
        self.current = Some(video);
    }

    /// Clears the current video, its detections and playback.
    pub fn close(&mut self) {
        if let Some(video) = self.current.take() {
            tracing::info!(video_id = %video.id, "current video closed");
        }
        self.detections.clear();
        self.playback.unload();
    }

    /// Removes a video from history, closing it first if it is current.
    pub fn remove_video(&mut self, id: &str) -> Option<Video> {
        let removed = self.history.remove(id)?;
        self.archive.remove(id);
        if self.current.as_ref().is_some_and(|v| v.id == id) {
            self.close();
        }
        Some(removed)
    }

    // =========================================================================
    // Playback helpers
    // =========================================================================

    /// Jumps playback to a detection of the current video.
    pub fn seek_to_detection(&mut self, id: &str) -> bool {
        self.playback.seek_to_detection(id, &self.detections)
    }

    /// Detections on screen at the current playback position.
    #[must_use]
    pub fn visible_detections(&self) -> Vec<&Detection> {
        self.overlay
            .visible(&self.detections, self.playback.current_time())
    }

    /// Overlay boxes at the current playback position.
    #[must_use]
    pub fn overlay_boxes(&self, size: SurfaceSize) -> Vec<OverlayBox> {
        self.overlay
            .boxes(&self.detections, self.playback.current_time(), size)
    }

    /// Saves history, returning a warning key on failure.
    pub fn save_history(&self, base_dir: Option<std::path::PathBuf>) -> Option<String> {
        self.history.save_to(base_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::detection::{BoundingBox, ObjectType};
    use crate::domain::video::sample_video;

    fn detection(id: &str, timestamp: f64) -> Detection {
        Detection::new(
            id,
            ObjectType::Person,
            timestamp,
            BoundingBox::new(0.1, 0.1, 0.2, 0.2),
            0.8,
            "Person detected in frame",
        )
    }

    fn session_with_two_videos() -> Session {
        let mut session = Session::default();
        session.install_analyzed(
            sample_video("a", "Lobby", &["person"]),
            vec![detection("person-1", 3.0)],
        );
        session.install_analyzed(
            sample_video("b", "Dock", &["person"]),
            vec![detection("person-1", 8.0), detection("person-2", 9.0)],
        );
        session
    }

    #[test]
    fn install_sets_current_history_and_store() {
        let session = session_with_two_videos();
        assert_eq!(session.current_video().map(|v| v.id.as_str()), Some("b"));
        assert_eq!(session.history().len(), 2);
        assert_eq!(session.detections().len(), 2);
        assert!(session.playback().status().is_paused());
    }

    #[test]
    fn select_restores_that_videos_detections() {
        let mut session = session_with_two_videos();
        assert!(session.select("a"));
        assert_eq!(session.detections().len(), 1);
        assert!((session.detections().as_slice()[0].timestamp - 3.0).abs() < f64::EPSILON);
        assert!(!session.select("missing"));
        assert_eq!(session.current_video().map(|v| v.id.as_str()), Some("a"));
    }

    #[test]
    fn removing_current_video_clears_session() {
        let mut session = session_with_two_videos();
        assert!(session.remove_video("b").is_some());
        assert!(session.current_video().is_none());
        assert!(session.detections().is_empty());
        assert!(session.playback().status().is_idle());
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn removing_other_video_keeps_current() {
        let mut session = session_with_two_videos();
        session.remove_video("a");
        assert_eq!(session.current_video().map(|v| v.id.as_str()), Some("b"));
        assert_eq!(session.detections().len(), 2);
        assert!(!session.select("a"));
    }

    #[test]
    fn close_keeps_history() {
        let mut session = session_with_two_videos();
        session.close();
        assert!(session.current_video().is_none());
        assert!(session.detections().is_empty());
        assert_eq!(session.history().len(), 2);
    }

    #[test]
    fn overlay_follows_playback_clock() {
        let mut session = session_with_two_videos();
        assert!(session.visible_detections().is_empty());
        session.playback_mut().on_time_update(8.5);
        assert_eq!(session.visible_detections().len(), 1);
        assert!(session.seek_to_detection("person-2"));
        assert_eq!(session.visible_detections().len(), 2);
        assert_eq!(session.overlay_boxes(SurfaceSize::new(640.0, 360.0)).len(), 2);
    }
}
