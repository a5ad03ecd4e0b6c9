// SPDX-License-Identifier: MPL-2.0
//! Review history: every video analyzed so far, newest first.
//!
//! History is persisted between runs in CBOR format in the application data
//! directory. It is local state, not user-editable, so it stays out of
//! `settings.toml`.
//!
//! # Path Resolution
//!
//! 1. Use `load_from()`/`save_to()` with explicit directory override
//! 2. Set `VIDWATCH_DATA_DIR` environment variable
//! 3. Falls back to platform-specific data directory

use crate::domain::video::Video;
use crate::paths;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;

/// History file name within the app data directory.
const HISTORY_FILE: &str = "history.cbor";

/// Analyzed videos, unique by id, most recent first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryManager {
    #[serde(default)]
    videos: Vec<Video>,
}

impl HistoryManager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `video` at the front.
    ///
    /// If a video with the same id exists nothing changes: the entry is not
    /// moved or updated. Returns whether the video was inserted.
    pub fn add(&mut self, video: Video) -> bool {
        if self.contains(&video.id) {
            tracing::debug!(video_id = %video.id, "history already holds video");
            return false;
        }
        tracing::info!(video_id = %video.id, title = %video.title, "video added to history");
        self.videos.insert(0, video);
        true
    }

    /// Removes the entry with `id`, returning it.
    pub fn remove(&mut self, id: &str) -> Option<Video> {
        let index = self.videos.iter().position(|v| v.id == id)?;
        let removed = self.videos.remove(index);
        tracing::info!(video_id = %id, "video removed from history");
        Some(removed)
    }

    /// Entries whose title contains `term` (case-insensitive) and that carry
    /// every tag in `tags`. Empty term and empty tags match everything.
    #[must_use]
    pub fn search<S: AsRef<str>>(&self, term: &str, tags: &[S]) -> Vec<&Video> {
        self.videos
            .iter()
            .filter(|v| v.title_contains(term) && v.has_all_tags(tags))
            .collect()
    }

    /// Every tag in history, first-seen order.
    #[must_use]
    pub fn all_tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = Vec::new();
        for tag in self.videos.iter().flat_map(|v| v.tags.iter()) {
            if !tags.contains(&tag.as_str()) {
                tags.push(tag);
            }
        }
        tags
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Video> {
        self.videos.iter().find(|v| v.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.videos.iter().any(|v| v.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Video> {
        self.videos.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.videos.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.videos.is_empty()
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    /// Loads history from the default location.
    ///
    /// Returns a tuple of (history, optional_warning). Failures yield an
    /// empty history plus a warning key.
    pub fn load() -> (Self, Option<String>) {
        Self::load_from(None)
    }

    /// Loads history from `base_dir`, or the resolved data directory.
    pub fn load_from(base_dir: Option<PathBuf>) -> (Self, Option<String>) {
        let Some(path) = Self::history_file_path_with_override(base_dir) else {
            return (Self::default(), None);
        };

        if !path.exists() {
            return (Self::default(), None);
        }

        match fs::File::open(&path) {
            Ok(file) => match ciborium::from_reader(BufReader::new(file)) {
                Ok(history) => (history, None),
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "history file unreadable");
                    (
                        Self::default(),
                        Some("notification-history-parse-error".to_string()),
                    )
                }
            },
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "history file cannot be opened");
                (
                    Self::default(),
                    Some("notification-history-read-error".to_string()),
                )
            }
        }
    }

    /// Saves history to the default location.
    ///
    /// Returns an optional warning key if saving failed.
    pub fn save(&self) -> Option<String> {
        self.save_to(None)
    }

    /// Saves history to `base_dir`, or the resolved data directory.
    pub fn save_to(&self, base_dir: Option<PathBuf>) -> Option<String> {
        let Some(path) = Self::history_file_path_with_override(base_dir) else {
            return Some("notification-history-path-error".to_string());
        };

        if let Some(parent) = path.parent() {
            if fs::create_dir_all(parent).is_err() {
                return Some("notification-history-dir-error".to_string());
            }
        }

        match fs::File::create(&path) {
            Ok(file) => {
                if let Err(err) = ciborium::into_writer(self, BufWriter::new(file)) {
                    tracing::warn!(error = %err, "history write failed");
                    return Some("notification-history-write-error".to_string());
                }
                None
            }
            Err(_) => Some("notification-history-create-error".to_string()),
        }
    }

    fn history_file_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
        paths::get_app_data_dir_with_override(base_dir).map(|mut path| {
            path.push(HISTORY_FILE);
            path
        })
    }
}
