// SPDX-License-Identifier: MPL-2.0
//! Analyzed video records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Tag given to a video until analysis reports what it contains.
pub const UNCLASSIFIED_TAG: &str = "unclassified";

/// Metadata read from an uploaded file before analysis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VideoMetadata {
    /// Duration in seconds.
    pub duration_secs: f64,
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
}

impl VideoMetadata {
    #[must_use]
    pub fn new(duration_secs: f64, width: u32, height: u32) -> Self {
        Self {
            duration_secs,
            width,
            height,
        }
    }

    /// Resolution formatted as `WxH`.
    #[must_use]
    pub fn resolution(&self) -> String {
        format!("{}x{}", self.width, self.height)
    }
}

/// A video that went through upload and analysis.
///
/// Everything except `tags` is fixed at creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub id: String,
    pub title: String,
    /// Source locator handed to the media surface.
    pub url: String,
    /// Thumbnail locator.
    pub thumbnail: String,
    pub upload_date: DateTime<Utc>,
    /// Duration in seconds.
    pub duration: f64,
    /// `WxH`.
    pub resolution: String,
    pub fps: f64,
    /// Size in bytes.
    pub file_size: u64,
    pub tags: Vec<String>,
}

impl Video {
    /// Tags with duplicates collapsed, first occurrence kept.
    #[must_use]
    pub fn display_tags(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::with_capacity(self.tags.len());
        for tag in &self.tags {
            if !seen.contains(&tag.as_str()) {
                seen.push(tag);
            }
        }
        seen
    }

    /// Returns true if every requested tag is present.
    #[must_use]
    pub fn has_all_tags<S: AsRef<str>>(&self, tags: &[S]) -> bool {
        tags.iter()
            .all(|wanted| self.tags.iter().any(|t| t == wanted.as_ref()))
    }

    /// Case-insensitive substring match on the title. Empty terms match.
    #[must_use]
    pub fn title_contains(&self, term: &str) -> bool {
        term.is_empty() || self.title.to_lowercase().contains(&term.to_lowercase())
    }
}

#[cfg(test)]
pub(crate) fn sample_video(id: &str, title: &str, tags: &[&str]) -> Video {
    Video {
        id: id.to_string(),
        title: title.to_string(),
        url: format!("file:///videos/{id}.mp4"),
        thumbnail: String::new(),
        upload_date: DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap_or_default(),
        duration: 120.0,
        resolution: "1920x1080".to_string(),
        fps: 30.0,
        file_size: 10 * 1024 * 1024,
        tags: tags.iter().map(|t| t.to_string()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_resolution_format() {
        assert_eq!(VideoMetadata::new(10.0, 1280, 720).resolution(), "1280x720");
    }

    #[test]
    fn display_tags_collapses_duplicates() {
        let video = sample_video("a", "Lobby", &["gun", "person", "gun"]);
        assert_eq!(video.display_tags(), vec!["gun", "person"]);
        assert_eq!(video.tags.len(), 3);
    }

    #[test]
    fn has_all_tags_requires_superset() {
        let video = sample_video("a", "Lobby", &["gun", "person"]);
        assert!(video.has_all_tags(&["gun"]));
        assert!(video.has_all_tags(&["person", "gun"]));
        assert!(!video.has_all_tags(&["gun", "knife"]));
        assert!(video.has_all_tags::<&str>(&[]));
    }

    #[test]
    fn title_search_ignores_case() {
        let video = sample_video("a", "Parking Garage North", &[]);
        assert!(video.title_contains("garage"));
        assert!(video.title_contains(""));
        assert!(!video.title_contains("lobby"));
    }

    #[test]
    fn serializes_upload_date_as_rfc3339() {
        let video = sample_video("a", "Lobby", &[]);
        let json = serde_json::to_value(&video).unwrap();
        assert_eq!(json["uploadDate"], "2023-11-14T22:13:20Z");
        assert_eq!(json["fileSize"], 10 * 1024 * 1024);
    }
}
