// SPDX-License-Identifier: MPL-2.0
//! Files handed to the upload pipeline.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// MIME type accepted by the upload zone.
pub const MP4_MIME: &str = "video/mp4";

/// A file dropped on or picked in the upload zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadFile {
    /// File name including extension.
    pub name: String,
    /// Declared MIME type, may be empty.
    pub mime_type: String,
    pub size_bytes: u64,
    /// Locator the media surface and providers read from.
    pub url: String,
}

impl UploadFile {
    pub fn new(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        size_bytes: u64,
        url: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            size_bytes,
            url: url.into(),
        }
    }

    /// Returns true for `video/mp4` or, without a declared type, a `.mp4` name.
    #[must_use]
    pub fn is_mp4(&self) -> bool {
        if self.mime_type.is_empty() {
            has_mp4_extension(&self.name)
        } else {
            self.mime_type.eq_ignore_ascii_case(MP4_MIME)
        }
    }

    /// File name without its last extension, used as the video title.
    #[must_use]
    pub fn stem(&self) -> &str {
        match self.name.rfind('.') {
            Some(0) | None => &self.name,
            Some(index) => &self.name[..index],
        }
    }
}

fn has_mp4_extension(name: &str) -> bool {
    Path::new(name)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("mp4"))
}
