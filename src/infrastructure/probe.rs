// SPDX-License-Identifier: MPL-2.0
//! Metadata probe answering with declared values.
//!
//! Decoding containers is out of scope; callers that already know a file's
//! duration and frame size (the CLI flags, a browser's media element) hand
//! them in here.

use crate::application::port::MetadataProbe;
use crate::domain::error::ProviderError;
use crate::domain::video::{UploadFile, VideoMetadata};
use async_trait::async_trait;

#[derive(Debug, Clone, Copy)]
pub struct StaticProbe {
    metadata: VideoMetadata,
}

impl StaticProbe {
    #[must_use]
    pub fn new(metadata: VideoMetadata) -> Self {
        Self { metadata }
    }
}

#[async_trait]
impl MetadataProbe for StaticProbe {
    async fn probe(&self, file: &UploadFile) -> Result<VideoMetadata, ProviderError> {
        if !self.metadata.duration_secs.is_finite() || self.metadata.duration_secs < 0.0 {
            return Err(ProviderError::InvalidResponse(format!(
                "{} has no usable duration",
                file.name
            )));
        }
        Ok(self.metadata)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_declared_metadata() {
        let probe = StaticProbe::new(VideoMetadata::new(42.0, 1280, 720));
        let file = UploadFile::new("clip.mp4", "video/mp4", 10, "file:///clip.mp4");
        assert_eq!(probe.probe(&file).await.unwrap().resolution(), "1280x720");
    }

    #[tokio::test]
    async fn rejects_nan_duration() {
        let probe = StaticProbe::new(VideoMetadata::new(f64::NAN, 1280, 720));
        let file = UploadFile::new("clip.mp4", "video/mp4", 10, "file:///clip.mp4");
        assert!(matches!(
            probe.probe(&file).await,
            Err(ProviderError::InvalidResponse(_))
        ));
    }
}
