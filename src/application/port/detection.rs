// SPDX-License-Identifier: MPL-2.0
//! Detection provider port definition.

use crate::domain::detection::Detection;
use crate::domain::error::ProviderError;
use crate::domain::video::Video;
use async_trait::async_trait;

/// Analyzes a video and reports what it found.
///
/// Implementations must only produce detections whose timestamps lie within
/// `[0, video.duration]`; the session does not clamp them. A call is a single
/// attempt, retries are the caller's decision.
#[async_trait]
pub trait DetectionProvider: Send + Sync {
    /// Runs analysis on `video`.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] if the analysis service fails or answers
    /// with unusable data.
    async fn analyze(&self, video: &Video) -> Result<Vec<Detection>, ProviderError>;
}
