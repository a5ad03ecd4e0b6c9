// SPDX-License-Identifier: MPL-2.0
//! Metadata probe port definition.

use crate::domain::error::ProviderError;
use crate::domain::video::{UploadFile, VideoMetadata};
use async_trait::async_trait;

/// Reads duration and frame size from an uploaded file.
///
/// Frame rate is not part of the contract: it cannot be read reliably from
/// every source, so validation uses a fixed estimate.
#[async_trait]
pub trait MetadataProbe: Send + Sync {
    /// Probes `file`.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] if the file cannot be read or is not a video.
    async fn probe(&self, file: &UploadFile) -> Result<VideoMetadata, ProviderError>;
}
