// SPDX-License-Identifier: MPL-2.0
//! Upload constraints and file checks.

use crate::config::{DEFAULT_MAX_DURATION_SECS, DEFAULT_MAX_FPS};
use crate::domain::error::{PipelineError, PipelineStage, ProviderError};
use crate::domain::video::{UploadFile, VideoMetadata};

/// Frame rate assumed for every upload.
///
/// Frame rate cannot be read reliably from every source, so validation
/// compares this estimate instead of a measured value.
pub const ESTIMATED_FPS: f64 = 30.0;

/// Limits an upload must satisfy before analysis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UploadConstraints {
    /// Longest accepted video, in seconds.
    pub max_duration_secs: f64,
    /// Highest accepted frame rate.
    pub max_fps: f64,
}

impl Default for UploadConstraints {
    fn default() -> Self {
        Self {
            max_duration_secs: DEFAULT_MAX_DURATION_SECS,
            max_fps: DEFAULT_MAX_FPS,
        }
    }
}

/// Checks what the upload zone received.
///
/// Returns `Ok(None)` for an empty drop, which is ignored.
///
/// # Errors
///
/// Rejects multi-file drops and anything that is not an MP4.
pub fn check_files(files: &[UploadFile]) -> Result<Option<&UploadFile>, PipelineError> {
    match files {
        [] => Ok(None),
        [file] if file.is_mp4() => Ok(Some(file)),
        [file] => Err(PipelineError::invalid(format!(
            "Unsupported file type for {}: only MP4 videos are accepted",
            file.name
        ))),
        _ => Err(PipelineError::invalid("Only one video can be uploaded at a time")),
    }
}

/// Validates probed metadata against `constraints`.
///
/// Every violated constraint contributes one reason.
///
/// # Errors
///
/// A duration that is negative or not finite (a media element reports NaN
/// before its metadata loads) is a metadata failure, not a constraint
/// violation. Otherwise returns [`PipelineError::Validation`] listing the
/// violations.
pub fn validate(
    metadata: &VideoMetadata,
    constraints: &UploadConstraints,
) -> Result<(), PipelineError> {
    if !metadata.duration_secs.is_finite() || metadata.duration_secs < 0.0 {
        return Err(PipelineError::Provider {
            stage: PipelineStage::Metadata,
            source: ProviderError::InvalidResponse(format!(
                "unusable duration {}",
                metadata.duration_secs
            )),
        });
    }

    let mut reasons = Vec::new();

    if metadata.duration_secs > constraints.max_duration_secs {
        reasons.push(format!(
            "Video duration exceeds maximum of {} minutes ({}s)",
            constraints.max_duration_secs / 60.0,
            constraints.max_duration_secs
        ));
    }

    if ESTIMATED_FPS > constraints.max_fps {
        reasons.push(format!(
            "Video FPS exceeds maximum of {}",
            constraints.max_fps
        ));
    }

    if reasons.is_empty() {
        Ok(())
    } else {
        Err(PipelineError::Validation { reasons })
    }
}
