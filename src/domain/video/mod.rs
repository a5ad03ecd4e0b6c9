// SPDX-License-Identifier: MPL-2.0
//! Video domain types.
//!
//! This module contains video records and playback value objects that are
//! independent of any presentation or infrastructure concerns.

pub mod newtypes;
pub mod playback;
mod record;
mod source;

// Re-export commonly used types
pub use newtypes::{KeyboardSeekStep, VisibilityWindow, Volume};
pub use playback::PlaybackStatus;
pub use record::{Video, VideoMetadata, UNCLASSIFIED_TAG};
pub use source::{UploadFile, MP4_MIME};

#[cfg(test)]
pub(crate) use record::sample_video;
