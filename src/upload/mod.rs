// SPDX-License-Identifier: MPL-2.0
//! Upload and analysis pipeline.
//!
//! State machine:
//! - Idle: waiting for a file
//! - Validating: reading metadata and checking constraints
//! - Processing: waiting for the detection provider
//! - Success: the analyzed video is current in the session
//! - Error: terminal until [`UploadPipeline::retry`] returns to Idle
//!
//! The two suspension points (metadata probe and analysis) are handed out
//! as jobs. A job carries the attempt number it was issued for and a
//! cancellation token; [`UploadPipeline::discard`] cancels the token and
//! bumps the attempt so results of the abandoned job are ignored. Callers
//! either run the jobs themselves (event loops) or use
//! [`UploadPipeline::process`].

mod validation;

pub use validation::{check_files, validate, UploadConstraints, ESTIMATED_FPS};

use crate::application::port::{DetectionProvider, MetadataProbe};
use crate::config;
use crate::domain::detection::Detection;
use crate::domain::error::{PipelineError, PipelineStage, ProviderError};
use crate::domain::video::{UploadFile, Video, VideoMetadata, UNCLASSIFIED_TAG};
use crate::session::Session;
use chrono::Utc;
use std::future::Future;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Progress shown while metadata is read.
pub const PROGRESS_VALIDATING: u8 = 10;
/// Progress once the file passed validation.
pub const PROGRESS_VALIDATED: u8 = 30;
/// Progress while the provider analyzes the video.
pub const PROGRESS_ANALYZING: u8 = 50;
/// Progress on success.
pub const PROGRESS_DONE: u8 = 100;

// =============================================================================
// State
// =============================================================================

/// Pipeline state shown by the upload zone.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UploadState {
    #[default]
    Idle,
    Validating,
    Processing,
    Success,
    Error {
        /// Text for the user.
        message: String,
        /// Individual validation failures, empty for provider failures.
        reasons: Vec<String>,
    },
}

impl UploadState {
    /// Returns true while a job is in flight.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Validating | Self::Processing)
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error { message, .. } => Some(message),
            _ => None,
        }
    }
}

/// Tunables of the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOptions {
    pub constraints: UploadConstraints,
    /// Bound on reading metadata.
    pub metadata_timeout: Duration,
    /// Bound on one provider call.
    pub analysis_timeout: Duration,
    /// Thumbnail locator given to new videos.
    pub thumbnail: String,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            constraints: UploadConstraints::default(),
            metadata_timeout: Duration::from_millis(config::DEFAULT_METADATA_TIMEOUT_MS),
            analysis_timeout: Duration::from_millis(config::DEFAULT_ANALYSIS_TIMEOUT_MS),
            thumbnail: config::DEFAULT_THUMBNAIL_PLACEHOLDER.to_string(),
        }
    }
}

// =============================================================================
// Jobs
// =============================================================================

/// Races `work` against cancellation and a timeout.
async fn bounded<T, F>(
    stage: PipelineStage,
    timeout: Duration,
    cancel: &CancellationToken,
    work: F,
) -> Result<T, PipelineError>
where
    F: Future<Output = Result<T, ProviderError>>,
{
    tokio::select! {
        () = cancel.cancelled() => Err(PipelineError::Provider {
            stage,
            source: ProviderError::Cancelled,
        }),
        result = tokio::time::timeout(timeout, work) => match result {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(source)) => Err(PipelineError::Provider { stage, source }),
            Err(_) => Err(PipelineError::Timeout { stage, timeout }),
        },
    }
}

/// Metadata read issued by [`UploadPipeline::submit`].
#[derive(Debug, Clone)]
pub struct MetadataJob {
    attempt: u64,
    file: UploadFile,
    timeout: Duration,
    cancel: CancellationToken,
}

/// Result of a [`MetadataJob`].
#[derive(Debug, Clone)]
pub struct MetadataOutcome {
    attempt: u64,
    result: Result<VideoMetadata, PipelineError>,
}

impl MetadataJob {
    #[must_use]
    pub fn attempt(&self) -> u64 {
        self.attempt
    }

    #[must_use]
    pub fn file(&self) -> &UploadFile {
        &self.file
    }

    /// Probes the file, bounded by the metadata timeout.
    pub async fn run(self, probe: &dyn MetadataProbe) -> MetadataOutcome {
        let result = bounded(
            PipelineStage::Metadata,
            self.timeout,
            &self.cancel,
            probe.probe(&self.file),
        )
        .await;
        MetadataOutcome {
            attempt: self.attempt,
            result,
        }
    }
}

/// Provider call issued by [`UploadPipeline::begin_analysis`].
#[derive(Debug, Clone)]
pub struct AnalysisJob {
    attempt: u64,
    video: Video,
    timeout: Duration,
    cancel: CancellationToken,
}

/// Result of an [`AnalysisJob`].
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    attempt: u64,
    result: Result<Vec<Detection>, PipelineError>,
}

impl AnalysisJob {
    #[must_use]
    pub fn attempt(&self) -> u64 {
        self.attempt
    }

    /// The provisional video being analyzed.
    #[must_use]
    pub fn video(&self) -> &Video {
        &self.video
    }

    /// Calls the provider, bounded by the analysis timeout.
    pub async fn run(self, provider: &dyn DetectionProvider) -> AnalysisOutcome {
        let result = bounded(
            PipelineStage::Analysis,
            self.timeout,
            &self.cancel,
            provider.analyze(&self.video),
        )
        .await;
        AnalysisOutcome {
            attempt: self.attempt,
            result,
        }
    }
}

// =============================================================================
// Pipeline
// =============================================================================

/// Drives one upload at a time from file to analyzed video.
#[derive(Debug)]
pub struct UploadPipeline {
    options: PipelineOptions,
    state: UploadState,
    progress: u8,
    attempt: u64,
    cancel: CancellationToken,
    /// File being validated.
    file: Option<UploadFile>,
    /// Metadata of a validated file awaiting analysis.
    metadata: Option<VideoMetadata>,
    /// Video under analysis; discarded unless analysis succeeds.
    provisional: Option<Video>,
}

impl Default for UploadPipeline {
    fn default() -> Self {
        Self::new(PipelineOptions::default())
    }
}

impl UploadPipeline {
    #[must_use]
    pub fn new(options: PipelineOptions) -> Self {
        Self {
            options,
            state: UploadState::Idle,
            progress: 0,
            attempt: 0,
            cancel: CancellationToken::new(),
            file: None,
            metadata: None,
            provisional: None,
        }
    }

    #[must_use]
    pub fn state(&self) -> &UploadState {
        &self.state
    }

    /// Progress bar value in percent.
    #[must_use]
    pub fn progress(&self) -> u8 {
        self.progress
    }

    #[must_use]
    pub fn attempt(&self) -> u64 {
        self.attempt
    }

    #[must_use]
    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    fn transition(&mut self, state: UploadState, progress: u8) {
        tracing::info!(attempt = self.attempt, from = ?self.state, to = ?state, progress, "upload state");
        self.state = state;
        self.progress = progress;
    }

    fn fail(&mut self, err: &PipelineError) {
        tracing::warn!(attempt = self.attempt, error = %err, "upload failed");
        self.file = None;
        self.metadata = None;
        self.provisional = None;
        let progress = self.progress;
        self.transition(
            UploadState::Error {
                message: err.user_message(),
                reasons: err.reasons().to_vec(),
            },
            progress,
        );
    }

    /// Starts a fresh attempt, cancelling any job still in flight.
    fn next_attempt(&mut self) {
        self.cancel.cancel();
        self.cancel = CancellationToken::new();
        self.attempt += 1;
        self.file = None;
        self.metadata = None;
        self.provisional = None;
    }

    /// Accepts the files of a drop.
    ///
    /// Empty drops are ignored, as are drops while a job is in flight.
    /// Invalid drops move to `Error`. Otherwise the pipeline enters
    /// `Validating` and returns the metadata job to run.
    pub fn submit(&mut self, files: &[UploadFile]) -> Option<MetadataJob> {
        if self.state.is_busy() {
            tracing::debug!("upload ignored while busy");
            return None;
        }
        let file = match check_files(files) {
            Ok(Some(file)) => file.clone(),
            Ok(None) => return None,
            Err(err) => {
                self.next_attempt();
                self.fail(&err);
                return None;
            }
        };

        self.next_attempt();
        self.file = Some(file.clone());
        self.transition(UploadState::Validating, PROGRESS_VALIDATING);
        Some(MetadataJob {
            attempt: self.attempt,
            file,
            timeout: self.options.metadata_timeout,
            cancel: self.cancel.clone(),
        })
    }

    fn is_current(&self, attempt: u64) -> bool {
        if attempt == self.attempt {
            true
        } else {
            tracing::debug!(attempt, current = self.attempt, "stale job result ignored");
            false
        }
    }

    /// Applies a metadata result: `Validating -> Processing | Error`.
    ///
    /// Returns whether the file passed validation. Stale outcomes are ignored.
    pub fn on_metadata(&mut self, outcome: MetadataOutcome) -> bool {
        if !self.is_current(outcome.attempt) || self.state != UploadState::Validating {
            return false;
        }
        let checked = outcome
            .result
            .and_then(|metadata| validate(&metadata, &self.options.constraints).map(|()| metadata));
        match checked {
            Ok(metadata) => {
                self.metadata = Some(metadata);
                self.transition(UploadState::Processing, PROGRESS_VALIDATED);
                true
            }
            Err(err) => {
                self.fail(&err);
                false
            }
        }
    }

    /// Builds the provisional video and returns the analysis job.
    ///
    /// Returns `None` unless a validated file is waiting.
    pub fn begin_analysis(&mut self) -> Option<AnalysisJob> {
        if self.state != UploadState::Processing || self.provisional.is_some() {
            return None;
        }
        let file = self.file.take()?;
        let metadata = self.metadata.take()?;

        let video = Video {
            id: uuid::Uuid::new_v4().to_string(),
            title: file.stem().to_string(),
            url: file.url.clone(),
            thumbnail: self.options.thumbnail.clone(),
            upload_date: Utc::now(),
            duration: metadata.duration_secs,
            resolution: metadata.resolution(),
            fps: ESTIMATED_FPS,
            file_size: file.size_bytes,
            tags: vec![UNCLASSIFIED_TAG.to_string()],
        };
        self.provisional = Some(video.clone());
        self.progress = PROGRESS_ANALYZING;
        tracing::info!(attempt = self.attempt, video_id = %video.id, "analysis started");

        Some(AnalysisJob {
            attempt: self.attempt,
            video,
            timeout: self.options.analysis_timeout,
            cancel: self.cancel.clone(),
        })
    }

    /// Applies an analysis result: `Processing -> Success | Error`.
    ///
    /// On success the video's tags become the distinct detected object
    /// types and the video is installed in `session`. On failure the
    /// provisional video is dropped and `session` is untouched. Stale
    /// outcomes are ignored. Returns whether the upload succeeded.
    pub fn on_analysis(&mut self, outcome: AnalysisOutcome, session: &mut Session) -> bool {
        if !self.is_current(outcome.attempt) || self.state != UploadState::Processing {
            return false;
        }
        let Some(mut video) = self.provisional.take() else {
            return false;
        };
        match outcome.result {
            Ok(detections) => {
                let mut tags: Vec<String> = Vec::new();
                for detection in &detections {
                    let tag = detection.object_type.as_str();
                    if !tags.iter().any(|t| t == tag) {
                        tags.push(tag.to_string());
                    }
                }
                video.tags = tags;
                session.install_analyzed(video, detections);
                self.transition(UploadState::Success, PROGRESS_DONE);
                true
            }
            Err(err) => {
                self.fail(&err);
                false
            }
        }
    }

    /// Abandons the current upload and returns to `Idle`.
    ///
    /// Any job in flight is cancelled and its result will be ignored.
    pub fn discard(&mut self) {
        self.next_attempt();
        self.transition(UploadState::Idle, 0);
    }

    /// `Error -> Idle`. No effect in other states.
    pub fn retry(&mut self) {
        if self.state.is_error() {
            self.discard();
        }
    }

    /// Runs a whole upload to completion.
    ///
    /// Returns the final state.
    pub async fn process(
        &mut self,
        files: &[UploadFile],
        probe: &dyn MetadataProbe,
        provider: &dyn DetectionProvider,
        session: &mut Session,
    ) -> &UploadState {
        let Some(job) = self.submit(files) else {
            return &self.state;
        };
        let outcome = job.run(probe).await;
        if !self.on_metadata(outcome) {
            return &self.state;
        }
        if let Some(job) = self.begin_analysis() {
            let outcome = job.run(provider).await;
            self.on_analysis(outcome, session);
        }
        &self.state
    }
}
