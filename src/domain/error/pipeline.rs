// SPDX-License-Identifier: MPL-2.0
//! Upload/analyze pipeline failures.

use super::ProviderError;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Message shown when metadata extraction fails or times out.
pub const VALIDATE_FAILED_MESSAGE: &str = "Failed to validate video";

/// Message shown when the detection provider fails or times out.
pub const PROCESS_FAILED_MESSAGE: &str = "Failed to process video";

/// Suspension point of the pipeline a failure happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    /// Reading duration/resolution from the uploaded file.
    Metadata,
    /// Waiting for the detection provider.
    Analysis,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineStage::Metadata => write!(f, "metadata extraction"),
            PipelineStage::Analysis => write!(f, "analysis"),
        }
    }
}

/// Error that moves the upload pipeline into its terminal `Error` state.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
    /// One or more user-correctable constraint violations.
    #[error("{}", reasons.join(", "))]
    Validation { reasons: Vec<String> },

    /// A collaborator failed.
    #[error("{stage} failed: {source}")]
    Provider {
        stage: PipelineStage,
        source: ProviderError,
    },

    /// A collaborator did not answer within its bound.
    #[error("{stage} timed out after {}ms", timeout.as_millis())]
    Timeout {
        stage: PipelineStage,
        timeout: Duration,
    },
}

impl PipelineError {
    /// Builds a validation error from a single reason.
    pub fn invalid(reason: impl Into<String>) -> Self {
        PipelineError::Validation {
            reasons: vec![reason.into()],
        }
    }

    /// Text shown in the error state.
    ///
    /// Validation reasons are listed verbatim; provider failures and timeouts
    /// collapse to a generic message for their stage.
    pub fn user_message(&self) -> String {
        match self {
            PipelineError::Validation { reasons } => reasons.join(", "),
            PipelineError::Provider { stage, .. } | PipelineError::Timeout { stage, .. } => {
                match stage {
                    PipelineStage::Metadata => VALIDATE_FAILED_MESSAGE.to_string(),
                    PipelineStage::Analysis => PROCESS_FAILED_MESSAGE.to_string(),
                }
            }
        }
    }

    /// Individual validation reasons, empty for provider failures.
    pub fn reasons(&self) -> &[String] {
        match self {
            PipelineError::Validation { reasons } => reasons,
            _ => &[],
        }
    }

    /// Returns true when the user can fix the problem by choosing another file.
    pub fn is_user_correctable(&self) -> bool {
        matches!(self, PipelineError::Validation { .. })
    }
}
