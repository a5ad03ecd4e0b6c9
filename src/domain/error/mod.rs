// SPDX-License-Identifier: MPL-2.0
//! Domain error types.
//!
//! These errors describe failures of the review session and its external
//! collaborators. They are turned into user-visible state by the pipeline and
//! playback controller rather than propagated as faults.

mod pipeline;
mod provider;

pub use pipeline::{PipelineError, PipelineStage, PROCESS_FAILED_MESSAGE, VALIDATE_FAILED_MESSAGE};
pub use provider::{AuthError, ProviderError, SurfaceError};
