// SPDX-License-Identifier: MPL-2.0
//! Domain layer - pure types and business rules of a review session.
//!
//! Nothing in here performs I/O. Serialization derives are the only
//! concession to the outside world, since detections and videos are
//! exported and persisted as-is.
//!
//! # Modules
//!
//! - [`audit`]: Audit log entries and filtering
//! - [`auth`]: Users, roles and login credentials
//! - [`detection`]: Detections, bounding boxes and object classes
//! - [`error`]: Domain error types ([`PipelineError`](error::PipelineError),
//!   [`ProviderError`](error::ProviderError))
//! - [`video`]: Video records and playback value objects

pub mod audit;
pub mod auth;
pub mod detection;
pub mod error;
pub mod video;
