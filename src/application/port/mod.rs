// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for dependency inversion.
//!
//! This module defines abstract interfaces that infrastructure adapters implement.
//! These traits use only domain types, ensuring the session core remains
//! independent of concrete services.
//!
//! # Available Ports
//!
//! - [`detection`]: Video analysis producing detections
//! - [`metadata`]: Reading duration and resolution from an uploaded file
//! - [`auth`]: Login, logout and session restore
//! - [`audit`]: Read-only audit log listing
//!
//! # Design Notes
//!
//! - All traits use domain types only (no HTTP or file handles)
//! - Traits are `Send + Sync` so providers can be shared behind `Arc`
//! - Calls are `async`; callers bound them with timeouts and cancellation
//! - Methods return `Result` with domain error types

pub mod audit;
pub mod auth;
pub mod detection;
pub mod metadata;

pub use audit::AuditLogProvider;
pub use auth::AuthProvider;
pub use detection::DetectionProvider;
pub use metadata::MetadataProbe;
