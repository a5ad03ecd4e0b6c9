// SPDX-License-Identifier: MPL-2.0
//! Infrastructure layer adapters.
//!
//! Concrete implementations of the port traits defined in
//! `application::port`.
//!
//! # Available Adapters
//!
//! - [`mock_detection`]: Random detections (implements [`DetectionProvider`])
//! - [`mock_auth`]: Two fixed accounts (implements [`AuthProvider`])
//! - [`audit`]: Stub and REST audit logs (implement [`AuditLogProvider`])
//! - [`probe`]: Declared metadata (implements [`MetadataProbe`])
//!
//! [`DetectionProvider`]: crate::application::port::DetectionProvider
//! [`AuthProvider`]: crate::application::port::AuthProvider
//! [`AuditLogProvider`]: crate::application::port::AuditLogProvider
//! [`MetadataProbe`]: crate::application::port::MetadataProbe

pub mod audit;
pub mod mock_auth;
pub mod mock_detection;
pub mod probe;

pub use audit::{HttpAuditLogProvider, StaticAuditLogProvider};
pub use mock_auth::MockAuthProvider;
pub use mock_detection::MockDetectionProvider;
pub use probe::StaticProbe;
