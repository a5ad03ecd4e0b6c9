// SPDX-License-Identifier: MPL-2.0
//! Errors reported by external collaborators (detection, metadata, auth,
//! audit providers and the media surface).

use thiserror::Error;

/// Failure of a provider call (detection analysis, metadata probe, audit log).
///
/// The cause is kept for logging only; user-facing text never exposes it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// Provider could not be reached or refused the request.
    #[error("provider unavailable: {0}")]
    Unavailable(String),

    /// Provider answered with data that could not be interpreted.
    #[error("invalid provider response: {0}")]
    InvalidResponse(String),

    /// Request was abandoned before the provider answered.
    #[error("request cancelled")]
    Cancelled,
}

impl ProviderError {
    /// Returns the message key used when surfacing this error.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            ProviderError::Unavailable(_) => "error-provider-unavailable",
            ProviderError::InvalidResponse(_) => "error-provider-invalid-response",
            ProviderError::Cancelled => "error-provider-cancelled",
        }
    }
}

/// Authentication failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Authentication service unavailable: {0}")]
    Unavailable(String),
}

/// Errors raised by the underlying playback surface.
///
/// These never reach callers of the playback controller; they force the
/// controller back to `Paused`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SurfaceError {
    /// The surface refused to start playback (e.g. autoplay policy).
    #[error("playback rejected: {0}")]
    PlaybackRejected(String),

    /// The surface has no media attached yet.
    #[error("media surface not ready")]
    NotReady,
}
