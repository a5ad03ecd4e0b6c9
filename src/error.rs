// SPDX-License-Identifier: MPL-2.0
//! Crate-level error type.
//!
//! Domain failures that end up in a user-visible state (upload pipeline,
//! providers, playback surface) have their own enums in [`crate::domain::error`];
//! this type covers the ambient I/O, configuration and serialization failures.

use crate::domain::error::{AuthError, ProviderError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config Error: {0}")]
    Config(String),

    #[error("JSON Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Auth Error: {0}")]
    Auth(#[from] AuthError),

    #[error("Provider Error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
