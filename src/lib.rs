// SPDX-License-Identifier: MPL-2.0
//! `vidwatch` is the session core of a video-review dashboard.
//!
//! Uploaded MP4s are validated and sent to a detection provider; the
//! resulting findings are stored, sorted, filtered, overlaid on playback in
//! sync with the media clock and exported as JSON. External services
//! (detection, metadata, authentication, audit logs) are reached through the
//! traits in [`application::port`].

#![doc(html_root_url = "https://docs.rs/vidwatch/0.1.0")]

pub mod application;
pub mod config;
pub mod detection_store;
pub mod domain;
pub mod error;
pub mod export;
pub mod history;
pub mod infrastructure;
pub mod overlay;
pub mod paths;
pub mod playback;
pub mod session;
pub mod time_format;
pub mod upload;

#[cfg(test)]
pub(crate) mod test_utils;
