// SPDX-License-Identifier: MPL-2.0
//! Application layer - ports to external collaborators.
//!
//! - [`port`]: Trait definitions (interfaces) for dependency inversion
//!
//! # Dependency Rule
//!
//! - Application layer depends on domain layer (uses domain types)
//! - Infrastructure layer implements application layer ports
//! - The session core uses ports, never adapters directly

pub mod port;
