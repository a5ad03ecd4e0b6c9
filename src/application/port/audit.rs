// SPDX-License-Identifier: MPL-2.0
//! Audit log port definition.

use crate::domain::audit::AuditLog;
use crate::domain::error::ProviderError;
use async_trait::async_trait;

/// Read-only source of audit log entries (admin view).
#[async_trait]
pub trait AuditLogProvider: Send + Sync {
    /// Lists every entry, newest first as the service returns them.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] if the service is unreachable or the
    /// response cannot be decoded.
    async fn list_audit_logs(&self) -> Result<Vec<AuditLog>, ProviderError>;
}
