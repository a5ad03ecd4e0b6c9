// SPDX-License-Identifier: MPL-2.0
//! Audit log adapters: a fixed stub and the REST endpoint.

use crate::application::port::AuditLogProvider;
use crate::domain::audit::AuditLog;
use crate::domain::error::ProviderError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Path of the audit log listing, relative to the API base URL.
const AUDIT_LOGS_PATH: &str = "/admin/audit-logs";

// =============================================================================
// Static stub
// =============================================================================

/// Serves a fixed list of entries.
#[derive(Debug, Clone, Default)]
pub struct StaticAuditLogProvider {
    logs: Vec<AuditLog>,
}

impl StaticAuditLogProvider {
    #[must_use]
    pub fn new(logs: Vec<AuditLog>) -> Self {
        Self { logs }
    }

    /// A small canned log for demos.
    #[must_use]
    pub fn sample() -> Self {
        Self::new(vec![
            sample_entry(
                "4",
                ("2", "Regular User"),
                "export",
                "Exported detections for lobby_cam",
                1_700_003_600,
            ),
            sample_entry(
                "3",
                ("2", "Regular User"),
                "upload",
                "Uploaded lobby_cam.mp4",
                1_700_002_400,
            ),
            sample_entry(
                "2",
                ("2", "Regular User"),
                "login",
                "Signed in",
                1_700_001_200,
            ),
            sample_entry(
                "1",
                ("1", "Admin User"),
                "login",
                "Signed in",
                1_700_000_000,
            ),
        ])
    }
}

fn sample_entry(
    id: &str,
    (user_id, user_name): (&str, &str),
    action: &str,
    details: &str,
    unix_secs: i64,
) -> AuditLog {
    AuditLog {
        id: id.to_string(),
        user_id: user_id.to_string(),
        user_name: user_name.to_string(),
        action: action.to_string(),
        details: details.to_string(),
        timestamp: DateTime::<Utc>::from_timestamp(unix_secs, 0).unwrap_or_default(),
    }
}

#[async_trait]
impl AuditLogProvider for StaticAuditLogProvider {
    async fn list_audit_logs(&self) -> Result<Vec<AuditLog>, ProviderError> {
        Ok(self.logs.clone())
    }
}

// =============================================================================
// HTTP
// =============================================================================

/// Fetches entries from `GET {base_url}/admin/audit-logs`.
#[derive(Debug, Clone)]
pub struct HttpAuditLogProvider {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpAuditLogProvider {
    /// * `base_url` - API root, e.g. `http://localhost:3000/api`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Reuses an existing client (connection pooling).
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    /// Sends `Authorization: Bearer <token>` with every request.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn url(&self) -> String {
        format!("{}{AUDIT_LOGS_PATH}", self.base_url)
    }
}

#[async_trait]
impl AuditLogProvider for HttpAuditLogProvider {
    async fn list_audit_logs(&self) -> Result<Vec<AuditLog>, ProviderError> {
        let mut request = self.client.get(self.url());
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ProviderError::Unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), %body, "audit log request failed");
            return Err(ProviderError::Unavailable(format!("HTTP {status}")));
        }

        let logs: Vec<AuditLog> = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;
        tracing::debug!(count = logs.len(), "audit logs fetched");
        Ok(logs)
    }
}
