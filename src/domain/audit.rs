// SPDX-License-Identifier: MPL-2.0
//! Audit log entries and the admin view's filter.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLog {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    pub action: String,
    pub details: String,
    pub timestamp: DateTime<Utc>,
}

/// Search term plus optional exact action match.
///
/// The term is matched case-insensitively against user name, action and
/// details; an empty term matches everything.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AuditLogFilter {
    pub search: String,
    pub action: Option<String>,
}

impl AuditLogFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn matches(&self, log: &AuditLog) -> bool {
        let term = self.search.to_lowercase();
        let matches_search = term.is_empty()
            || log.user_name.to_lowercase().contains(&term)
            || log.action.to_lowercase().contains(&term)
            || log.details.to_lowercase().contains(&term);
        let matches_action = self
            .action
            .as_deref()
            .is_none_or(|action| log.action == action);
        matches_search && matches_action
    }

    /// Returns the matching entries in their original order.
    #[must_use]
    pub fn apply<'a>(&self, logs: &'a [AuditLog]) -> Vec<&'a AuditLog> {
        logs.iter().filter(|log| self.matches(log)).collect()
    }
}

/// Distinct actions in first-seen order, for the action dropdown.
#[must_use]
pub fn unique_actions(logs: &[AuditLog]) -> Vec<&str> {
    let mut actions: Vec<&str> = Vec::new();
    for log in logs {
        if !actions.contains(&log.action.as_str()) {
            actions.push(&log.action);
        }
    }
    actions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log(id: &str, user: &str, action: &str, details: &str) -> AuditLog {
        AuditLog {
            id: id.into(),
            user_id: "1".into(),
            user_name: user.into(),
            action: action.into(),
            details: details.into(),
            timestamp: DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap_or_default(),
        }
    }

    fn logs() -> Vec<AuditLog> {
        vec![
            log("1", "Admin User", "login", "Signed in"),
            log("2", "Regular User", "upload", "Uploaded lobby.mp4"),
            log("3", "Admin User", "export", "Exported lobby detections"),
            log("4", "Regular User", "login", "Signed in"),
        ]
    }

    #[test]
    fn empty_filter_matches_all() {
        let logs = logs();
        assert_eq!(AuditLogFilter::new().apply(&logs).len(), 4);
    }

    #[test]
    fn search_covers_user_action_and_details() {
        let logs = logs();
        let filter = AuditLogFilter {
            search: "LOBBY".into(),
            action: None,
        };
        let ids: Vec<_> = filter.apply(&logs).iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "3"]);

        let filter = AuditLogFilter {
            search: "regular".into(),
            action: None,
        };
        assert_eq!(filter.apply(&logs).len(), 2);
    }

    #[test]
    fn action_filter_is_exact() {
        let logs = logs();
        let filter = AuditLogFilter {
            search: String::new(),
            action: Some("login".into()),
        };
        assert_eq!(filter.apply(&logs).len(), 2);
    }

    #[test]
    fn unique_actions_keep_first_seen_order() {
        let logs = logs();
        assert_eq!(unique_actions(&logs), vec!["login", "upload", "export"]);
    }
}
