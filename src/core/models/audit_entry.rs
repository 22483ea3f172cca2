use serde::{Deserialize, Serialize};

/// Actions that get recorded in the audit log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    Init,
    KeyAdd,
    KeyDelete,
    KeyImport,
    Block,
    Unblock,
}

/// A single entry in the audit log (JSON lines format).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub user: String,
    pub action: AuditAction,
    /// Fingerprints of the keys the action added or removed.
    #[serde(default)]
    pub keys: Vec<String>,
    pub detail: Option<String>,
}

/// Which audit entries `authkeys log` should show.
#[derive(Debug, Clone, Default)]
pub struct AuditFilter {
    /// Acting user, compared case-insensitively.
    pub user: Option<String>,
    pub since: Option<chrono::DateTime<chrono::Utc>>,
    /// Fingerprint or a prefix of one, as printed by `authkeys list`.
    pub key: Option<String>,
}

impl AuditFilter {
    pub fn is_empty(&self) -> bool {
        self.user.is_none() && self.since.is_none() && self.key.is_none()
    }

    pub fn matches(&self, entry: &AuditEntry) -> bool {
        if let Some(user) = &self.user
            && !entry.user.eq_ignore_ascii_case(user)
        {
            return false;
        }
        if let Some(since) = self.since
            && entry.timestamp < since
        {
            return false;
        }
        match &self.key {
            Some(key) => {
                let prefix = key.trim_end_matches("...");
                entry.keys.iter().any(|k| k.starts_with(prefix))
            }
            None => true,
        }
    }
}
