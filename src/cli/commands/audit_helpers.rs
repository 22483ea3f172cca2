use std::path::Path;

use chrono::Utc;

use crate::adapters::audit::json_audit_logger::JsonAuditLogger;
use crate::cli::output;
use crate::config::app_config::AppConfig;
use crate::core::models::audit_entry::{AuditAction, AuditEntry};
use crate::core::traits::audit::AuditLogger;

/// User recorded for an action: `--user`, else the configured default.
pub fn acting_user(user: Option<&str>, config: Option<&AppConfig>) -> String {
    user.map(str::to_string)
        .or_else(|| config.map(|c| c.authkeys.default_user.clone()))
        .unwrap_or_else(|| "admin".to_string())
}

/// Record an audit event. Warns on failure instead of propagating
/// the error, since audit should not block the main operation.
pub fn log_audit(
    env_dir: &Path,
    user: Option<&str>,
    action: AuditAction,
    keys: Vec<String>,
    detail: Option<String>,
) {
    let config = AppConfig::load(env_dir).ok();
    let audit_section = config.as_ref().and_then(|c| c.audit.as_ref());

    if !JsonAuditLogger::is_enabled(audit_section) {
        return;
    }

    let logger = JsonAuditLogger::from_config(env_dir, audit_section);
    let entry = AuditEntry {
        timestamp: Utc::now(),
        user: acting_user(user, config.as_ref()),
        action,
        keys,
        detail,
    };

    if let Err(e) = logger.log_event(&entry) {
        output::warning(&format!("Could not write audit log: {e}"));
    }
}
