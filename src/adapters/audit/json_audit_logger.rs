use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use crate::config::app_config::AuditSection;
use crate::core::errors::{AuthKeysError, Result};
use crate::core::models::audit_entry::{AuditEntry, AuditFilter};
use crate::core::traits::audit::AuditLogger;

/// Audit logger that appends entries as JSON lines to a file.
///
/// Each line is one self-contained `AuditEntry`, so appends never need
/// to rewrite the file and reads can stream line by line.
pub struct JsonAuditLogger {
    log_path: PathBuf,
}

impl JsonAuditLogger {
    /// Create a logger that writes to `{env_dir}/{log_file}`.
    pub fn new(env_dir: &Path, log_file: &str) -> Self {
        Self {
            log_path: env_dir.join(log_file),
        }
    }

    /// Create a logger from the `[audit]` section, falling back to
    /// `audit.log` when the section is missing.
    pub fn from_config(env_dir: &Path, audit_section: Option<&AuditSection>) -> Self {
        let log_file = audit_section
            .map(|a| a.log_file.as_str())
            .unwrap_or("audit.log");
        Self::new(env_dir, log_file)
    }

    /// Auditing is on unless the config turns it off.
    pub fn is_enabled(audit_section: Option<&AuditSection>) -> bool {
        audit_section.map(|a| a.enabled).unwrap_or(true)
    }

    fn audit_error(detail: String) -> AuthKeysError {
        AuthKeysError::AuditError { detail }
    }
}

/// Decode one stored line; `None` for blank lines.
fn parse_line(line_num: usize, line: &str) -> Result<Option<AuditEntry>> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    serde_json::from_str(trimmed).map(Some).map_err(|e| {
        JsonAuditLogger::audit_error(format!("Malformed audit entry at line {line_num}: {e}"))
    })
}

impl AuditLogger for JsonAuditLogger {
    fn log_event(&self, entry: &AuditEntry) -> Result<()> {
        let line = serde_json::to_string(entry)
            .map_err(|e| Self::audit_error(format!("Failed to serialize audit entry: {e}")))?;

        if let Some(parent) = self.log_path.parent()
            && !parent.exists()
        {
            fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| {
                Self::audit_error(format!(
                    "Cannot open audit log at {}: {e}",
                    self.log_path.display()
                ))
            })?;
        writeln!(file, "{line}")
            .map_err(|e| Self::audit_error(format!("Failed to write audit entry: {e}")))?;

        tracing::debug!(action = ?entry.action, keys = entry.keys.len(), "audit entry written");
        Ok(())
    }

    fn query(&self, filter: &AuditFilter) -> Result<Vec<AuditEntry>> {
        let file = match fs::File::open(&self.log_path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(Self::audit_error(format!("Cannot read audit log: {e}"))),
        };

        let mut entries = Vec::new();
        for (idx, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|e| {
                Self::audit_error(format!("Error reading audit log line {}: {e}", idx + 1))
            })?;
            if let Some(entry) = parse_line(idx + 1, &line)?
                && filter.matches(&entry)
            {
                entries.push(entry);
            }
        }
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::audit_entry::AuditAction;
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    const KEY_ONE_FINGERPRINT: &str = "SHA256:ypaOARKoebnuSwqUNUCkaiJn9C6xDBwHLjny98fsDnM";
    const KEY_TWO_FINGERPRINT: &str = "SHA256:Hg7FgtftDPKratOTGZXQ48E2W3aLM1atAAo801wcqMo";

    fn change(user: &str, action: AuditAction, keys: &[&str]) -> AuditEntry {
        AuditEntry {
            timestamp: Utc::now(),
            user: user.to_string(),
            action,
            keys: keys.iter().map(|k| k.to_string()).collect(),
            detail: None,
        }
    }

    fn logger_with(entries: &[AuditEntry]) -> (TempDir, JsonAuditLogger) {
        let tmp = TempDir::new().unwrap();
        let logger = JsonAuditLogger::new(tmp.path(), "audit.log");
        for entry in entries {
            logger.log_event(entry).unwrap();
        }
        (tmp, logger)
    }

    #[test]
    fn history_of_one_key() {
        let (_tmp, logger) = logger_with(&[
            change("admin", AuditAction::KeyAdd, &[KEY_ONE_FINGERPRINT, KEY_TWO_FINGERPRINT]),
            change("fred", AuditAction::KeyDelete, &[KEY_TWO_FINGERPRINT]),
            change("admin", AuditAction::Block, &[]),
            change("fred", AuditAction::KeyImport, &[KEY_TWO_FINGERPRINT]),
        ]);

        let filter = AuditFilter {
            key: Some(KEY_TWO_FINGERPRINT.to_string()),
            ..Default::default()
        };
        let actions: Vec<_> = logger
            .query(&filter)
            .unwrap()
            .into_iter()
            .map(|e| e.action)
            .collect();

        assert_eq!(
            actions,
            vec![AuditAction::KeyAdd, AuditAction::KeyDelete, AuditAction::KeyImport]
        );
    }

    #[test]
    fn changes_by_user_since_date() {
        let old = AuditEntry {
            timestamp: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
            ..change("fred", AuditAction::KeyAdd, &[KEY_ONE_FINGERPRINT])
        };
        let (_tmp, logger) = logger_with(&[
            old,
            change("admin", AuditAction::KeyAdd, &[KEY_TWO_FINGERPRINT]),
            change("fred", AuditAction::KeyDelete, &[KEY_ONE_FINGERPRINT]),
        ]);

        let filter = AuditFilter {
            user: Some("Fred".into()),
            since: Some(Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()),
            key: None,
        };
        let results = logger.query(&filter).unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].action, AuditAction::KeyDelete);
    }

    #[test]
    fn blank_lines_are_skipped_and_garbage_reported() {
        let tmp = TempDir::new().unwrap();
        let entry = serde_json::to_string(&change("admin", AuditAction::Init, &[])).unwrap();
        std::fs::write(tmp.path().join("audit.log"), format!("{entry}\n\n{{not json}}\n")).unwrap();
        let logger = JsonAuditLogger::new(tmp.path(), "audit.log");

        let err = logger.query(&AuditFilter::default()).unwrap_err();
        assert!(err.to_string().contains("line 3"));
    }

    #[test]
    fn missing_log_is_empty_history() {
        let tmp = TempDir::new().unwrap();
        let logger = JsonAuditLogger::new(&tmp.path().join("never-created"), "audit.log");
        assert!(logger.query(&AuditFilter::default()).unwrap().is_empty());
    }

    #[test]
    fn configured_log_file_is_used() {
        let tmp = TempDir::new().unwrap();
        let section = AuditSection {
            enabled: true,
            log_file: "changes.jsonl".to_string(),
        };
        let logger = JsonAuditLogger::from_config(tmp.path(), Some(&section));

        logger
            .log_event(&change("admin", AuditAction::Unblock, &[]))
            .unwrap();

        assert!(tmp.path().join("changes.jsonl").exists());
        assert!(!tmp.path().join("audit.log").exists());
    }

    #[test]
    fn auditing_defaults_to_on() {
        let disabled = AuditSection {
            enabled: false,
            log_file: "audit.log".to_string(),
        };

        assert!(JsonAuditLogger::is_enabled(None));
        assert!(!JsonAuditLogger::is_enabled(Some(&disabled)));
    }
}
