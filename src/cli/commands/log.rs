use chrono::{NaiveDate, TimeZone, Utc};
use colored::Colorize;

use crate::adapters::audit::json_audit_logger::JsonAuditLogger;
use crate::cli::output;
use crate::config::app_config::AppConfig;
use crate::core::errors::{AuthKeysError, Result};
use crate::core::models::audit_entry::{AuditAction, AuditEntry, AuditFilter};
use crate::core::traits::audit::AuditLogger;

/// Execute the `authkeys log` command.
///
/// Displays the audit log with optional filters for user, date,
/// key fingerprint and entry count.
pub fn execute(
    author: Option<&str>,
    since: Option<&str>,
    key: Option<&str>,
    last: Option<usize>,
) -> Result<()> {
    let env_dir = crate::cli::context::require_initialized()?;
    let config = AppConfig::load(env_dir)?;
    let logger = JsonAuditLogger::from_config(env_dir, config.audit.as_ref());

    let filter = AuditFilter {
        user: author.map(str::to_string),
        since: since.map(parse_since).transpose()?,
        key: key.map(str::to_string),
    };
    let entries = logger.query(&filter)?;

    if entries.is_empty() {
        output::header("authkeys log");
        output::warning("No audit entries found");
        if !filter.is_empty() {
            println!("  Try removing filters to see all entries.");
        }
        return Ok(());
    }

    // --last N keeps the newest N, still printed oldest first
    let skip = last.map_or(0, |n| entries.len().saturating_sub(n));
    let display: Vec<&AuditEntry> = entries.iter().skip(skip).collect();

    output::header(&format!("authkeys log ({} entries)", display.len()));
    println!();

    for entry in &display {
        print_entry(entry);
    }

    Ok(())
}

/// Parse a date string (ISO 8601: `YYYY-MM-DD`) into a UTC DateTime.
fn parse_since(s: &str) -> Result<chrono::DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| AuthKeysError::InvalidConfig {
        detail: format!(
            "Invalid date format: '{s}'. Expected ISO 8601 (YYYY-MM-DD), e.g. 2026-01-15"
        ),
    })?;
    Ok(Utc.from_utc_datetime(&date.and_time(chrono::NaiveTime::default())))
}

fn print_entry(entry: &AuditEntry) {
    let date = entry.timestamp.format("%Y-%m-%d %H:%M:%S");
    let keys = if entry.keys.is_empty() {
        "-".dimmed().to_string()
    } else {
        entry.keys.join(", ")
    };
    let detail = entry.detail.as_deref().unwrap_or("").dimmed().to_string();

    println!(
        "  {} {} {:<10} {:<8} {} {}",
        date.to_string().dimmed(),
        "│".dimmed(),
        format_action(&entry.action),
        entry.user,
        keys,
        detail,
    );
}

fn format_action(action: &AuditAction) -> String {
    match action {
        AuditAction::Init => "init".cyan().to_string(),
        AuditAction::KeyAdd => "key add".green().to_string(),
        AuditAction::KeyDelete => "key del".red().to_string(),
        AuditAction::KeyImport => "key import".blue().to_string(),
        AuditAction::Block => "block".yellow().to_string(),
        AuditAction::Unblock => "unblock".yellow().to_string(),
    }
}
