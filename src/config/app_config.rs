use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use crate::core::errors::{AuthKeysError, Result};

/// Current format version supported by this build.
pub const CURRENT_FORMAT_VERSION: u32 = 1;

/// Top-level configuration read from `.authkeys/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub authkeys: AuthKeysSection,
    #[serde(default)]
    pub import: ImportSection,
    pub audit: Option<AuditSection>,
}

impl AppConfig {
    /// Load and validate `config.toml` from the environment directory.
    pub fn load(env_dir: &Path) -> Result<Self> {
        let config_path = env_dir.join("config.toml");
        if !config_path.exists() {
            return Err(AuthKeysError::InvalidConfig {
                detail: "config.toml not found. Run 'authkeys init' first.".into(),
            });
        }
        let content = std::fs::read_to_string(&config_path)?;
        let config = Self::parse(&content)?;
        tracing::debug!(path = %config_path.display(), "configuration loaded");
        Ok(config)
    }

    fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| AuthKeysError::InvalidConfig {
            detail: format!("Failed to parse config.toml: {e}"),
        })?;

        if config.authkeys.format_version > CURRENT_FORMAT_VERSION {
            return Err(AuthKeysError::InvalidConfig {
                detail: format!(
                    "config.toml uses format version {}, but this build only supports up to {}",
                    config.authkeys.format_version, CURRENT_FORMAT_VERSION
                ),
            });
        }

        if let Some(audit) = &config.audit {
            crate::cli::context::validate_simple_filename(&audit.log_file, "audit log file")?;
        }

        Ok(config)
    }
}

/// The `[authkeys]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthKeysSection {
    pub version: String,
    /// Format version for backward compatibility. Defaults to 1 if missing.
    #[serde(default = "default_format_version")]
    pub format_version: u32,
    /// User named in listings and audit entries when `--user` is absent.
    #[serde(default = "default_user")]
    pub default_user: String,
}

fn default_format_version() -> u32 {
    1
}

fn default_user() -> String {
    "admin".to_string()
}

/// The `[import]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImportSection {
    /// Provider used for identities written without a `provider:` prefix.
    pub default_provider: Option<String>,
    pub timeout_secs: Option<u64>,
    /// Extra or replacement HTTP providers: name -> URL template with `{handle}`.
    #[serde(default)]
    pub providers: BTreeMap<String, String>,
}

impl ImportSection {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// The `[audit]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct AuditSection {
    pub enabled: bool,
    pub log_file: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_config() {
        let config = AppConfig::parse("[authkeys]\nversion = \"0.1.0\"\n").unwrap();
        assert_eq!(config.authkeys.default_user, "admin");
        assert_eq!(config.authkeys.format_version, 1);
        assert!(config.import.default_provider.is_none());
        assert!(config.audit.is_none());
    }

    #[test]
    fn parses_import_providers() {
        let config = AppConfig::parse(
            r#"
[authkeys]
version = "0.1.0"
default_user = "ops"

[import]
default_provider = "gh"
timeout_secs = 3

[import.providers]
corp = "https://keys.example.com/{handle}"
"#,
        )
        .unwrap();

        assert_eq!(config.authkeys.default_user, "ops");
        assert_eq!(config.import.default_provider.as_deref(), Some("gh"));
        assert_eq!(config.import.timeout(), Some(Duration::from_secs(3)));
        assert_eq!(
            config.import.providers.get("corp").map(String::as_str),
            Some("https://keys.example.com/{handle}")
        );
    }

    #[test]
    fn rejects_newer_format_version() {
        let err = AppConfig::parse("[authkeys]\nversion = \"9.0.0\"\nformat_version = 99\n")
            .unwrap_err();
        assert!(err.to_string().contains("format version 99"));
    }

    #[test]
    fn rejects_audit_path_traversal() {
        let err = AppConfig::parse(
            "[authkeys]\nversion = \"0.1.0\"\n[audit]\nenabled = true\nlog_file = \"../x.log\"\n",
        )
        .unwrap_err();
        assert!(matches!(err, AuthKeysError::InvalidConfig { .. }));
    }

    #[test]
    fn missing_file_asks_for_init() {
        let dir = tempfile::tempdir().unwrap();
        let err = AppConfig::load(dir.path()).unwrap_err();
        assert!(err.to_string().contains("authkeys init"));
    }
}
