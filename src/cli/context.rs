use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::adapters::config_stores::file_config_store::FileConfigStore;
use crate::adapters::guards::file_change_guard::FileChangeGuard;
use crate::adapters::importers::file_key_provider::FileKeyProvider;
use crate::adapters::importers::http_key_provider::{DEFAULT_TIMEOUT, HttpKeyProvider};
use crate::adapters::key_set_stores::config_key_set_store::ConfigKeySetStore;
use crate::config::app_config::AppConfig;
use crate::core::errors::{AuthKeysError, Result};
use crate::core::services::identity_resolver::IdentityResolver;
use crate::core::services::reconcile_engine::ReconcileEngine;

const DEFAULT_DIR: &str = ".authkeys";

static ENV_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Initialize the global environment directory path.
/// If `custom` is provided, uses that path; otherwise defaults to `.authkeys`.
pub fn init(custom: Option<&Path>) {
    let dir = custom
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DIR));
    let _ = ENV_DIR.set(dir);
}

/// Get the current environment directory path.
pub fn env_dir() -> &'static Path {
    ENV_DIR
        .get()
        .map(|p| p.as_path())
        .unwrap_or(Path::new(DEFAULT_DIR))
}

/// Fail unless `authkeys init` has been run for the current directory.
pub fn require_initialized() -> Result<&'static Path> {
    let dir = env_dir();
    if !dir.exists() {
        return Err(AuthKeysError::InvalidConfig {
            detail: format!(
                "No environment at {}. Run 'authkeys init' first.",
                dir.display()
            ),
        });
    }
    Ok(dir)
}

/// Reject file names that could point outside the environment directory.
pub fn validate_simple_filename(name: &str, what: &str) -> Result<()> {
    let invalid = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains('/')
        || name.contains('\\')
        || name.contains('\0');
    if invalid {
        return Err(AuthKeysError::InvalidConfig {
            detail: format!("Invalid {what} '{name}': must be a plain file name"),
        });
    }
    Ok(())
}

pub type Engine = ReconcileEngine<ConfigKeySetStore<FileConfigStore>, FileChangeGuard>;

/// Wire the file-backed store and guard of `dir` into an engine.
pub fn engine(dir: &Path) -> Engine {
    ReconcileEngine {
        store: ConfigKeySetStore::new(FileConfigStore::new(dir.join("environment.toml"))),
        guard: FileChangeGuard::new(dir.join("blocks.toml")),
    }
}

/// Build the identity resolver from the `[import]` section: the built-in
/// providers first, then any configured ones, which may replace them.
pub fn identity_resolver(config: &AppConfig) -> IdentityResolver {
    let timeout = config.import.timeout().unwrap_or(DEFAULT_TIMEOUT);

    let mut resolver = IdentityResolver::new(config.import.default_provider.clone())
        .register(Box::new(HttpKeyProvider::launchpad(timeout)))
        .register(Box::new(HttpKeyProvider::github(timeout)))
        .register(Box::new(FileKeyProvider));

    for (name, template) in &config.import.providers {
        resolver = resolver.register(Box::new(HttpKeyProvider::new(
            name.clone(),
            template.clone(),
            timeout,
        )));
    }
    resolver
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_filenames() {
        assert!(validate_simple_filename("audit.log", "audit log file").is_ok());
        for bad in ["", ".", "..", "../audit.log", "logs/audit.log", "a\\b"] {
            assert!(validate_simple_filename(bad, "audit log file").is_err());
        }
    }
}
