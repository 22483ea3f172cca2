use std::io::Write;
use std::path::{Path, PathBuf};

use crate::core::errors::{AuthKeysError, Result};
use crate::core::traits::config_store::ConfigStore;

/// Environment configuration kept in a flat TOML table of strings.
///
/// Example `environment.toml`:
/// ```text
/// authorized-keys = """
/// ssh-ed25519 AAAAC3NzaC1lZDI1NTE5AAAAIGqF... user@host
/// ssh-ed25519 AAAAC3NzaC1lZDI1NTE5AAAAIDGB... another@host"""
/// ```
///
/// Writes go to a temporary file in the same directory which is then
/// renamed over the original, so readers see either the old table or
/// the new one.
#[derive(Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_table(&self) -> Result<toml::Table> {
        if !self.path.exists() {
            return Ok(toml::Table::new());
        }
        let content = std::fs::read_to_string(&self.path)?;
        content
            .parse::<toml::Table>()
            .map_err(|e| AuthKeysError::InvalidConfig {
                detail: format!("Failed to parse {}: {e}", self.path.display()),
            })
    }

    fn write_table(&self, table: &toml::Table) -> Result<()> {
        let content = toml::to_string(table).map_err(|e| AuthKeysError::InvalidConfig {
            detail: format!("Failed to serialize {}: {e}", self.path.display()),
        })?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| AuthKeysError::Io(e.error))?;
        Ok(())
    }
}

impl ConfigStore for FileConfigStore {
    fn get(&self, key: &str) -> Result<String> {
        let table = self.read_table()?;
        match table.get(key) {
            None => Ok(String::new()),
            Some(toml::Value::String(s)) => Ok(s.clone()),
            Some(other) => Err(AuthKeysError::InvalidConfig {
                detail: format!(
                    "'{key}' in {} must be a string, found {}",
                    self.path.display(),
                    other.type_str()
                ),
            }),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut table = self.read_table()?;
        table.insert(key.to_string(), toml::Value::String(value.to_string()));
        self.write_table(&table)?;
        tracing::debug!(key, path = %self.path().display(), "environment setting written");
        Ok(())
    }
}
