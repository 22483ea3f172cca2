use crate::core::errors::{AuthKeysError, Result};
use crate::core::models::key_set::{KeyEntry, KeySet};
use crate::core::services::key_parser::KeyParser;
use crate::core::traits::config_store::{AUTHORIZED_KEYS, ConfigStore};
use crate::core::traits::key_store::KeySetStore;

/// Key set kept as one newline-joined string under the
/// `authorized-keys` environment setting.
///
/// Blank lines are dropped on load. Lines that do not parse are kept
/// verbatim as opaque entries and written back unchanged.
pub struct ConfigKeySetStore<C: ConfigStore> {
    config: C,
}

impl<C: ConfigStore> ConfigKeySetStore<C> {
    pub fn new(config: C) -> Self {
        Self { config }
    }

    /// Turn a stored line into an entry, if it is not blank.
    fn parse_line(line: &str) -> Option<KeyEntry> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return None;
        }

        match KeyParser::parse(trimmed) {
            Ok(key) => Some(KeyEntry::Parsed(key)),
            Err(e) => {
                tracing::debug!(error = %e, "keeping unparsable authorized key entry as-is");
                Some(KeyEntry::Opaque(trimmed.to_string()))
            }
        }
    }
}

impl<C: ConfigStore> KeySetStore for ConfigKeySetStore<C> {
    fn load(&self) -> Result<KeySet> {
        let content = self.config.get(AUTHORIZED_KEYS)?;
        let mut keys = KeySet::new();

        for entry in content.lines().filter_map(Self::parse_line) {
            let fingerprint = entry.fingerprint().unwrap_or_default().to_string();
            if !keys.push(entry) {
                tracing::debug!(%fingerprint, "dropping duplicate stored key");
            }
        }

        tracing::debug!(entries = keys.len(), "authorized keys loaded");
        Ok(keys)
    }

    fn save(&self, keys: &KeySet) -> Result<()> {
        self.config
            .set(AUTHORIZED_KEYS, &keys.to_text())
            .map_err(|e| AuthKeysError::PersistFailed {
                reason: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::config_stores::file_config_store::FileConfigStore;

    const KEY_ONE: &str =
        "ssh-ed25519 AAAAC3NzaC1lZDI1NTE5AAAAIGqF/jwORIgRvnQB3IxDfR8dgTgzs0tD5Y22B2VPxlg6 user@host";
    const KEY_TWO: &str =
        "ssh-ed25519 AAAAC3NzaC1lZDI1NTE5AAAAIDGBrlX/pVS8NHMDL1CiDFBbGJvDjcMOlWI7xQI4mlg2 another@host";

    fn temp_store() -> (tempfile::TempDir, ConfigKeySetStore<FileConfigStore>) {
        let dir = tempfile::tempdir().unwrap();
        let config = FileConfigStore::new(dir.path().join("environment.toml"));
        (dir, ConfigKeySetStore::new(config))
    }

    fn stored(store: &ConfigKeySetStore<FileConfigStore>) -> String {
        store.config.get(AUTHORIZED_KEYS).unwrap()
    }

    #[test]
    fn load_empty_returns_empty() {
        let (_dir, store) = temp_store();
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn save_then_load() {
        let (_dir, store) = temp_store();
        let mut keys = KeySet::new();
        keys.insert(KeyParser::parse(KEY_ONE).unwrap());
        keys.insert(KeyParser::parse(KEY_TWO).unwrap());

        store.save(&keys).unwrap();

        assert_eq!(stored(&store), format!("{KEY_ONE}\n{KEY_TWO}"));
        assert_eq!(store.load().unwrap(), keys);
    }

    #[test]
    fn save_of_load_rewrites_identical_value() {
        let (_dir, store) = temp_store();
        let original = format!("{KEY_ONE}\n# managed by ops\n{KEY_TWO}");
        store.config.set(AUTHORIZED_KEYS, &original).unwrap();

        store.save(&store.load().unwrap()).unwrap();

        assert_eq!(stored(&store), original);
    }

    #[test]
    fn unparsable_lines_are_preserved() {
        let (_dir, store) = temp_store();
        store
            .config
            .set(AUTHORIZED_KEYS, &format!("legacy-entry\n\n{KEY_ONE}\n"))
            .unwrap();

        let keys = store.load().unwrap();
        assert_eq!(keys.len(), 2);
        assert_eq!(keys.keys().count(), 1);
        assert!(matches!(keys.entries().next(), Some(KeyEntry::Opaque(l)) if l == "legacy-entry"));
    }

    #[test]
    fn duplicate_stored_keys_keep_first() {
        let (_dir, store) = temp_store();
        let renamed = KEY_ONE.replace("user@host", "renamed@host");
        store
            .config
            .set(AUTHORIZED_KEYS, &format!("{KEY_ONE}\n{renamed}"))
            .unwrap();

        let keys = store.load().unwrap();
        assert_eq!(keys.len(), 1);
        assert_eq!(keys.keys().next().unwrap().comment(), Some("user@host"));
    }
}
