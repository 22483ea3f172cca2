use std::path::PathBuf;

use crate::core::errors::{AuthKeysError, Result};
use crate::core::traits::importer::IdentityProvider;

/// Reads key lines from a local file: `file:/home/alice/.ssh/id_ed25519.pub`.
pub struct FileKeyProvider;

impl IdentityProvider for FileKeyProvider {
    fn name(&self) -> &str {
        "file"
    }

    fn fetch(&self, handle: &str) -> Result<Vec<String>> {
        let path = PathBuf::from(handle);
        let content =
            std::fs::read_to_string(&path).map_err(|e| AuthKeysError::ImportLookupFailed {
                reason: format!("cannot read {}: {e}", path.display()),
            })?;
        Ok(content.lines().map(str::to_string).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_lines_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keys.pub");
        std::fs::write(&path, "ssh-ed25519 AAAA one\nssh-ed25519 BBBB two\n").unwrap();

        let lines = FileKeyProvider.fetch(path.to_str().unwrap()).unwrap();
        assert_eq!(lines, vec!["ssh-ed25519 AAAA one", "ssh-ed25519 BBBB two"]);
    }

    #[test]
    fn missing_file_fails_lookup() {
        let err = FileKeyProvider.fetch("/nonexistent/keys.pub").unwrap_err();
        assert!(matches!(err, AuthKeysError::ImportLookupFailed { .. }));
        assert!(err.to_string().contains("cannot read /nonexistent/keys.pub"));
    }
}
