use crate::core::errors::Result;
use crate::core::models::key_set::{KeyEntry, KeySet};
use crate::core::models::outcome::{BatchReport, EntryError, EntryStatus, OperationKind};
use crate::core::services::key_parser::KeyParser;
use crate::core::traits::change_guard::ChangeGuard;
use crate::core::traits::importer::KeyImporter;
use crate::core::traits::key_store::KeySetStore;

/// Applies add, delete and import requests to the authorized key list.
///
/// Every mutating call runs one pass: guard check, fresh load, process
/// each entry, then a single save if anything changed. Guard denials and
/// failed saves abort the call; everything else is reported per entry.
pub struct ReconcileEngine<S: KeySetStore, G: ChangeGuard> {
    pub store: S,
    pub guard: G,
}

impl<S: KeySetStore, G: ChangeGuard> ReconcileEngine<S, G> {
    /// Current key list. Never consults the guard.
    pub fn list(&self) -> Result<KeySet> {
        self.store.load()
    }

    /// Add raw key lines, skipping keys that are already present.
    pub fn add(&self, raw_entries: &[String]) -> Result<BatchReport> {
        self.guard.check_blocked(OperationKind::Add)?;
        let mut keys = self.store.load()?;
        let mut report = BatchReport::new(OperationKind::Add);

        for raw in raw_entries {
            match merge_line(&mut keys, raw) {
                Ok(status) => report.record(raw, status),
                Err(reason) => report.reject(
                    raw,
                    EntryError::InvalidKeyFormat {
                        entry: raw.clone(),
                        reason,
                    },
                ),
            }
        }

        self.commit(&keys, &report)?;
        Ok(report)
    }

    /// Remove keys by fingerprint, full key text or comment.
    pub fn delete(&self, identifiers: &[String]) -> Result<BatchReport> {
        self.guard.check_blocked(OperationKind::Delete)?;
        let mut keys = self.store.load()?;
        let mut report = BatchReport::new(OperationKind::Delete);

        for identifier in identifiers {
            let removed = remove_matching(&mut keys, identifier);
            if removed.is_empty() {
                report.reject(
                    identifier,
                    EntryError::NotFound {
                        entry: identifier.clone(),
                    },
                );
                continue;
            }
            for entry in removed {
                let id = entry.fingerprint().unwrap_or(entry.line()).to_string();
                report.record(identifier, EntryStatus::Removed(id));
            }
        }

        if report.applied() > 0 && keys.is_empty() {
            tracing::debug!("delete leaves the environment without authorized keys");
            report.warnings.push(
                "no authorized keys remain; machines will refuse ssh logins until a key is added"
                    .to_string(),
            );
        }

        self.commit(&keys, &report)?;
        Ok(report)
    }

    /// Resolve each identity through `importer` and merge the keys it
    /// returns, exactly as `add` would.
    pub fn import<I: KeyImporter + ?Sized>(
        &self,
        importer: &I,
        identities: &[String],
    ) -> Result<BatchReport> {
        self.guard.check_blocked(OperationKind::Import)?;
        let mut keys = self.store.load()?;
        let mut report = BatchReport::new(OperationKind::Import);

        for identity in identities {
            let lines = match importer.resolve(identity) {
                Ok(lines) => lines,
                Err(e) => {
                    tracing::debug!(%identity, error = %e, "identity lookup failed");
                    report.reject(
                        identity,
                        EntryError::ImportLookupFailed {
                            entry: identity.clone(),
                            reason: e.to_string(),
                        },
                    );
                    continue;
                }
            };

            for line in &lines {
                match merge_line(&mut keys, line) {
                    Ok(status) => report.record(identity, status),
                    Err(reason) => report.reject(
                        identity,
                        EntryError::ImportLookupFailed {
                            entry: identity.clone(),
                            reason,
                        },
                    ),
                }
            }
        }

        self.commit(&keys, &report)?;
        Ok(report)
    }

    /// Save once if the report recorded any change.
    fn commit(&self, keys: &KeySet, report: &BatchReport) -> Result<()> {
        if report.applied() == 0 {
            tracing::debug!(kind = %report.kind, "nothing changed, skipping save");
            return Ok(());
        }
        tracing::debug!(kind = %report.kind, total = keys.len(), "saving key set");
        self.store.save(keys)
    }
}

/// Parse `raw` and append it unless its fingerprint is already present.
fn merge_line(keys: &mut KeySet, raw: &str) -> std::result::Result<EntryStatus, String> {
    let key = KeyParser::parse(raw).map_err(|e| e.to_string())?;
    let fingerprint = key.fingerprint().to_string();
    let key_type = key.key_type().to_string();
    if keys.insert(key) {
        Ok(EntryStatus::Added(fingerprint))
    } else {
        tracing::debug!(key_type = %key_type, %fingerprint, "key already present");
        Ok(EntryStatus::AlreadyPresent(fingerprint))
    }
}

/// Remove what `identifier` names: a fingerprint, full key text, the
/// verbatim text of an unparsable entry, or failing those, a comment.
fn remove_matching(keys: &mut KeySet, identifier: &str) -> Vec<KeyEntry> {
    let wanted = identifier.trim();

    let fingerprint = if KeyParser::looks_like_key(wanted) {
        KeyParser::parse(wanted)
            .map(|k| k.fingerprint().to_string())
            .unwrap_or_else(|_| wanted.to_string())
    } else {
        wanted.to_string()
    };

    let removed = keys.remove_where(|e| match e {
        KeyEntry::Parsed(key) => key.fingerprint() == fingerprint,
        KeyEntry::Opaque(line) => line == wanted,
    });
    if !removed.is_empty() {
        return removed;
    }

    keys.remove_where(|e| match e {
        KeyEntry::Parsed(key) => key.comment() == Some(wanted),
        KeyEntry::Opaque(_) => false,
    })
}
