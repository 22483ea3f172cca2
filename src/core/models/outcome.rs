/// The mutating operations a change guard can veto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Add,
    Delete,
    Import,
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            OperationKind::Add => "add",
            OperationKind::Delete => "delete",
            OperationKind::Import => "import",
        };
        f.write_str(name)
    }
}

/// Why a single entry of a batch was rejected. Never aborts the batch.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EntryError {
    #[error("cannot add key \"{entry}\": {reason}")]
    InvalidKeyFormat { entry: String, reason: String },

    #[error("cannot delete key id \"{entry}\": not found")]
    NotFound { entry: String },

    #[error("cannot import key id \"{entry}\": {reason}")]
    ImportLookupFailed { entry: String, reason: String },
}

/// What happened to one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryStatus {
    /// The key was appended; carries its fingerprint.
    Added(String),
    /// The key was already present.
    AlreadyPresent(String),
    /// An entry was removed; carries its fingerprint, or its verbatim
    /// text for an unparsable entry.
    Removed(String),
    Rejected(EntryError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryOutcome {
    /// The raw entry, identifier or identity this outcome belongs to.
    pub entry: String,
    pub status: EntryStatus,
}

/// Aggregate result of a multi-entry operation.
///
/// Never all-or-nothing: valid entries are applied even when others in
/// the same call were rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReport {
    pub kind: OperationKind,
    pub outcomes: Vec<EntryOutcome>,
    pub warnings: Vec<String>,
}

impl BatchReport {
    pub fn new(kind: OperationKind) -> Self {
        Self {
            kind,
            outcomes: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn record(&mut self, entry: &str, status: EntryStatus) {
        self.outcomes.push(EntryOutcome {
            entry: entry.to_string(),
            status,
        });
    }

    pub fn reject(&mut self, entry: &str, error: EntryError) {
        self.record(entry, EntryStatus::Rejected(error));
    }

    /// Number of entries that changed the key set.
    pub fn applied(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, EntryStatus::Added(_) | EntryStatus::Removed(_)))
            .count()
    }

    pub fn errors(&self) -> impl Iterator<Item = &EntryError> {
        self.outcomes.iter().filter_map(|o| match &o.status {
            EntryStatus::Rejected(e) => Some(e),
            _ => None,
        })
    }

    /// Fingerprints (or verbatim lines) of every entry that changed the set.
    pub fn changed_ids(&self) -> Vec<String> {
        self.outcomes
            .iter()
            .filter_map(|o| match &o.status {
                EntryStatus::Added(id) | EntryStatus::Removed(id) => Some(id.clone()),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_error_messages() {
        let add = EntryError::InvalidKeyFormat {
            entry: "invalid-key".into(),
            reason: "bad".into(),
        };
        let delete = EntryError::NotFound {
            entry: "invalid-key".into(),
        };
        let import = EntryError::ImportLookupFailed {
            entry: "invalid-key".into(),
            reason: "no keys found".into(),
        };

        assert_eq!(add.to_string(), "cannot add key \"invalid-key\": bad");
        assert_eq!(delete.to_string(), "cannot delete key id \"invalid-key\": not found");
        assert_eq!(
            import.to_string(),
            "cannot import key id \"invalid-key\": no keys found"
        );
    }

    #[test]
    fn applied_counts_only_changes() {
        let mut report = BatchReport::new(OperationKind::Add);
        report.record("a", EntryStatus::Added("SHA256:a".into()));
        report.record("b", EntryStatus::AlreadyPresent("SHA256:b".into()));
        report.reject(
            "c",
            EntryError::InvalidKeyFormat {
                entry: "c".into(),
                reason: "bad".into(),
            },
        );

        assert_eq!(report.applied(), 1);
        assert_eq!(report.errors().count(), 1);
        assert_eq!(report.changed_ids(), vec!["SHA256:a".to_string()]);
    }
}
