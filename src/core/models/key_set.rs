use crate::core::models::ssh_public_key::SshPublicKey;

/// One line of the stored key list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyEntry {
    /// A line that parsed as a valid public key.
    Parsed(SshPublicKey),
    /// A stored line that no longer passes validation. Kept verbatim so
    /// older entries survive a rewrite of the list.
    Opaque(String),
}

impl KeyEntry {
    /// Text written back to the store for this entry.
    pub fn line(&self) -> &str {
        match self {
            KeyEntry::Parsed(key) => key.line(),
            KeyEntry::Opaque(line) => line,
        }
    }

    pub fn fingerprint(&self) -> Option<&str> {
        match self {
            KeyEntry::Parsed(key) => Some(key.fingerprint()),
            KeyEntry::Opaque(_) => None,
        }
    }
}

/// Ordered list of authorized keys, unique by fingerprint.
///
/// Insertion order is preserved. Opaque entries carry no fingerprint and
/// are never considered duplicates of anything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeySet {
    entries: Vec<KeyEntry>,
}

impl KeySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = &KeyEntry> {
        self.entries.iter()
    }

    /// Only the entries that parsed as keys.
    pub fn keys(&self) -> impl Iterator<Item = &SshPublicKey> {
        self.entries.iter().filter_map(|e| match e {
            KeyEntry::Parsed(key) => Some(key),
            KeyEntry::Opaque(_) => None,
        })
    }

    pub fn contains(&self, fingerprint: &str) -> bool {
        self.keys().any(|k| k.fingerprint() == fingerprint)
    }

    /// Append a key. Returns `false` and leaves the set untouched when a
    /// key with the same fingerprint is already present.
    pub fn insert(&mut self, key: SshPublicKey) -> bool {
        if self.contains(key.fingerprint()) {
            return false;
        }
        self.entries.push(KeyEntry::Parsed(key));
        true
    }

    /// Append any entry, applying the same uniqueness rule as [`insert`].
    ///
    /// [`insert`]: KeySet::insert
    pub fn push(&mut self, entry: KeyEntry) -> bool {
        match entry {
            KeyEntry::Parsed(key) => self.insert(key),
            KeyEntry::Opaque(line) => {
                self.entries.push(KeyEntry::Opaque(line));
                true
            }
        }
    }

    /// Remove every entry matching `predicate`, keeping the order of the
    /// rest. Returns the removed entries.
    pub fn remove_where<F>(&mut self, mut predicate: F) -> Vec<KeyEntry>
    where
        F: FnMut(&KeyEntry) -> bool,
    {
        let (removed, kept): (Vec<_>, Vec<_>) =
            self.entries.drain(..).partition(|e| predicate(e));
        self.entries = kept;
        removed
    }

    /// Newline-joined text of every entry, without a trailing newline.
    pub fn to_text(&self) -> String {
        self.entries
            .iter()
            .map(KeyEntry::line)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
