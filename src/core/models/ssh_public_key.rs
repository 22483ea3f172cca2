/// A validated SSH public key as it appears in an `authorized_keys` line.
///
/// Two keys with the same type and material share a fingerprint no
/// matter what their comments say.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SshPublicKey {
    key_type: String,
    key_material: String,
    comment: Option<String>,
    fingerprint: String,
    line: String,
}

impl SshPublicKey {
    /// Assemble a key from already-validated parts.
    ///
    /// Only the key parser should call this; it is responsible for
    /// checking the material and computing the fingerprint.
    pub(crate) fn new(
        key_type: String,
        key_material: String,
        comment: Option<String>,
        fingerprint: String,
        line: String,
    ) -> Self {
        Self {
            key_type,
            key_material,
            comment,
            fingerprint,
            line,
        }
    }

    /// Algorithm identifier, e.g. `ssh-ed25519`.
    pub fn key_type(&self) -> &str {
        &self.key_type
    }

    /// Trailing label, usually `user@host`.
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// `SHA256:` fingerprint of the decoded key blob.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    /// The line this key was parsed from, trimmed.
    pub fn line(&self) -> &str {
        &self.line
    }
}

/// Canonical single-space form: `type material [comment]`.
impl std::fmt::Display for SshPublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.key_type, self.key_material)?;
        if let Some(comment) = &self.comment {
            write!(f, " {comment}")?;
        }
        Ok(())
    }
}
