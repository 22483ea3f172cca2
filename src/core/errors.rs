/// All domain errors for authkeys.
///
/// Per-entry failures inside a batch are reported through
/// [`crate::core::models::outcome::EntryError`] instead; the variants
/// here either describe why a single key or identity was rejected
/// (and get wrapped into an entry error) or abort a whole operation.
#[derive(Debug, thiserror::Error)]
pub enum AuthKeysError {
    #[error("invalid ssh public key: {reason}")]
    InvalidKeyFormat { reason: String },

    #[error(
        "invalid identity \"{identity}\": expected <provider>:<handle>, \
         e.g. lp:alice or gh:alice"
    )]
    InvalidIdentity { identity: String },

    #[error(
        "no identity provider named \"{provider}\"\n\n  \
         Built-in providers: lp (Launchpad), gh (GitHub), file (local file)."
    )]
    UnknownProvider { provider: String },

    #[error("{reason}")]
    ImportLookupFailed { reason: String },

    #[error(
        "The operation has been blocked: {reason}\n\n  \
         To allow changes again, run: authkeys unblock {block}"
    )]
    Blocked { block: String, reason: String },

    #[error(
        "Cannot save authorized keys: {reason}\n\n  \
         No changes were written. Fix the problem and run the command again."
    )]
    PersistFailed { reason: String },

    #[error("Invalid configuration: {detail}")]
    InvalidConfig { detail: String },

    #[error("Audit log error: {detail}")]
    AuditError { detail: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AuthKeysError>;
