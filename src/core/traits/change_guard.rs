use crate::core::errors::Result;
use crate::core::models::outcome::OperationKind;

/// Port for the administrative veto consulted before every mutation.
pub trait ChangeGuard: Send + Sync {
    /// Return `Blocked` with a human-readable reason when `kind` is vetoed.
    fn check_blocked(&self, kind: OperationKind) -> Result<()>;
}
