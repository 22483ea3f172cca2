use crate::core::errors::Result;
use crate::core::models::key_set::KeySet;

/// Port for loading and persisting the whole authorized key list.
///
/// The list is always read and written as a unit; implementations do not
/// retry, and a rejected write surfaces as `PersistFailed`.
pub trait KeySetStore: Send + Sync {
    fn load(&self) -> Result<KeySet>;

    fn save(&self, keys: &KeySet) -> Result<()>;
}
