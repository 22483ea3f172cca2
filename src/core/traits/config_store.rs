use crate::core::errors::Result;

/// Name of the environment setting holding the authorized key list.
pub const AUTHORIZED_KEYS: &str = "authorized-keys";

/// Port for the environment configuration: a set of named string values.
pub trait ConfigStore: Send + Sync {
    /// Read a value. A missing setting reads as the empty string.
    fn get(&self, key: &str) -> Result<String>;

    /// Replace a value in a single write.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}
