use crate::core::errors::Result;

/// Port for turning an external identity into raw public key lines.
pub trait KeyImporter: Send + Sync {
    /// Resolve an identity such as `lp:alice` to zero or more key lines.
    fn resolve(&self, identity: &str) -> Result<Vec<String>>;
}

/// One source of public keys, addressed by its provider name.
pub trait IdentityProvider: Send + Sync {
    /// Name used before the colon in an identity, e.g. `gh`.
    fn name(&self) -> &str;

    /// Fetch the raw key listing for `handle`.
    fn fetch(&self, handle: &str) -> Result<Vec<String>>;
}
