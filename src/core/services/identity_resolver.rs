use crate::core::errors::{AuthKeysError, Result};
use crate::core::traits::importer::{IdentityProvider, KeyImporter};

/// Dispatches `<provider>:<handle>` identities to registered providers.
///
/// Unprefixed identities go to the default provider when one is set and
/// are rejected otherwise.
pub struct IdentityResolver {
    providers: Vec<Box<dyn IdentityProvider>>,
    default_provider: Option<String>,
}

impl IdentityResolver {
    pub fn new(default_provider: Option<String>) -> Self {
        Self {
            providers: Vec::new(),
            default_provider,
        }
    }

    /// Register a provider. A later provider with the same name replaces
    /// the earlier one.
    pub fn register(mut self, provider: Box<dyn IdentityProvider>) -> Self {
        self.providers.retain(|p| p.name() != provider.name());
        self.providers.push(provider);
        self
    }

    fn split<'a>(&'a self, identity: &'a str) -> Result<(&'a str, &'a str)> {
        let identity = identity.trim();
        let (provider, handle) = match identity.split_once(':') {
            Some((provider, handle)) => (provider, handle),
            None => match &self.default_provider {
                Some(default) => (default.as_str(), identity),
                None => {
                    return Err(AuthKeysError::InvalidIdentity {
                        identity: identity.to_string(),
                    });
                }
            },
        };

        if provider.is_empty() || handle.is_empty() {
            return Err(AuthKeysError::InvalidIdentity {
                identity: identity.to_string(),
            });
        }
        Ok((provider, handle))
    }
}

impl KeyImporter for IdentityResolver {
    fn resolve(&self, identity: &str) -> Result<Vec<String>> {
        let (name, handle) = self.split(identity)?;
        let provider = self
            .providers
            .iter()
            .find(|p| p.name() == name)
            .ok_or_else(|| AuthKeysError::UnknownProvider {
                provider: name.to_string(),
            })?;

        tracing::debug!(provider = name, handle, "resolving identity");
        let lines: Vec<String> = provider
            .fetch(handle)?
            .into_iter()
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty() && !l.starts_with('#'))
            .collect();

        if lines.is_empty() {
            return Err(AuthKeysError::ImportLookupFailed {
                reason: "no keys found".into(),
            });
        }
        Ok(lines)
    }
}
