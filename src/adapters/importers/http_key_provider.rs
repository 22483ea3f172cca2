use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;

use crate::core::errors::{AuthKeysError, Result};
use crate::core::traits::importer::IdentityProvider;

pub const LAUNCHPAD_URL: &str = "https://launchpad.net/~{handle}/+sshkeys";
pub const GITHUB_URL: &str = "https://github.com/{handle}.keys";

/// Default timeout for a single lookup.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Account names accepted by the HTTP providers. Anything else could
/// change the meaning of the URL it is substituted into.
static HANDLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]{0,63}$").expect("handle pattern is valid")
});

/// Fetches a plain-text key listing from a URL template such as
/// `https://github.com/{handle}.keys`.
pub struct HttpKeyProvider {
    name: String,
    url_template: String,
    timeout: Duration,
}

impl HttpKeyProvider {
    pub fn new(name: impl Into<String>, url_template: impl Into<String>, timeout: Duration) -> Self {
        Self {
            name: name.into(),
            url_template: url_template.into(),
            timeout,
        }
    }

    pub fn launchpad(timeout: Duration) -> Self {
        Self::new("lp", LAUNCHPAD_URL, timeout)
    }

    pub fn github(timeout: Duration) -> Self {
        Self::new("gh", GITHUB_URL, timeout)
    }

    /// Build the lookup URL, rejecting handles that are not plain
    /// account names.
    pub fn url_for(&self, handle: &str) -> Result<String> {
        if !HANDLE_RE.is_match(handle) {
            return Err(AuthKeysError::ImportLookupFailed {
                reason: format!("\"{handle}\" is not a valid {} account name", self.name),
            });
        }
        Ok(self.url_template.replace("{handle}", handle))
    }

    fn build_client(&self) -> Result<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(format!("authkeys/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AuthKeysError::ImportLookupFailed {
                reason: format!("Failed to create HTTP client: {e}"),
            })
    }
}

impl IdentityProvider for HttpKeyProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch(&self, handle: &str) -> Result<Vec<String>> {
        let url = self.url_for(handle)?;

        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| AuthKeysError::ImportLookupFailed {
                reason: format!("Failed to create async runtime: {e}"),
            })?;

        rt.block_on(async {
            let client = self.build_client()?;
            tracing::debug!(%url, "fetching public keys");

            let resp = client
                .get(&url)
                .send()
                .await
                .map_err(|e| AuthKeysError::ImportLookupFailed {
                    reason: format!("request to {url} failed: {e}"),
                })?;

            let status = resp.status();
            if !status.is_success() {
                return Err(AuthKeysError::ImportLookupFailed {
                    reason: format!("{url} returned HTTP {status}"),
                });
            }

            let body = resp
                .text()
                .await
                .map_err(|e| AuthKeysError::ImportLookupFailed {
                    reason: format!("cannot read response from {url}: {e}"),
                })?;

            Ok(body.lines().map(str::to_string).collect())
        })
    }
}
