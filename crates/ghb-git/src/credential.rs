//! Repository URLs with and without embedded credentials.
//!
//! A [`RemoteUrl`] is the bare, loggable form of a repository address.
//! A [`CredentialUrl`] carries the access token between scheme and host
//! for a single git invocation; its `Display` and `Debug` are always the
//! masked form, so a credentialed URL can never reach a log verbatim.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::errors::GitError;

/// Replacement text for a masked credential.
pub const TOKEN_MASK: &str = "[TOKEN HIDDEN]";

/// Matches `scheme://credential@` so captured process output can be
/// scrubbed before logging (git echoes remote URLs in its messages).
static CREDENTIAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<scheme>[A-Za-z][A-Za-z0-9+.-]*)://[^/@\s]+@")
        .expect("CREDENTIAL_RE is a valid regex")
});

/// Replace any `scheme://credential@` occurrence with the masked form.
pub fn mask_credentials(text: &str) -> String {
    CREDENTIAL_RE
        .replace_all(text, format!("${{scheme}}://{TOKEN_MASK}@"))
        .into_owned()
}

/// A bare repository URL, safe to display and log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteUrl {
    url: Url,
}

impl RemoteUrl {
    /// Parse and normalize a repository URL.
    ///
    /// The path is normalized to end in `.git`, matching what GitHub
    /// accepts for both clone and push.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::InvalidRemoteUrl`] for strings that are not
    /// absolute http(s) URLs with a host.
    pub fn parse(input: &str) -> Result<Self, GitError> {
        let trimmed = input.trim();
        let mut url =
            Url::parse(trimmed).map_err(|_| GitError::InvalidRemoteUrl(trimmed.to_string()))?;

        if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
            return Err(GitError::InvalidRemoteUrl(trimmed.to_string()));
        }

        if !url.path().ends_with(".git") {
            let path = format!("{}.git", url.path().trim_end_matches('/'));
            url.set_path(&path);
        }

        Ok(Self { url })
    }

    /// The repository name, derived from the last path segment.
    pub fn repo_name(&self) -> &str {
        self.url
            .path()
            .trim_end_matches(".git")
            .rsplit('/')
            .next()
            .unwrap_or_default()
    }

    /// Build the credentialed form with the token between scheme and host.
    ///
    /// Construct this immediately before handing it to a git command; it
    /// is not meant to be stored.
    pub fn with_token(&self, token: &str) -> CredentialUrl {
        let scheme = self.url.scheme();
        let rest = self
            .url
            .as_str()
            .strip_prefix(scheme)
            .and_then(|s| s.strip_prefix("://"))
            .unwrap_or_default();

        CredentialUrl {
            credentialed: format!("{scheme}://{token}@{rest}"),
            masked: format!("{scheme}://{TOKEN_MASK}@{rest}"),
        }
    }

    /// The bare URL as a string.
    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }
}

impl std::fmt::Display for RemoteUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.url.as_str())
    }
}

/// A repository URL with the access token embedded.
///
/// `Display` and `Debug` always produce the masked form; the real value
/// is only reachable through [`CredentialUrl::expose`].
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialUrl {
    credentialed: String,
    masked: String,
}

impl CredentialUrl {
    /// The real credentialed URL, for handing to a subprocess argv only.
    pub fn expose(&self) -> &str {
        &self.credentialed
    }

    /// The masked rendering used in logs and error messages.
    pub fn masked(&self) -> &str {
        &self.masked
    }
}

impl std::fmt::Display for CredentialUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.masked)
    }
}

impl std::fmt::Debug for CredentialUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("CredentialUrl").field(&self.masked).finish()
    }
}
