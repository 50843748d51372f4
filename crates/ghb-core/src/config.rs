//! Credential configuration.
//!
//! Credentials come from a local `.env` key=value file, with the process
//! environment as a fallback for keys the file does not set. They are
//! loaded once at startup and passed explicitly into each component;
//! nothing reads the environment mid-flow.

use std::collections::HashMap;
use std::path::Path;

use secrecy::{ExposeSecret, SecretString};

use crate::errors::ConfigError;

/// Environment key holding the GitHub personal access token.
pub const TOKEN_KEY: &str = "GITHUB_TOKEN";

/// Environment key holding the committer email.
pub const EMAIL_KEY: &str = "GITHUB_EMAIL";

/// Default configuration file name, relative to the working directory.
pub const ENV_FILE: &str = ".env";

/// Access token and committer identity for GitHub operations.
///
/// The token is held as a [`SecretString`] so it cannot leak through
/// `Debug` output; callers that need the raw value go through
/// [`Credentials::token`] and are responsible for masking it in logs.
#[derive(Clone)]
pub struct Credentials {
    token: SecretString,
    email: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &"[REDACTED]")
            .field("email", &self.email)
            .finish()
    }
}

impl Credentials {
    /// Create credentials from an already-resolved token and email.
    pub fn new(token: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            token: SecretString::from(token.into()),
            email: email.into(),
        }
    }

    /// Load credentials from `.env` in the current directory, falling back
    /// to the process environment for missing keys.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] if either `GITHUB_TOKEN` or
    /// `GITHUB_EMAIL` cannot be resolved.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Path::new(ENV_FILE))
    }

    /// Load credentials from a specific key=value file.
    ///
    /// A missing file is not an error by itself; the process environment
    /// may still supply both keys.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed,
    /// or if either required key is missing after the environment fallback.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let mut values = HashMap::new();

        if path.exists() {
            let contents = std::fs::read_to_string(path).map_err(|source| {
                ConfigError::ReadFile {
                    path: path.display().to_string(),
                    source,
                }
            })?;
            values = parse_env_file(&contents)?;
            tracing::debug!(path = %path.display(), keys = values.len(), "loaded credential file");
        }

        let token = resolve(&values, TOKEN_KEY).ok_or(ConfigError::Missing(TOKEN_KEY))?;
        let email = resolve(&values, EMAIL_KEY).ok_or(ConfigError::Missing(EMAIL_KEY))?;

        Ok(Self::new(token, email))
    }

    /// Get the raw token value.
    ///
    /// Callers must be careful not to log or display the returned value.
    pub fn token(&self) -> &str {
        self.token.expose_secret()
    }

    /// Get the committer email.
    pub fn email(&self) -> &str {
        &self.email
    }
}

/// Look up a key in the parsed file, falling back to the process environment.
fn resolve(values: &HashMap<String, String>, key: &str) -> Option<String> {
    values
        .get(key)
        .cloned()
        .or_else(|| std::env::var(key).ok())
        .filter(|v| !v.is_empty())
}

/// Parse a key=value file: one pair per line, `#` comments and blank lines
/// skipped, optional single or double quotes around the value.
fn parse_env_file(contents: &str) -> Result<HashMap<String, String>, ConfigError> {
    let mut values = HashMap::new();

    for (idx, raw) in contents.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            return Err(ConfigError::Parse(format!(
                "line {}: no '=' separator: {line}",
                idx + 1,
            )));
        };

        let key = key.trim().trim_start_matches("export ").trim();
        let value = unquote(value.trim());
        values.insert(key.to_string(), value.to_string());
    }

    Ok(values)
}

/// Strip one matching pair of surrounding quotes, if present.
fn unquote(value: &str) -> &str {
    if value.len() >= 2 {
        let bytes = value.as_bytes();
        if (bytes[0] == b'"' && bytes[value.len() - 1] == b'"')
            || (bytes[0] == b'\'' && bytes[value.len() - 1] == b'\'')
        {
            return &value[1..value.len() - 1];
        }
    }
    value
}
