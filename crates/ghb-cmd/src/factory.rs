//! Factory for shared command dependencies.
//!
//! Provides lazy initialization of credentials and API clients. Supports
//! test mode with dependency injection for isolated testing.

use std::path::Path;
use std::sync::{Arc, OnceLock};

use secrecy::SecretString;

use ghb_core::config::Credentials;
use ghb_core::iostreams::{IOStreams, TestOutput};
use ghb_core::prompter::{DialoguerPrompter, Prompter, StubPrompter};
use ghb_git::errors::GitError;
use ghb_git::runner::ProcessRunner;

/// Shared factory providing lazily-initialized dependencies to all commands.
///
/// In production mode, dependencies are created from the real system.
/// In test mode, dependencies can be injected for isolated testing.
pub struct Factory {
    /// I/O streams.
    pub io: IOStreams,
    /// Credentials (lazily loaded from `.env`).
    credentials: OnceLock<Credentials>,

    // Test overrides
    http_override: Option<reqwest::Client>,
    api_url_override: Option<String>,
    template_url_override: Option<String>,
    prompter_stub: Option<Arc<StubPrompter>>,
}

impl std::fmt::Debug for Factory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Factory")
            .field("api_url_override", &self.api_url_override)
            .finish_non_exhaustive()
    }
}

impl Factory {
    /// Create a new factory for the real terminal.
    pub fn new() -> Self {
        Self {
            io: IOStreams::system(),
            credentials: OnceLock::new(),
            http_override: None,
            api_url_override: None,
            template_url_override: None,
            prompter_stub: None,
        }
    }

    /// Create a test factory with captured I/O.
    ///
    /// Returns the factory and a `TestOutput` for reading captured
    /// stdout/stderr.
    pub fn test() -> (Self, TestOutput) {
        let (io, output) = IOStreams::test_with_output();

        let factory = Self {
            io,
            credentials: OnceLock::new(),
            http_override: None,
            api_url_override: None,
            template_url_override: None,
            prompter_stub: None,
        };

        (factory, output)
    }

    /// Inject pre-resolved credentials (test mode, or a future flag path).
    #[must_use]
    pub fn with_credentials(self, credentials: Credentials) -> Self {
        let _ = self.credentials.set(credentials);
        self
    }

    /// Set a custom reqwest HTTP client (e.g., backed by wiremock).
    #[must_use]
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http_override = Some(client);
        self
    }

    /// Set an API URL override (wiremock server URI, no trailing slash).
    #[must_use]
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url_override = Some(url.into());
        self
    }

    /// Set a gitignore template URL override for testing.
    #[must_use]
    pub fn with_template_url(mut self, url: impl Into<String>) -> Self {
        self.template_url_override = Some(url.into());
        self
    }

    /// Set a stub prompter and return the shared reference for configuration.
    pub fn with_stub_prompter(mut self) -> (Self, Arc<StubPrompter>) {
        let stub = Arc::new(StubPrompter::default());
        self.prompter_stub = Some(stub.clone());
        (self, stub)
    }

    /// Get the credentials, loading them from `.env` if needed.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` (downcastable, mapped to exit 4) when the
    /// token or email cannot be resolved.
    pub fn credentials(&self) -> anyhow::Result<&Credentials> {
        if let Some(creds) = self.credentials.get() {
            return Ok(creds);
        }
        let creds = Credentials::load()?;
        let _ = self.credentials.set(creds);
        self.credentials
            .get()
            .ok_or_else(|| anyhow::anyhow!("failed to initialize credentials"))
    }

    /// Create a prompter instance.
    ///
    /// In test mode with a stub prompter, returns the stub.
    pub fn prompter(&self) -> Box<dyn Prompter> {
        if let Some(ref stub) = self.prompter_stub {
            return Box::new(StubPrompterWrapper(stub.clone()));
        }
        Box::new(DialoguerPrompter::new())
    }

    /// Build an API client with the loaded credentials.
    ///
    /// In test mode, uses the injected HTTP client and URL overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if credentials cannot be loaded or the HTTP
    /// client cannot be built.
    pub fn api_client(&self) -> anyhow::Result<ghb_api::Client> {
        let http = match self.http_override {
            Some(ref client) => client.clone(),
            None => reqwest::Client::builder().build()?,
        };
        let token = SecretString::from(self.credentials()?.token().to_string());

        let mut client = ghb_api::Client::new(http, token);
        if let Some(ref url) = self.api_url_override {
            client = client.with_api_url(url.clone());
        }
        if let Some(ref url) = self.template_url_override {
            client = client.with_template_url(url.clone());
        }
        Ok(client)
    }

    /// Build a process runner working inside the given directory.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::NotFound`] if git is not in PATH.
    pub fn runner_in(&self, dir: &Path) -> Result<ProcessRunner, GitError> {
        Ok(ProcessRunner::new()?.with_work_dir(dir))
    }
}

impl Default for Factory {
    fn default() -> Self {
        Self::new()
    }
}

/// Wrapper to use `Arc<StubPrompter>` as `Box<dyn Prompter>`.
#[derive(Debug)]
struct StubPrompterWrapper(Arc<StubPrompter>);

impl Prompter for StubPrompterWrapper {
    fn select(
        &self,
        prompt: &str,
        default: Option<usize>,
        options: &[String],
    ) -> anyhow::Result<usize> {
        self.0.select(prompt, default, options)
    }

    fn input(&self, prompt: &str, default: &str) -> anyhow::Result<String> {
        self.0.input(prompt, default)
    }

    fn confirm(&self, prompt: &str, default: bool) -> anyhow::Result<bool> {
        self.0.confirm(prompt, default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_return_injected_credentials() {
        let (factory, _) = Factory::test();
        let factory = factory.with_credentials(Credentials::new("tok", "dev@example.com"));
        let creds = factory.credentials().unwrap();
        assert_eq!(creds.email(), "dev@example.com");
    }

    #[test]
    fn test_should_route_prompts_to_stub() {
        let (factory, _) = Factory::test();
        let (factory, stub) = factory.with_stub_prompter();
        stub.input_answers.lock().unwrap().push("widget".to_string());

        let answer = factory.prompter().input("name?", "fallback").unwrap();
        assert_eq!(answer, "widget");
    }

    #[test]
    fn test_should_build_api_client_with_overrides() {
        let (factory, _) = Factory::test();
        let factory = factory
            .with_credentials(Credentials::new("tok", "dev@example.com"))
            .with_http_client(reqwest::Client::new())
            .with_api_url("http://127.0.0.1:9999")
            .with_template_url("http://127.0.0.1:9999");
        assert!(factory.api_client().is_ok());
    }
}
