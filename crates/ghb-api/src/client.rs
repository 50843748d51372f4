//! GitHub API client.
//!
//! Covers the two remote interactions the bootstrap needs: creating a
//! private repository and downloading a `.gitignore` template.

use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};

use crate::errors::ApiError;

/// Base URL of the GitHub REST API.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Base URL of the community `.gitignore` template collection.
pub const DEFAULT_TEMPLATE_URL: &str =
    "https://raw.githubusercontent.com/github/gitignore/main";

const USER_AGENT: &str = concat!("ghb/", env!("CARGO_PKG_VERSION"));

/// Response body of a successful repository creation.
#[derive(Debug, Clone, serde::Deserialize)]
#[non_exhaustive]
pub struct CreatedRepo {
    /// HTTPS URL to clone or push to.
    pub clone_url: String,
    /// Web URL of the repository.
    pub html_url: String,
}

/// GitHub API client wrapping reqwest with auth and error handling.
///
/// The token is stored as [`SecretString`] to prevent accidental logging
/// or exposure through `Debug` output.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    token: SecretString,
    /// Optional base URL override for testing (e.g., `"http://127.0.0.1:PORT"`).
    api_url_override: Option<String>,
    /// Optional template base URL override for testing.
    template_url_override: Option<String>,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("token", &"[REDACTED]")
            .field("api_url_override", &self.api_url_override)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Create a new API client.
    pub fn new(http: reqwest::Client, token: SecretString) -> Self {
        Self {
            http,
            token,
            api_url_override: None,
            template_url_override: None,
        }
    }

    /// Set a REST base URL override for testing, without a trailing slash.
    #[must_use]
    pub fn with_api_url(mut self, url: String) -> Self {
        self.api_url_override = Some(url);
        self
    }

    /// Set a template base URL override for testing, without a trailing slash.
    #[must_use]
    pub fn with_template_url(mut self, url: String) -> Self {
        self.template_url_override = Some(url);
        self
    }

    fn api_url(&self) -> &str {
        self.api_url_override.as_deref().unwrap_or(DEFAULT_API_URL)
    }

    fn template_url(&self) -> &str {
        self.template_url_override
            .as_deref()
            .unwrap_or(DEFAULT_TEMPLATE_URL)
    }

    /// Create a private repository for the authenticated user.
    ///
    /// Success is exactly HTTP 201. Any other status is fatal and never
    /// retried: repository creation is not idempotent, and a retry after
    /// an ambiguous response could collide with a half-created repo.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] for any non-201 response, carrying the
    /// response body as the message.
    pub async fn create_repository(&self, name: &str) -> Result<CreatedRepo, ApiError> {
        let url = format!("{}/user/repos", self.api_url());
        tracing::info!(name, "creating remote repository");

        let resp = self
            .http
            .post(&url)
            .header("Authorization", format!("token {}", self.token.expose_secret()))
            .header("Accept", "application/vnd.github.v3+json")
            .header("User-Agent", USER_AGENT)
            .json(&serde_json::json!({ "name": name, "private": true }))
            .send()
            .await?;

        let status = resp.status();
        if status != StatusCode::CREATED {
            let message = resp.text().await.unwrap_or_default();
            return Err(ApiError::Http {
                status: status.as_u16(),
                message,
            });
        }

        let repo: CreatedRepo = resp.json().await?;
        tracing::info!(url = %repo.html_url, "repository created");
        Ok(repo)
    }

    /// Download a `.gitignore` template by language name (e.g. `Python`).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] for any non-success response.
    pub async fn fetch_gitignore_template(&self, language: &str) -> Result<String, ApiError> {
        let url = format!("{}/{language}.gitignore", self.template_url());
        tracing::debug!(language, "fetching gitignore template");

        let resp = self
            .http
            .get(&url)
            .header("User-Agent", USER_AGENT)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(ApiError::Http {
                status: status.as_u16(),
                message,
            });
        }

        Ok(resp.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> Client {
        Client::new(reqwest::Client::new(), SecretString::from("tok123"))
            .with_api_url(server.uri())
            .with_template_url(server.uri())
    }

    #[tokio::test]
    async fn test_should_create_private_repository_on_201() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/user/repos"))
            .and(header("Authorization", "token tok123"))
            .and(header("Accept", "application/vnd.github.v3+json"))
            .and(body_json(serde_json::json!({
                "name": "widget",
                "private": true,
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "clone_url": "https://github.com/alice/widget.git",
                "html_url": "https://github.com/alice/widget",
            })))
            .expect(1)
            .mount(&server)
            .await;

        let repo = client(&server).create_repository("widget").await.unwrap();
        assert_eq!(repo.clone_url, "https://github.com/alice/widget.git");
        assert_eq!(repo.html_url, "https://github.com/alice/widget");
    }

    #[tokio::test]
    async fn test_should_fail_without_retry_on_non_201() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/user/repos"))
            .respond_with(
                ResponseTemplate::new(422).set_body_string("name already exists"),
            )
            .expect(1)
            .mount(&server)
            .await;

        let err = client(&server).create_repository("widget").await.unwrap_err();
        match err {
            ApiError::Http { status, message } => {
                assert_eq!(status, 422);
                assert_eq!(message, "name already exists");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_should_treat_200_as_failure_for_creation() {
        // Only 201 proves the repository was created by this call.
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/user/repos"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .expect(1)
            .mount(&server)
            .await;

        let err = client(&server).create_repository("widget").await.unwrap_err();
        assert!(matches!(err, ApiError::Http { status: 200, .. }));
    }

    #[tokio::test]
    async fn test_should_fetch_gitignore_template() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/Python.gitignore"))
            .respond_with(ResponseTemplate::new(200).set_body_string("__pycache__/\n*.pyc\n"))
            .expect(1)
            .mount(&server)
            .await;

        let body = client(&server)
            .fetch_gitignore_template("Python")
            .await
            .unwrap();
        assert_eq!(body, "__pycache__/\n*.pyc\n");
    }

    #[tokio::test]
    async fn test_should_surface_missing_template_as_http_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/Cobol.gitignore"))
            .respond_with(ResponseTemplate::new(404).set_body_string("404: Not Found"))
            .expect(1)
            .mount(&server)
            .await;

        let err = client(&server)
            .fetch_gitignore_template("Cobol")
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_should_redact_token_in_debug() {
        let client = Client::new(reqwest::Client::new(), SecretString::from("tok123"));
        let debug = format!("{client:?}");
        assert!(!debug.contains("tok123"));
        assert!(debug.contains("[REDACTED]"));
    }
}
