//! Shared test utilities for command testing.
//!
//! Provides a pre-wired factory, output capture, and wiremock helpers
//! for testing the flows in isolation.

use std::sync::Arc;

use ghb_core::config::Credentials;
use ghb_core::iostreams::TestOutput;
use ghb_core::prompter::StubPrompter;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::factory::Factory;

/// Token used by every test harness.
pub const TEST_TOKEN: &str = "test-token";

/// A fully-configured test harness with factory, output capture, and mock server.
#[derive(Debug)]
pub struct TestHarness {
    /// The factory configured for testing.
    pub factory: Factory,
    /// Captured stdout/stderr output.
    pub output: TestOutput,
    /// Wiremock mock server for API and template requests.
    pub server: MockServer,
    /// Stub prompter for providing test answers.
    pub prompter: Arc<StubPrompter>,
}

impl TestHarness {
    /// Create a new test harness.
    ///
    /// The factory routes all API and template requests to the mock
    /// server and carries fixed test credentials.
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        let (factory, output) = Factory::test();
        let (factory, prompter) = factory.with_stub_prompter();
        let factory = factory
            .with_http_client(reqwest::Client::new())
            .with_api_url(server.uri())
            .with_template_url(server.uri())
            .with_credentials(Credentials::new(TEST_TOKEN, "dev@example.com"));

        Self {
            factory,
            output,
            server,
            prompter,
        }
    }

    /// Get captured stdout as a string.
    pub fn stdout(&self) -> String {
        self.output.stdout()
    }

    /// Get captured stderr as a string.
    pub fn stderr(&self) -> String {
        self.output.stderr()
    }
}

/// Mount a successful repository-creation mock for `name`, owned by
/// `testuser`.
pub async fn mock_create_repo(server: &MockServer, name: &str) {
    Mock::given(method("POST"))
        .and(path("/user/repos"))
        .and(header("Authorization", format!("token {TEST_TOKEN}")))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "clone_url": format!("https://github.com/testuser/{name}.git"),
            "html_url": format!("https://github.com/testuser/{name}"),
        })))
        .mount(server)
        .await;
}

/// Mount a failing repository-creation mock.
pub async fn mock_create_repo_failure(server: &MockServer, status: u16, body: &str) {
    Mock::given(method("POST"))
        .and(path("/user/repos"))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .expect(1)
        .mount(server)
        .await;
}

/// Mount a gitignore template mock for a language.
pub async fn mock_gitignore_template(server: &MockServer, language: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/{language}.gitignore")))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}
