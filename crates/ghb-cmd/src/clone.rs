//! `ghb clone` command: clone a remote repository into the current
//! directory, merging with whatever already lives there.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;

use ghb_core::ios_println;
use ghb_git::credential::RemoteUrl;
use ghb_git::runner::CommandRunner;
use ghb_git::sync::Synchronizer;

use crate::factory::Factory;

/// Clone an existing GitHub repository over the current directory.
#[derive(Debug, Args)]
pub struct CloneArgs {
    /// Repository URL (prompted for when omitted).
    #[arg(value_name = "URL")]
    url: Option<String>,
}

impl CloneArgs {
    /// Run the clone command against the current directory.
    pub async fn run(&self, factory: &Factory) -> Result<()> {
        // Fail on missing credentials before anything else runs.
        factory.credentials()?;
        let dir = std::env::current_dir().context("cannot determine working directory")?;
        let runner = factory.runner_in(&dir)?;
        self.run_in(factory, runner, &dir).await
    }

    /// Run the clone flow into a specific directory with an explicit runner.
    pub async fn run_in<R: CommandRunner>(
        &self,
        factory: &Factory,
        runner: R,
        dir: &Path,
    ) -> Result<()> {
        let creds = factory.credentials()?.clone();
        let cs = factory.io.color_scheme();

        let url = match self.url {
            Some(ref url) => url.clone(),
            None => factory.prompter().input("Repository URL", "")?,
        };
        let remote = RemoteUrl::parse(&url)?;

        let sync = Synchronizer::new(runner);
        sync.clone(&remote, &creds, dir).await?;

        ios_println!(
            factory.io,
            "{} cloned {} into {}",
            cs.success_icon(),
            remote.repo_name(),
            dir.display()
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::TestHarness;
    use ghb_git::runner::StubRunner;
    use pretty_assertions::assert_eq;

    fn args(url: Option<&str>) -> CloneArgs {
        CloneArgs {
            url: url.map(ToString::to_string),
        }
    }

    #[tokio::test]
    async fn test_should_clone_with_masked_url() {
        let harness = TestHarness::new().await;
        let dir = tempfile::tempdir().unwrap();
        let runner = StubRunner::new();

        args(Some("https://github.com/testuser/widget"))
            .run_in(&harness.factory, &runner, dir.path())
            .await
            .unwrap();

        let calls = runner.calls();
        assert!(
            calls[0].starts_with("git clone https://[TOKEN HIDDEN]@github.com/testuser/widget.git"),
        );
        for call in &calls {
            assert!(!call.contains("test-token"), "token leaked in: {call}");
        }
        assert!(harness.stdout().contains("cloned widget"));
    }

    #[tokio::test]
    async fn test_should_prompt_for_url_when_omitted() {
        let harness = TestHarness::new().await;
        harness
            .prompter
            .input_answers
            .lock()
            .unwrap()
            .push("https://github.com/testuser/widget.git".to_string());

        let dir = tempfile::tempdir().unwrap();
        let runner = StubRunner::new();
        args(None)
            .run_in(&harness.factory, &runner, dir.path())
            .await
            .unwrap();

        assert_eq!(runner.calls().len(), 3);
    }

    #[tokio::test]
    async fn test_should_reject_invalid_url() {
        let harness = TestHarness::new().await;
        let dir = tempfile::tempdir().unwrap();

        let err = args(Some("not a url"))
            .run_in(&harness.factory, StubRunner::new(), dir.path())
            .await
            .unwrap_err();

        assert!(err.to_string().contains("invalid repository URL"));
    }
}
