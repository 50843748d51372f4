//! `ghb setup` command: bootstrap the current directory into a new
//! private GitHub repository.

use std::path::Path;

use anyhow::{Context, Result, bail};
use clap::Args;

use ghb_core::cmdutil::CancelError;
use ghb_core::ios_println;
use ghb_git::credential::RemoteUrl;
use ghb_git::runner::CommandRunner;
use ghb_git::sync::Synchronizer;

use crate::factory::Factory;
use crate::gitignore::{self, Language};

/// Set up the current directory as a new GitHub project.
#[derive(Debug, Default, Args)]
pub struct SetupArgs {
    /// Name for the remote repository (prompted for when omitted).
    #[arg(value_name = "NAME")]
    name: Option<String>,
}

impl SetupArgs {
    /// Run the setup command against the current directory.
    pub async fn run(&self, factory: &Factory) -> Result<()> {
        // Fail on missing credentials before anything else runs.
        factory.credentials()?;
        let dir = std::env::current_dir().context("cannot determine working directory")?;
        let runner = factory.runner_in(&dir)?;
        self.run_in(factory, runner, &dir).await
    }

    /// Run the setup flow in a specific directory with an explicit runner.
    pub async fn run_in<R: CommandRunner>(
        &self,
        factory: &Factory,
        runner: R,
        dir: &Path,
    ) -> Result<()> {
        tracing::debug!(dir = %dir.display(), "starting project setup");

        // Credentials are resolved before any git or API work happens.
        let creds = factory.credentials()?.clone();
        let prompter = factory.prompter();
        let cs = factory.io.color_scheme();

        if dir.join(".git").exists() {
            let wipe = prompter.confirm(
                "Found an existing .git directory. Delete it and start fresh?",
                false,
            )?;
            if wipe {
                clean_git_files(dir).context("failed to remove existing git metadata")?;
                ios_println!(
                    factory.io,
                    "{} removed existing git metadata",
                    cs.success_icon()
                );
                if !prompter.confirm("Continue with project setup?", true)? {
                    return Err(CancelError.into());
                }
            }
        }

        let selected = prompter.select("Project language", Some(0), &Language::labels())?;
        let language =
            Language::from_index(selected).ok_or_else(|| anyhow::anyhow!("no such language"))?;

        let api = factory.api_client()?;
        let template = api
            .fetch_gitignore_template(language.template_name())
            .await
            .context("failed to download gitignore template")?;

        let custom_lines = gitignore::collect_custom_lines(prompter.as_ref())?;
        std::fs::write(
            dir.join(".gitignore"),
            gitignore::assemble(&template, &custom_lines),
        )
        .context("failed to write .gitignore")?;
        ios_println!(factory.io, "{} wrote .gitignore", cs.success_icon());

        let default_name = dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let name = match self.name {
            Some(ref name) => name.clone(),
            None => prompter.input("Project name", &default_name)?,
        };
        let name = name.trim();
        if name.is_empty() {
            bail!("project name cannot be empty");
        }

        let repo = api.create_repository(name).await?;
        let remote = RemoteUrl::parse(&repo.clone_url)?;

        let sync = Synchronizer::new(runner);
        sync.publish(&remote, &creds).await?;

        ios_println!(
            factory.io,
            "{} {} is live at {}",
            cs.success_icon(),
            name,
            cs.cyan(&repo.html_url)
        );

        Ok(())
    }
}

/// Remove git metadata from a directory tree about to be re-initialized:
/// the top-level `.git` and `.gitignore`, plus any nested checkout (a
/// child directory that itself contains `.git`).
pub fn clean_git_files(dir: &Path) -> std::io::Result<()> {
    let git_dir = dir.join(".git");
    if git_dir.exists() {
        std::fs::remove_dir_all(&git_dir)?;
    }

    let gitignore = dir.join(".gitignore");
    if gitignore.exists() {
        std::fs::remove_file(&gitignore)?;
    }

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() && entry.path().join(".git").exists() {
            std::fs::remove_dir_all(entry.path())?;
        }
    }

    Ok(())
}
