//! Repository synchronization: publish a local tree to a fresh remote,
//! or clone a remote into an existing directory.

use std::path::Path;

use ghb_core::Credentials;

use crate::credential::RemoteUrl;
use crate::errors::GitError;
use crate::runner::{CommandLine, CommandRunner, RunOptions};

/// Name given to an incoming `.env` that collides with an existing one.
pub const ENV_RENAMED_NAME: &str = ".env.remote";

/// Commit message for the first commit of a published project.
pub const INITIAL_COMMIT_MESSAGE: &str = "Initial commit";

/// Drives git through publish and clone sequences against one working
/// directory. The runner is expected to execute inside that directory.
#[derive(Debug)]
pub struct Synchronizer<R: CommandRunner> {
    runner: R,
}

impl<R: CommandRunner> Synchronizer<R> {
    /// Create a synchronizer over the given runner.
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    /// Access the underlying runner.
    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Publish the working directory to a freshly created remote.
    ///
    /// Runs the full init-to-push sequence. The first failing step aborts
    /// the sequence and surfaces its error; the working tree is left
    /// as-is for manual recovery.
    ///
    /// # Errors
    ///
    /// Returns the error of the first failing git step.
    pub async fn publish(&self, remote: &RemoteUrl, creds: &Credentials) -> Result<(), GitError> {
        let opts = RunOptions::default();

        self.runner.run(&CommandLine::git(["init"]), opts).await?;
        self.set_identity(creds).await?;

        // The credentialed URL exists only for this registration; the
        // runner logs it masked.
        let credentialed = remote.with_token(creds.token());
        self.runner
            .run(
                &CommandLine::git(["remote", "add", "origin"]).secret(credentialed),
                opts,
            )
            .await?;

        self.runner.run(&CommandLine::git(["add", "."]), opts).await?;
        self.runner
            .run(
                &CommandLine::git(["commit", "-m", INITIAL_COMMIT_MESSAGE]),
                opts,
            )
            .await?;
        self.runner
            .run(&CommandLine::git(["branch", "-M", "main"]), opts)
            .await?;
        self.runner
            .run(&CommandLine::git(["push", "-u", "origin", "main"]), opts)
            .await?;

        Ok(())
    }

    /// Clone a remote repository into `dest`, merging its contents with
    /// whatever already lives there.
    ///
    /// The clone lands in a temporary directory inside `dest` (removed on
    /// every exit path), then each entry migrates into `dest`:
    /// an existing `.git` at `dest` is replaced by the incoming one; an
    /// incoming `.env` that collides is renamed to `.env.remote` so the
    /// existing file survives; any other collision is resolved by deleting
    /// the pre-existing entry. Afterwards the committer identity is set on
    /// the now-local repository.
    ///
    /// # Errors
    ///
    /// Returns the clone step's error, an I/O error from migration, or
    /// the error of an identity config step.
    pub async fn clone(
        &self,
        remote: &RemoteUrl,
        creds: &Credentials,
        dest: &Path,
    ) -> Result<(), GitError> {
        let staging = tempfile::tempdir_in(dest)?;

        let credentialed = remote.with_token(creds.token());
        let target = staging.path().to_string_lossy().into_owned();
        self.runner
            .run(
                &CommandLine::git(["clone"]).secret(credentialed).arg(target),
                RunOptions::default(),
            )
            .await?;

        migrate_entries(staging.path(), dest)?;

        self.set_identity(creds).await?;

        Ok(())
    }

    /// Set committer identity on the repository. Name mirrors the email
    /// so a bare token-based setup needs only two credential values.
    async fn set_identity(&self, creds: &Credentials) -> Result<(), GitError> {
        let opts = RunOptions::default();
        self.runner
            .run(
                &CommandLine::git(["config", "user.email", creds.email()]),
                opts,
            )
            .await?;
        self.runner
            .run(
                &CommandLine::git(["config", "user.name", creds.email()]),
                opts,
            )
            .await?;
        Ok(())
    }
}

/// Move every entry from `src` into `dest`, applying the collision policy.
///
/// - `.git`: the destination's metadata directory is removed; the incoming
///   one takes its place.
/// - `.env`: the destination's file is preserved; the incoming one is
///   renamed to [`ENV_RENAMED_NAME`].
/// - anything else: the pre-existing destination entry is deleted before
///   the move.
pub fn migrate_entries(src: &Path, dest: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let name = entry.file_name();
        let from = entry.path();

        let to = if name == ".env" && dest.join(&name).exists() {
            dest.join(ENV_RENAMED_NAME)
        } else {
            dest.join(&name)
        };

        if to.exists() {
            if to.is_dir() {
                std::fs::remove_dir_all(&to)?;
            } else {
                std::fs::remove_file(&to)?;
            }
        }

        std::fs::rename(&from, &to)?;
    }

    Ok(())
}
