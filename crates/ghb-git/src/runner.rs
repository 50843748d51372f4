//! Typed command lines and the command execution seam.
//!
//! Commands are built as a program plus typed arguments instead of shell
//! strings. A [`Arg::Secret`] argument renders masked, so the logged form
//! of a command can never carry a token while the executed argv does.

use std::path::PathBuf;
use std::process::Stdio;
use std::sync::Mutex;

use tokio::process::Command;

use crate::credential::{CredentialUrl, mask_credentials};
use crate::errors::GitError;

/// A single command-line argument.
#[derive(Debug, Clone)]
pub enum Arg {
    /// An argument with no sensitive content.
    Plain(String),
    /// A credentialed repository URL; renders masked.
    Secret(CredentialUrl),
}

impl Arg {
    /// The value passed to the subprocess.
    fn value(&self) -> &str {
        match self {
            Self::Plain(s) => s,
            Self::Secret(url) => url.expose(),
        }
    }
}

impl std::fmt::Display for Arg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Plain(s) => f.write_str(s),
            Self::Secret(url) => f.write_str(url.masked()),
        }
    }
}

/// A typed command invocation: program plus argument list.
///
/// No shell is involved; arguments are passed to the process verbatim.
#[derive(Debug, Clone)]
pub struct CommandLine {
    program: String,
    args: Vec<Arg>,
}

impl CommandLine {
    /// Start a new command for an arbitrary program.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Start a git command with the given subcommand arguments.
    pub fn git<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut cmd = Self::new("git");
        for arg in args {
            cmd = cmd.arg(arg);
        }
        cmd
    }

    /// Append a plain argument.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(Arg::Plain(arg.into()));
        self
    }

    /// Append a credentialed URL argument; it will render masked.
    #[must_use]
    pub fn secret(mut self, url: CredentialUrl) -> Self {
        self.args.push(Arg::Secret(url));
        self
    }

    /// The program name.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// The argv handed to the subprocess, real values included.
    pub fn argv(&self) -> Vec<&str> {
        self.args.iter().map(Arg::value).collect()
    }

    /// The masked rendering used for logs and error messages.
    pub fn rendered(&self) -> String {
        let mut out = self.program.clone();
        for arg in &self.args {
            out.push(' ');
            out.push_str(&arg.to_string());
        }
        out
    }
}

impl std::fmt::Display for CommandLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.rendered())
    }
}

/// Options for a single command execution.
#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    /// Treat a non-zero exit code as an error.
    pub fail_on_nonzero: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            fail_on_nonzero: true,
        }
    }
}

/// The outcome of one command execution.
#[derive(Debug, Clone, Default)]
pub struct CommandResult {
    /// Process exit code, if the process exited normally.
    pub exit_code: Option<i32>,
    /// Captured stdout.
    pub stdout: String,
    /// Captured stderr. Content here does not by itself indicate
    /// failure; git writes progress to stderr.
    pub stderr: String,
}

impl CommandResult {
    /// A zero-exit result with no output.
    pub fn ok() -> Self {
        Self {
            exit_code: Some(0),
            ..Self::default()
        }
    }

    /// A non-zero result carrying stderr output.
    pub fn failed(exit_code: i32, stderr: impl Into<String>) -> Self {
        Self {
            exit_code: Some(exit_code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    /// Whether the process exited with code zero.
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Execution seam for command invocations.
#[allow(async_fn_in_trait)]
pub trait CommandRunner: Send + Sync {
    /// Run one command, capturing stdout and stderr.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::CommandFailed`] when `fail_on_nonzero` is set
    /// and the process exits non-zero, or [`GitError::Io`] when the
    /// process cannot be spawned.
    async fn run(&self, cmd: &CommandLine, opts: RunOptions) -> Result<CommandResult, GitError>;
}

impl<R: CommandRunner> CommandRunner for &R {
    async fn run(&self, cmd: &CommandLine, opts: RunOptions) -> Result<CommandResult, GitError> {
        (**self).run(cmd, opts).await
    }
}

/// Runs commands as real subprocesses via tokio.
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    git_path: PathBuf,
    work_dir: Option<PathBuf>,
}

impl ProcessRunner {
    /// Create a runner, resolving the git binary up front.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::NotFound`] if git is not in PATH.
    pub fn new() -> Result<Self, GitError> {
        let git_path = which::which("git").map_err(|_| GitError::NotFound)?;
        Ok(Self {
            git_path,
            work_dir: None,
        })
    }

    /// Set the working directory for all invocations.
    #[must_use]
    pub fn with_work_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.work_dir = Some(dir.into());
        self
    }
}

impl CommandRunner for ProcessRunner {
    async fn run(&self, cmd: &CommandLine, opts: RunOptions) -> Result<CommandResult, GitError> {
        let rendered = cmd.rendered();
        tracing::info!(command = %rendered, "exec");

        let mut process = if cmd.program() == "git" {
            Command::new(&self.git_path)
        } else {
            Command::new(cmd.program())
        };
        process.args(cmd.argv());

        if let Some(ref dir) = self.work_dir {
            process.current_dir(dir);
        }

        process.stdout(Stdio::piped());
        process.stderr(Stdio::piped());

        let output = process.output().await?;

        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

        // Scrub before logging: git echoes remote URLs in its messages.
        if !stdout.is_empty() {
            tracing::info!(stdout = %mask_credentials(&stdout), "exec stdout");
        }
        if !stderr.is_empty() {
            tracing::info!(stderr = %mask_credentials(&stderr), "exec stderr");
        }

        let result = CommandResult {
            exit_code: output.status.code(),
            stdout,
            stderr,
        };

        if opts.fail_on_nonzero && !result.success() {
            return Err(GitError::CommandFailed {
                command: rendered,
                message: mask_credentials(&result.stderr),
                exit_code: result.exit_code,
            });
        }

        Ok(result)
    }
}

/// Test runner that records masked renderings and replays scripted results.
#[derive(Debug, Default)]
pub struct StubRunner {
    calls: Mutex<Vec<String>>,
    results: Mutex<Vec<CommandResult>>,
}

impl StubRunner {
    /// Create a stub that answers every command with success.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a result; queued results are consumed in order, after which
    /// every command succeeds.
    pub fn push_result(&self, result: CommandResult) {
        self.results
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(result);
    }

    /// The masked renderings of every command run so far.
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

impl CommandRunner for StubRunner {
    async fn run(&self, cmd: &CommandLine, opts: RunOptions) -> Result<CommandResult, GitError> {
        let rendered = cmd.rendered();
        self.calls
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(rendered.clone());

        let mut results = self
            .results
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let result = if results.is_empty() {
            CommandResult::ok()
        } else {
            results.remove(0)
        };
        drop(results);

        if opts.fail_on_nonzero && !result.success() {
            return Err(GitError::CommandFailed {
                command: rendered,
                message: mask_credentials(&result.stderr),
                exit_code: result.exit_code,
            });
        }

        Ok(result)
    }
}
