//! Git-related error types.

/// Errors from git operations.
#[derive(Debug, thiserror::Error)]
pub enum GitError {
    /// Git command failed with an exit code.
    ///
    /// `command` and `message` are the masked rendering and scrubbed
    /// stderr; neither ever carries a raw token.
    #[error("{command} failed: {message}")]
    CommandFailed {
        /// The masked rendering of the command that failed.
        command: String,
        /// Scrubbed stderr output.
        message: String,
        /// Process exit code, if available.
        exit_code: Option<i32>,
    },

    /// Git binary not found.
    #[error("git executable not found in PATH")]
    NotFound,

    /// Remote URL could not be parsed.
    #[error("invalid repository URL: {0}")]
    InvalidRemoteUrl(String),

    /// I/O error from subprocess or filesystem migration.
    #[error("git IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl GitError {
    /// Get the exit code if this was a command failure.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::CommandFailed { exit_code, .. } => *exit_code,
            _ => None,
        }
    }
}
