//! Git command execution and repository synchronization.
//!
//! This crate provides:
//! - [`CommandLine`] / [`Arg`]: typed command lines where credentialed
//!   arguments render masked
//! - [`CommandRunner`]: the execution seam, with [`ProcessRunner`] for
//!   production and [`StubRunner`] for tests
//! - [`RemoteUrl`] / [`CredentialUrl`]: repository URLs with and without
//!   an embedded access token
//! - [`Synchronizer`]: publish and clone-and-migrate operations

pub mod credential;
pub mod errors;
pub mod runner;
pub mod sync;

pub use credential::{CredentialUrl, RemoteUrl, TOKEN_MASK, mask_credentials};
pub use errors::GitError;
pub use runner::{Arg, CommandLine, CommandResult, CommandRunner, ProcessRunner, RunOptions, StubRunner};
pub use sync::Synchronizer;
