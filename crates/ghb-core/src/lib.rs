//! Core types, traits, and utilities for the ghb bootstrap tool.
//!
//! This crate provides the foundational abstractions used across all ghb crates:
//! - [`IOStreams`] for terminal I/O handling
//! - [`Credentials`] for the token/email pair sourced from local configuration
//! - [`Prompter`] trait for interactive prompts

pub mod cmdutil;
pub mod config;
pub mod errors;
pub mod iostreams;
pub mod prompter;

pub use config::Credentials;
pub use errors::ConfigError;
pub use iostreams::IOStreams;
pub use prompter::Prompter;
