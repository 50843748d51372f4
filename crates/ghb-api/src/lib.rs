//! GitHub REST API client for repository creation and `.gitignore`
//! template download.

pub mod client;
pub mod errors;

pub use client::{Client, CreatedRepo};
pub use errors::ApiError;
