//! Core error types for the ghb CLI.

/// Configuration-specific errors.
///
/// Missing credentials are fatal before any git or API operation is
/// attempted.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        /// Path of the config file.
        path: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// A line in the configuration file could not be parsed.
    #[error("failed to parse config: {0}")]
    Parse(String),

    /// Missing required configuration key.
    #[error("missing required configuration: {0}")]
    Missing(&'static str),
}
