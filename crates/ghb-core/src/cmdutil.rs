//! Command utility types shared across the CLI.

/// Error indicating user cancelled an operation.
#[derive(Debug, thiserror::Error)]
#[error("user cancelled")]
pub struct CancelError;

/// Error indicating missing or invalid configuration (exit 4).
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct ConfigurationError(pub String);

/// Silent error - triggers exit 1 without message.
#[derive(Debug, thiserror::Error)]
#[error("")]
pub struct SilentError;

/// Check if an error represents a user cancellation.
pub fn is_user_cancellation(err: &anyhow::Error) -> bool {
    err.downcast_ref::<CancelError>().is_some()
}

/// Check if an error represents a configuration problem.
pub fn is_configuration_error(err: &anyhow::Error) -> bool {
    err.downcast_ref::<ConfigurationError>().is_some()
        || err.downcast_ref::<crate::errors::ConfigError>().is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_display_cancel_error() {
        let err = CancelError;
        assert_eq!(err.to_string(), "user cancelled");
    }

    #[test]
    fn test_should_display_configuration_error() {
        let err = ConfigurationError("GITHUB_TOKEN is not set".to_string());
        assert_eq!(err.to_string(), "GITHUB_TOKEN is not set");
    }

    #[test]
    fn test_should_display_silent_error() {
        let err = SilentError;
        assert_eq!(err.to_string(), "");
    }

    #[test]
    fn test_should_detect_user_cancellation() {
        let err: anyhow::Error = CancelError.into();
        assert!(is_user_cancellation(&err));
    }

    #[test]
    fn test_should_not_detect_non_cancel_as_cancellation() {
        let err = anyhow::anyhow!("some other error");
        assert!(!is_user_cancellation(&err));
    }

    #[test]
    fn test_should_detect_configuration_error() {
        let err: anyhow::Error = ConfigurationError("missing".to_string()).into();
        assert!(is_configuration_error(&err));
    }

    #[test]
    fn test_should_detect_config_error_variant() {
        let err: anyhow::Error = crate::errors::ConfigError::Missing("GITHUB_TOKEN").into();
        assert!(is_configuration_error(&err));
    }
}
