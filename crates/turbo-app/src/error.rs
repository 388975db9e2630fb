//! Error types for the application container.

use thiserror::Error;

/// Errors raised by [`App`](crate::App) construction and lifecycle calls.
///
/// Precondition failures are reported before the container is mutated.
/// Failures raised by a module's own callables are carried through
/// unchanged in [`AppError::Load`] and [`AppError::Route`].
#[derive(Error, Debug)]
pub enum AppError {
    /// Required configuration is missing.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Operation attempted in the wrong lifecycle phase.
    #[error("Lifecycle error: {0}")]
    Lifecycle(String),

    /// A required argument was not supplied.
    #[error("Argument error: {0}")]
    Argument(String),

    /// The same module was loaded twice.
    #[error("State error: {0}")]
    State(String),

    /// The module does not have the required shape.
    #[error("Contract error: {0}")]
    Contract(String),

    /// A module's `load` function failed.
    #[error(transparent)]
    Load(anyhow::Error),

    /// A route-registration function failed during init.
    #[error(transparent)]
    Route(anyhow::Error),
}

impl AppError {
    /// Returns the error raised by a module callable, if this is one.
    pub fn into_callable_error(self) -> Option<anyhow::Error> {
        match self {
            Self::Load(err) | Self::Route(err) => Some(err),
            _ => None,
        }
    }

    /// Whether the failure came from a module callable rather than a
    /// container precondition.
    pub fn is_callable_error(&self) -> bool {
        matches!(self, Self::Load(_) | Self::Route(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precondition_messages() {
        let err = AppError::Lifecycle("App is already initialized".to_string());
        assert_eq!(err.to_string(), "Lifecycle error: App is already initialized");

        let err = AppError::Contract("A module must contain a .load() function".to_string());
        assert!(err.to_string().contains("A module must contain a .load() function"));
    }

    #[test]
    fn test_callable_error_is_transparent() {
        let err = AppError::Load(anyhow::anyhow!("database unreachable"));
        assert_eq!(err.to_string(), "database unreachable");
        assert!(err.is_callable_error());
    }

    #[test]
    fn test_into_callable_error() {
        let err = AppError::Route(anyhow::anyhow!("bad route"));
        let inner = err.into_callable_error().unwrap();
        assert_eq!(inner.to_string(), "bad route");

        let err = AppError::State("This module is already loaded".to_string());
        assert!(!err.is_callable_error());
        assert!(err.into_callable_error().is_none());
    }
}
