//! Error reported by placeholder providers.

use std::error::Error;
use std::fmt;

type BoxedCause = Box<dyn Error + Send + Sync>;

/// Failure returned by a [`crate::Provider`] lookup.
///
/// Not-found, authorisation and transport failures all surface as this one
/// type. Callers that need to tell them apart inspect the wrapped cause via
/// [`Error::source`] or [`ProviderError::cause`].
#[derive(Debug)]
pub struct ProviderError {
    message: String,
    cause: Option<BoxedCause>,
}

impl ProviderError {
    /// Create an error carrying only a message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            cause: None,
        }
    }

    /// Create an error that wraps an underlying cause.
    #[must_use]
    pub fn with_source(message: impl Into<String>, cause: impl Into<BoxedCause>) -> Self {
        Self {
            message: message.into(),
            cause: Some(cause.into()),
        }
    }

    /// Create the error reported when a key does not exist in the provider.
    #[must_use]
    pub fn not_found(key: &str) -> Self {
        Self::new(format!("'{key}' not found"))
    }

    /// Human-readable description of the failure.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The wrapped cause, if any.
    #[must_use]
    pub fn cause(&self) -> Option<&(dyn Error + Send + Sync + 'static)> {
        self.cause.as_deref()
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.cause {
            Some(cause) => write!(f, "{}: {cause}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

impl Error for ProviderError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.cause
            .as_deref()
            .map(|cause| cause as &(dyn Error + 'static))
    }
}
