//! Shared-ownership constructors for `StrataError`.
//!
//! Pipeline stages return [`super::StrataResult`], so each constructor hands back
//! the error already wrapped in an [`Arc`].

use std::error::Error;
use std::sync::Arc;

use camino::Utf8Path;

use super::{ProviderError, StrataError};

impl StrataError {
    /// Construct an [`StrataError::Io`] for a source path.
    #[must_use]
    pub fn io(path: &Utf8Path, source: std::io::Error) -> Arc<Self> {
        Arc::new(Self::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Construct an [`StrataError::Parse`] for a source path.
    #[must_use]
    pub fn parse(path: &Utf8Path, source: impl Into<Box<dyn Error + Send + Sync>>) -> Arc<Self> {
        Arc::new(Self::Parse {
            path: path.to_path_buf(),
            source: source.into(),
        })
    }

    /// Construct an [`StrataError::Resolution`] for a failed placeholder.
    ///
    /// # Examples
    ///
    /// ```
    /// use strata_config::{ProviderError, StrataError};
    ///
    /// let err = StrataError::resolution("db.pass", "ssm:", "/db/pass", ProviderError::new("denied"));
    /// assert!(matches!(&*err, StrataError::Resolution { provider, .. } if provider == "ssm:"));
    /// ```
    #[must_use]
    pub fn resolution(
        path: impl Into<String>,
        provider: impl Into<String>,
        key: impl Into<String>,
        source: ProviderError,
    ) -> Arc<Self> {
        Arc::new(Self::Resolution {
            path: path.into(),
            provider: provider.into(),
            key: key.into(),
            source,
        })
    }

    /// Construct an [`StrataError::Conversion`] for the value at `path`.
    #[must_use]
    pub fn conversion(path: impl Into<String>, source: serde_json::Error) -> Arc<Self> {
        Arc::new(Self::Conversion {
            path: path.into(),
            source,
        })
    }

    /// Construct an [`StrataError::Registry`] for a rejected prefix.
    #[must_use]
    pub fn registry(prefix: impl Into<String>, message: impl Into<String>) -> Arc<Self> {
        Arc::new(Self::Registry {
            prefix: prefix.into(),
            message: message.into(),
        })
    }

    /// Returns `true` when the error was raised while reading a source.
    #[must_use]
    pub const fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }

    /// Returns `true` when the error was raised while parsing a source.
    #[must_use]
    pub const fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }

    /// Returns `true` when the error was raised by a placeholder provider.
    #[must_use]
    pub const fn is_resolution(&self) -> bool {
        matches!(self, Self::Resolution { .. })
    }

    /// Returns `true` when the error was raised during typed conversion.
    #[must_use]
    pub const fn is_conversion(&self) -> bool {
        matches!(self, Self::Conversion { .. })
    }
}

