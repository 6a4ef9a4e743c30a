//! Extensions for mapping errors to `StrataResult` concisely.
//!
//! These helpers reduce repetitive `.map_err(|e| Arc::new(e.into()))`
//! patterns when converting external error types into the crate's
//! `StrataResult<T>` alias (`Result<T, Arc<StrataError>>`).
//!
//! # Examples
//!
//! ```
//! use strata_config::{StrataResult, StrataResultExt};
//!
//! fn port() -> StrataResult<u16> {
//!     // serde_json::Error converts into StrataError::Conversion.
//!     serde_json::from_str("8080").into_strata()
//! }
//! assert_eq!(port().ok(), Some(8080));
//! ```

use std::sync::Arc;

use crate::{StrataError, StrataResult};

/// Generic extension for mapping any `Result<T, E>` with
/// `E: Into<StrataError>` into a `StrataResult<T>`.
pub trait StrataResultExt<T, E> {
    /// Convert `Result<T, E>` into `StrataResult<T>` using `Into<StrataError>`.
    ///
    /// # Errors
    ///
    /// Propagates the original error after conversion into
    /// `Arc<StrataError>`.
    fn into_strata(self) -> StrataResult<T>;
}

impl<T, E> StrataResultExt<T, E> for Result<T, E>
where
    E: Into<StrataError>,
{
    fn into_strata(self) -> StrataResult<T> {
        self.map_err(|e| Arc::new(e.into()))
    }
}

/// Extension attaching a key path to deserialisation failures.
pub(crate) trait ConversionExt<T> {
    /// Map a `serde_json::Error` into [`StrataError::Conversion`] at `path`.
    fn at_path(self, path: &str) -> StrataResult<T>;
}

impl<T> ConversionExt<T> for Result<T, serde_json::Error> {
    fn at_path(self, path: &str) -> StrataResult<T> {
        self.map_err(|e| StrataError::conversion(path, e))
    }
}
