//! Primary error enum for configuration loading flows.

use std::sync::Arc;

use camino::Utf8PathBuf;
use thiserror::Error;

use super::ProviderError;

/// Result alias used throughout the crate.
///
/// Errors are shared behind an [`Arc`] so callers can clone and stash them
/// without requiring every underlying cause to implement [`Clone`].
pub type StrataResult<T> = Result<T, Arc<StrataError>>;

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StrataError {
    /// A configuration source could not be read.
    #[error("failed to read configuration source '{path}': {source}")]
    Io {
        /// Path handed to the file service.
        path: Utf8PathBuf,
        /// Underlying I/O failure reported by the file service.
        #[source]
        source: std::io::Error,
    },

    /// A configuration source is not a well-formed mapping document.
    #[error("failed to parse configuration source '{path}': {source}")]
    Parse {
        /// Path of the document that failed to parse.
        path: Utf8PathBuf,
        /// Codec error describing the malformed input.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A placeholder could not be resolved by its provider.
    #[error("failed to resolve '{path}' with provider '{provider}': {source}")]
    Resolution {
        /// Dotted key path of the offending leaf.
        path: String,
        /// Prefix of the provider that handled the placeholder.
        provider: String,
        /// Key handed to the provider once the prefix was stripped.
        key: String,
        /// Failure reported by the provider.
        #[source]
        source: ProviderError,
    },

    /// The resolved tree does not fit the requested destination type.
    #[error("failed to convert configuration{}: {source}", describe_path(.path))]
    Conversion {
        /// Dotted key path that was being extracted; empty for the root.
        path: String,
        /// Deserialisation error from the destination type.
        #[source]
        source: serde_json::Error,
    },

    /// A provider was registered under a prefix that clashes with another.
    #[error("cannot register provider prefix '{prefix}': {message}")]
    Registry {
        /// Prefix that was rejected.
        prefix: String,
        /// Explanation of the clash.
        message: String,
    },
}

fn describe_path(path: &str) -> String {
    if path.is_empty() {
        String::new()
    } else {
        format!(" at '{path}'")
    }
}
