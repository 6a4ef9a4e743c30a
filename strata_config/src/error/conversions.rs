//! Trait-based conversions between external error types and `StrataError`.

use super::StrataError;

/// Deserialisation failures at the root of the tree become
/// [`StrataError::Conversion`].
impl From<serde_json::Error> for StrataError {
    fn from(source: serde_json::Error) -> Self {
        Self::Conversion {
            path: String::new(),
            source,
        }
    }
}
