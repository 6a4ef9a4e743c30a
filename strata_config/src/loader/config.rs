//! The resolved configuration handed back to callers.

use serde::de::DeserializeOwned;

use crate::result_ext::ConversionExt;
use crate::{ConfigTree, StrataResult, StrataResultExt};

/// A merged configuration with every placeholder resolved.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    tree: ConfigTree,
}

impl Config {
    pub(crate) const fn new(tree: ConfigTree) -> Self {
        Self { tree }
    }

    /// Borrow the resolved tree.
    #[must_use]
    pub const fn tree(&self) -> &ConfigTree {
        &self.tree
    }

    /// Take ownership of the resolved tree.
    #[must_use]
    pub fn into_tree(self) -> ConfigTree {
        self.tree
    }

    /// Look up a value by dotted path, e.g. `db.user`.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&ConfigTree> {
        self.tree.get_path(path)
    }

    /// Deserialise the whole configuration into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::StrataError::Conversion`] when the tree does not fit
    /// `T`.
    pub fn extract<T: DeserializeOwned>(&self) -> StrataResult<T> {
        serde_json::from_value(self.tree.to_json()).into_strata()
    }

    /// Deserialise the value at `path` into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::StrataError::Conversion`] when `path` is absent or
    /// its value does not fit `T`.
    pub fn extract_inner<T: DeserializeOwned>(&self, path: &str) -> StrataResult<T> {
        let value = self.get(path).map(ConfigTree::to_json).ok_or_else(|| {
            <serde_json::Error as serde::de::Error>::custom(format!("missing key '{path}'"))
        });
        value.and_then(serde_json::from_value).at_path(path)
    }
}

impl From<Config> for ConfigTree {
    fn from(config: Config) -> Self {
        config.tree
    }
}
