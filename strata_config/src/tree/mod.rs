//! Generic configuration tree shared by every pipeline stage.
//!
//! Documents of any supported format are decoded into a [`ConfigTree`]:
//! mappings, sequences and scalars. Mappings use [`BTreeMap`] so that
//! iteration, equality and serialisation never depend on hashing order.

mod path;

use std::collections::BTreeMap;

use serde::ser::{Serialize, Serializer};
use serde_json::{Number, Value};

pub use path::{KeyPath, PathSegment};

/// Ordered mapping from keys to subtrees.
pub type Mapping = BTreeMap<String, ConfigTree>;

/// Leaf value of a configuration tree.
#[derive(Clone, Debug, PartialEq)]
pub enum Scalar {
    /// A string; the only scalar kind eligible for placeholder resolution.
    String(String),
    /// A boolean.
    Bool(bool),
    /// An integer or floating-point number.
    Number(Number),
    /// An explicit null or empty value.
    Null,
}

/// Recursive configuration value.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigTree {
    /// A leaf value.
    Scalar(Scalar),
    /// Keyed children.
    Mapping(Mapping),
    /// Ordered children.
    Sequence(Vec<ConfigTree>),
}

impl Default for ConfigTree {
    fn default() -> Self {
        Self::empty()
    }
}

impl ConfigTree {
    /// An empty mapping, the identity element of a merge.
    #[must_use]
    pub const fn empty() -> Self {
        Self::Mapping(BTreeMap::new())
    }

    /// A string leaf.
    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Self::Scalar(Scalar::String(value.into()))
    }

    /// Returns `true` for [`ConfigTree::Mapping`].
    #[must_use]
    pub const fn is_mapping(&self) -> bool {
        matches!(self, Self::Mapping(_))
    }

    /// Borrow the mapping, if this node is one.
    #[must_use]
    pub const fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Self::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// Borrow the string, if this node is a string leaf.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Scalar(Scalar::String(value)) => Some(value),
            _ => None,
        }
    }

    /// Look up a direct child of a mapping.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Self> {
        self.as_mapping().and_then(|map| map.get(key))
    }

    /// Look up a descendant by dotted path, for example `db.user`.
    ///
    /// Numeric segments index into sequences. An empty path returns `self`.
    ///
    /// ```
    /// use strata_config::ConfigTree;
    /// use serde_json::json;
    ///
    /// let tree = ConfigTree::from(json!({"db": {"hosts": ["a", "b"]}}));
    /// assert_eq!(tree.get_path("db.hosts.1").and_then(ConfigTree::as_str), Some("b"));
    /// ```
    #[must_use]
    pub fn get_path(&self, path: &str) -> Option<&Self> {
        if path.is_empty() {
            return Some(self);
        }
        path.split('.').try_fold(self, |node, segment| match node {
            Self::Mapping(map) => map.get(segment),
            Self::Sequence(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            Self::Scalar(_) => None,
        })
    }

    /// Convert into a [`serde_json::Value`] without consuming the tree.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Scalar(scalar) => scalar.to_json(),
            Self::Mapping(map) => Value::Object(
                map.iter()
                    .map(|(key, value)| (key.clone(), value.to_json()))
                    .collect(),
            ),
            Self::Sequence(items) => Value::Array(items.iter().map(Self::to_json).collect()),
        }
    }
}

impl Scalar {
    fn to_json(&self) -> Value {
        match self {
            Self::String(value) => Value::String(value.clone()),
            Self::Bool(value) => Value::Bool(*value),
            Self::Number(value) => Value::Number(value.clone()),
            Self::Null => Value::Null,
        }
    }
}

impl From<Value> for ConfigTree {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => Self::Mapping(
                map.into_iter()
                    .map(|(key, value)| (key, Self::from(value)))
                    .collect(),
            ),
            Value::Array(items) => Self::Sequence(items.into_iter().map(Self::from).collect()),
            Value::String(value) => Self::Scalar(Scalar::String(value)),
            Value::Bool(value) => Self::Scalar(Scalar::Bool(value)),
            Value::Number(value) => Self::Scalar(Scalar::Number(value)),
            Value::Null => Self::Scalar(Scalar::Null),
        }
    }
}

impl From<ConfigTree> for Value {
    fn from(tree: ConfigTree) -> Self {
        match tree {
            ConfigTree::Scalar(Scalar::String(value)) => Self::String(value),
            ConfigTree::Scalar(Scalar::Bool(value)) => Self::Bool(value),
            ConfigTree::Scalar(Scalar::Number(value)) => Self::Number(value),
            ConfigTree::Scalar(Scalar::Null) => Self::Null,
            ConfigTree::Mapping(map) => Self::Object(
                map.into_iter()
                    .map(|(key, value)| (key, Self::from(value)))
                    .collect(),
            ),
            ConfigTree::Sequence(items) => Self::Array(items.into_iter().map(Self::from).collect()),
        }
    }
}

impl From<&str> for ConfigTree {
    fn from(value: &str) -> Self {
        Self::string(value)
    }
}

impl From<String> for ConfigTree {
    fn from(value: String) -> Self {
        Self::string(value)
    }
}

impl FromIterator<(String, Self)> for ConfigTree {
    fn from_iter<I: IntoIterator<Item = (String, Self)>>(iter: I) -> Self {
        Self::Mapping(iter.into_iter().collect())
    }
}

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::String(value) => serializer.serialize_str(value),
            Self::Bool(value) => serializer.serialize_bool(*value),
            Self::Number(value) => value.serialize(serializer),
            Self::Null => serializer.serialize_unit(),
        }
    }
}

impl Serialize for ConfigTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Scalar(scalar) => scalar.serialize(serializer),
            Self::Mapping(map) => serializer.collect_map(map),
            Self::Sequence(items) => serializer.collect_seq(items),
        }
    }
}
