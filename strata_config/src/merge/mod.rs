//! Merge stage: fold parsed sources into one tree by override priority.
//!
//! Sources are applied from lowest to highest priority. Mappings merge
//! key-by-key at every depth; any other value replaces what was there. The
//! fold walks an ordered list, so the outcome never depends on hashing or
//! on the order a storage backend happens to iterate in.
//!
//! # Example
//!
//! ```rust
//! use strata_config::{ConfigTree, LayerStack};
//! use serde_json::json;
//!
//! let mut stack = LayerStack::new();
//! stack.push("base.yaml", ConfigTree::from(json!({"a": {"x": 1, "y": 2}})));
//! stack.push("override.yaml", ConfigTree::from(json!({"a": {"y": 3}})));
//!
//! assert_eq!(stack.merge(), ConfigTree::from(json!({"a": {"x": 1, "y": 3}})));
//! ```

mod layer;

use crate::{ConfigTree, Mapping};

pub use layer::{LayerStack, SourceLayer};

/// Overlay `layer` onto `target`, updating `target` in place.
///
/// Behaviour:
/// - When merging a mapping into a non-mapping target, the target is replaced
///   by an empty mapping first.
/// - Mappings are merged recursively (keys are added or overwritten, and
///   nested mappings are overlaid).
/// - Sequences and scalars replace `target` wholesale.
///
/// # Examples
///
/// ```rust
/// use strata_config::{ConfigTree, merge_value};
/// use serde_json::json;
///
/// let mut acc = ConfigTree::from(json!({"a": 1, "b": {"x": 1}}));
/// merge_value(&mut acc, ConfigTree::from(json!({"b": {"y": 2}, "c": 3})));
/// assert_eq!(acc, ConfigTree::from(json!({"a": 1, "b": {"x": 1, "y": 2}, "c": 3})));
///
/// // Sequences replace existing values.
/// merge_value(&mut acc, ConfigTree::from(json!({"b": [1, 2, 3]})));
/// assert_eq!(acc.get("b"), Some(&ConfigTree::from(json!([1, 2, 3]))));
/// ```
pub fn merge_value(target: &mut ConfigTree, layer: ConfigTree) {
    match layer {
        ConfigTree::Mapping(map) => merge_mapping(target, map),
        other => *target = other,
    }
}

fn merge_mapping(target: &mut ConfigTree, map: Mapping) {
    if !target.is_mapping() {
        *target = ConfigTree::empty();
    }

    let ConfigTree::Mapping(target_map) = target else {
        return;
    };

    for (key, value) in map {
        match target_map.get_mut(&key) {
            Some(existing) => merge_value(existing, value),
            None => {
                target_map.insert(key, value);
            }
        }
    }
}

/// Fold `layers`, ordered lowest to highest priority, into one tree.
///
/// An empty iterator yields an empty mapping.
#[must_use]
pub fn merge_layers<I>(layers: I) -> ConfigTree
where
    I: IntoIterator<Item = SourceLayer>,
{
    layers
        .into_iter()
        .fold(ConfigTree::empty(), |mut merged, layer| {
            tracing::trace!(source = %layer.name(), "merging configuration layer");
            merge_value(&mut merged, layer.into_tree());
            merged
        })
}

#[cfg(test)]
mod tests;
