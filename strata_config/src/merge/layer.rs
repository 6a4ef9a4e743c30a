//! Named layers and the ordered stack that folds them.

use camino::{Utf8Path, Utf8PathBuf};

use crate::ConfigTree;

/// A parsed source tagged with the name it was read from.
#[derive(Clone, Debug, PartialEq)]
pub struct SourceLayer {
    name: Utf8PathBuf,
    tree: ConfigTree,
}

impl SourceLayer {
    /// Pair a tree with its source name.
    #[must_use]
    pub fn new(name: impl Into<Utf8PathBuf>, tree: ConfigTree) -> Self {
        Self {
            name: name.into(),
            tree,
        }
    }

    /// Name of the source this layer came from.
    #[must_use]
    pub fn name(&self) -> &Utf8Path {
        &self.name
    }

    /// Borrow the layer's tree.
    #[must_use]
    pub const fn tree(&self) -> &ConfigTree {
        &self.tree
    }

    /// Take ownership of the layer's tree.
    #[must_use]
    pub fn into_tree(self) -> ConfigTree {
        self.tree
    }
}

/// Builder that accumulates [`SourceLayer`]s in priority order.
///
/// Layers pushed later override layers pushed earlier.
#[derive(Clone, Debug, Default)]
pub struct LayerStack {
    layers: Vec<SourceLayer>,
}

impl LayerStack {
    /// Create an empty stack.
    #[must_use]
    pub const fn new() -> Self {
        Self { layers: Vec::new() }
    }

    /// Push a tree as the new highest-priority layer.
    pub fn push(&mut self, name: impl Into<Utf8PathBuf>, tree: ConfigTree) {
        self.push_layer(SourceLayer::new(name, tree));
    }

    /// Push an existing layer as the new highest-priority layer.
    pub fn push_layer(&mut self, layer: SourceLayer) {
        self.layers.push(layer);
    }

    /// Number of layers pushed so far.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.layers.len()
    }

    /// Returns `true` when no layers have been pushed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Borrow the layers, lowest priority first.
    #[must_use]
    pub fn layers(&self) -> &[SourceLayer] {
        &self.layers
    }

    /// Fold every layer into a single tree.
    #[must_use]
    pub fn merge(self) -> ConfigTree {
        tracing::debug!(layers = self.layers.len(), "merging configuration sources");
        super::merge_layers(self.layers)
    }
}

impl FromIterator<SourceLayer> for LayerStack {
    fn from_iter<I: IntoIterator<Item = SourceLayer>>(iter: I) -> Self {
        Self {
            layers: iter.into_iter().collect(),
        }
    }
}

impl Extend<SourceLayer> for LayerStack {
    fn extend<I: IntoIterator<Item = SourceLayer>>(&mut self, iter: I) {
        self.layers.extend(iter);
    }
}
