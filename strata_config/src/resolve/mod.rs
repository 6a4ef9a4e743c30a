//! Resolve stage: replace placeholder strings with provider values.
//!
//! Every string leaf is checked against the registry. A match is replaced
//! by whatever its provider returns; anything else passes through. The
//! first provider failure aborts the walk and the partially rebuilt tree is
//! dropped, so callers only ever see a fully resolved tree or an error.

use crate::{ConfigTree, KeyPath, Mapping, ProviderRegistry, Scalar, StrataError, StrataResult};

/// Resolve every placeholder in `tree`.
///
/// # Errors
///
/// Returns [`StrataError::Resolution`] naming the key path, provider prefix
/// and provider key of the first placeholder that could not be resolved.
///
/// # Examples
///
/// ```rust
/// use strata_config::{ConfigTree, EnvProvider, MapEnvironment, ProviderRegistry};
/// use strata_config::resolve::resolve_tree;
/// use serde_json::json;
///
/// let registry = ProviderRegistry::new().with_provider(
///     "env:",
///     EnvProvider::with_environment(MapEnvironment::new().with_var("DB_PASS", "secretpw")),
/// )?;
/// let tree = ConfigTree::from(json!({"db": {"pass": "env:DB_PASS", "port": 5432}}));
///
/// let resolved = resolve_tree(tree, &registry)?;
/// assert_eq!(resolved, ConfigTree::from(json!({"db": {"pass": "secretpw", "port": 5432}})));
/// # Ok::<_, std::sync::Arc<strata_config::StrataError>>(())
/// ```
pub fn resolve_tree(tree: ConfigTree, registry: &ProviderRegistry) -> StrataResult<ConfigTree> {
    let mut path = KeyPath::root();
    let resolved = resolve_node(tree, registry, &mut path)?;
    tracing::debug!(providers = registry.len(), "resolved configuration placeholders");
    Ok(resolved)
}

fn resolve_node(
    node: ConfigTree,
    registry: &ProviderRegistry,
    path: &mut KeyPath,
) -> StrataResult<ConfigTree> {
    match node {
        ConfigTree::Mapping(map) => resolve_mapping(map, registry, path).map(ConfigTree::Mapping),
        ConfigTree::Sequence(items) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                path.push_index(index);
                let resolved = resolve_node(item, registry, path);
                path.pop();
                resolved
            })
            .collect::<StrataResult<Vec<_>>>()
            .map(ConfigTree::Sequence),
        ConfigTree::Scalar(Scalar::String(value)) => {
            resolve_string(value, registry, path).map(ConfigTree::string)
        }
        scalar @ ConfigTree::Scalar(_) => Ok(scalar),
    }
}

fn resolve_mapping(
    map: Mapping,
    registry: &ProviderRegistry,
    path: &mut KeyPath,
) -> StrataResult<Mapping> {
    map.into_iter()
        .map(|(key, value)| {
            path.push_key(&key);
            let resolved = resolve_node(value, registry, path);
            path.pop();
            resolved.map(|node| (key, node))
        })
        .collect()
}

fn resolve_string(
    value: String,
    registry: &ProviderRegistry,
    path: &KeyPath,
) -> StrataResult<String> {
    let Some(dispatch) = registry.dispatch(&value) else {
        return Ok(value);
    };
    tracing::trace!(
        %path,
        prefix = dispatch.prefix,
        provider = dispatch.provider.name(),
        "resolving placeholder"
    );
    dispatch.provider.resolve(dispatch.key).map_err(|source| {
        StrataError::resolution(path.to_string(), dispatch.prefix, dispatch.key, source)
    })
}
