//! Prefix-to-provider registry.

use std::collections::BTreeMap;

use super::{ENV_PREFIX, EnvProvider, Provider, SSM_PREFIX, SecretStore, SecretStoreProvider};
use crate::{StrataError, StrataResult};

/// Registered providers keyed by the prefix that selects them.
///
/// Prefixes are mutually exclusive: no prefix may equal or start with
/// another, so at most one provider ever matches a string.
#[derive(Debug, Default)]
pub struct ProviderRegistry {
    providers: BTreeMap<String, Box<dyn Provider>>,
}

/// The provider selected for a placeholder string.
#[derive(Clone, Copy, Debug)]
pub struct Dispatch<'r, 'v> {
    /// Prefix that matched.
    pub prefix: &'r str,
    /// Provider registered under `prefix`.
    pub provider: &'r dyn Provider,
    /// The placeholder text after `prefix`.
    pub key: &'v str,
}

impl ProviderRegistry {
    /// Create a registry with no providers; every string is literal.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            providers: BTreeMap::new(),
        }
    }

    /// Registry with only the process environment under [`ENV_PREFIX`].
    #[must_use]
    pub fn environment_only() -> Self {
        let mut providers: BTreeMap<String, Box<dyn Provider>> = BTreeMap::new();
        providers.insert(ENV_PREFIX.to_owned(), Box::new(EnvProvider::new()));
        Self { providers }
    }

    /// Registry with the process environment under [`ENV_PREFIX`] and
    /// `store` under [`SSM_PREFIX`].
    #[must_use]
    pub fn standard<S>(store: S) -> Self
    where
        S: SecretStore + 'static,
    {
        let mut registry = Self::environment_only();
        registry
            .providers
            .insert(SSM_PREFIX.to_owned(), Box::new(SecretStoreProvider::new(store)));
        registry
    }

    /// Register `provider` under `prefix`.
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::Registry`] when `prefix` is empty or overlaps
    /// an existing prefix.
    pub fn register<P>(&mut self, prefix: impl Into<String>, provider: P) -> StrataResult<()>
    where
        P: Provider + 'static,
    {
        let candidate = prefix.into();
        if candidate.is_empty() {
            return Err(StrataError::registry(candidate, "prefix must not be empty"));
        }
        if let Some(existing) = self.providers.keys().find(|existing| {
            existing.starts_with(&candidate) || candidate.starts_with(existing.as_str())
        }) {
            let message = format!("overlaps registered prefix '{existing}'");
            return Err(StrataError::registry(candidate, message));
        }
        tracing::debug!(prefix = %candidate, provider = provider.name(), "registered placeholder provider");
        self.providers.insert(candidate, Box::new(provider));
        Ok(())
    }

    /// Builder form of [`ProviderRegistry::register`].
    ///
    /// # Errors
    ///
    /// See [`ProviderRegistry::register`].
    pub fn with_provider<P>(mut self, prefix: impl Into<String>, provider: P) -> StrataResult<Self>
    where
        P: Provider + 'static,
    {
        self.register(prefix, provider)?;
        Ok(self)
    }

    /// Find the provider whose prefix starts `value`.
    ///
    /// Returns `None` for literal strings.
    #[must_use]
    pub fn dispatch<'r, 'v>(&'r self, value: &'v str) -> Option<Dispatch<'r, 'v>> {
        self.providers.iter().find_map(|(prefix, provider)| {
            value.strip_prefix(prefix.as_str()).map(|key| Dispatch {
                prefix: prefix.as_str(),
                provider: provider.as_ref(),
                key,
            })
        })
    }

    /// Registered prefixes in sorted order.
    pub fn prefixes(&self) -> impl Iterator<Item = &str> {
        self.providers.keys().map(String::as_str)
    }

    /// Number of registered providers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Returns `true` when no providers are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}
