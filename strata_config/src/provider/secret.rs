//! Secret-store provider.
//!
//! The provider owns a [`SecretStore`] client built once at startup and
//! asks it for decrypted parameters. Any store that speaks this contract
//! can stand in, which is how tests avoid the network.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use super::Provider;
use crate::ProviderError;

/// Prefix under which [`SecretStoreProvider`] is registered by default.
pub const SSM_PREFIX: &str = "ssm:";

/// Client for a remote secret-parameter service.
pub trait SecretStore: Send + Sync + fmt::Debug {
    /// Fetch the parameter called `name`, decrypting it when asked.
    ///
    /// # Errors
    ///
    /// Returns a [`ProviderError`] when the parameter is missing, access is
    /// denied, or the service cannot be reached.
    fn get_parameter(&self, name: &str, with_decryption: bool) -> Result<String, ProviderError>;
}

impl<S: SecretStore + ?Sized> SecretStore for Arc<S> {
    fn get_parameter(&self, name: &str, with_decryption: bool) -> Result<String, ProviderError> {
        (**self).get_parameter(name, with_decryption)
    }
}

impl<S: SecretStore + ?Sized> SecretStore for Box<S> {
    fn get_parameter(&self, name: &str, with_decryption: bool) -> Result<String, ProviderError> {
        (**self).get_parameter(name, with_decryption)
    }
}

/// Resolves `ssm:` placeholders through a [`SecretStore`].
///
/// The key is passed through verbatim, so `ssm:/path/to/secret` asks for
/// `/path/to/secret`.
#[derive(Clone, Debug)]
pub struct SecretStoreProvider<S> {
    store: S,
}

impl<S: SecretStore> SecretStoreProvider<S> {
    /// Wrap a store client.
    #[must_use]
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Borrow the underlying store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }
}

impl<S: SecretStore> Provider for SecretStoreProvider<S> {
    fn name(&self) -> &str {
        "secret-store"
    }

    fn resolve(&self, key: &str) -> Result<String, ProviderError> {
        self.store.get_parameter(key, true)
    }
}

/// Secret store held in memory.
///
/// Useful for local development and tests; missing names fail the same way
/// a remote store reports an unknown parameter.
#[derive(Clone, Debug, Default)]
pub struct InMemorySecretStore {
    parameters: BTreeMap<String, String>,
}

impl InMemorySecretStore {
    /// Create an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            parameters: BTreeMap::new(),
        }
    }

    /// Add a parameter.
    #[must_use]
    pub fn with_parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(name.into(), value.into());
        self
    }
}

impl SecretStore for InMemorySecretStore {
    fn get_parameter(&self, name: &str, _with_decryption: bool) -> Result<String, ProviderError> {
        self.parameters
            .get(name)
            .cloned()
            .ok_or_else(|| ProviderError::not_found(name))
    }
}
