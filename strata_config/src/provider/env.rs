//! Environment variable provider.
//!
//! Lookups go through the [`Environment`] capability rather than straight to
//! the process, so tests can substitute a deterministic map.

use std::collections::BTreeMap;
use std::env::VarError;
use std::fmt;

use super::Provider;
use crate::ProviderError;

/// Prefix under which [`EnvProvider`] is registered by default.
pub const ENV_PREFIX: &str = "env:";

/// Capability for reading environment variables.
pub trait Environment: Send + Sync + fmt::Debug {
    /// Read `key`, returning `Ok(None)` when it is unset.
    ///
    /// # Errors
    ///
    /// Returns a [`ProviderError`] when the variable exists but cannot be
    /// represented as a string.
    fn var(&self, key: &str) -> Result<Option<String>, ProviderError>;
}

/// The real process environment.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessEnvironment;

impl Environment for ProcessEnvironment {
    fn var(&self, key: &str) -> Result<Option<String>, ProviderError> {
        match std::env::var(key) {
            Ok(value) => Ok(Some(value)),
            Err(VarError::NotPresent) => Ok(None),
            Err(err @ VarError::NotUnicode(_)) => Err(ProviderError::with_source(
                format!("environment variable '{key}' is not valid UTF-8"),
                err,
            )),
        }
    }
}

/// A fixed set of variables, for tests and embedded defaults.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MapEnvironment {
    vars: BTreeMap<String, String>,
}

impl MapEnvironment {
    /// Create an environment with no variables set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            vars: BTreeMap::new(),
        }
    }

    /// Set `key` to `value`.
    #[must_use]
    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }
}

impl<K, V> FromIterator<(K, V)> for MapEnvironment
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

impl Environment for MapEnvironment {
    fn var(&self, key: &str) -> Result<Option<String>, ProviderError> {
        Ok(self.vars.get(key).cloned())
    }
}

/// Resolves `env:` placeholders.
///
/// An unset variable resolves to the empty string rather than failing.
#[derive(Clone, Debug, Default)]
pub struct EnvProvider<E = ProcessEnvironment> {
    environment: E,
}

impl EnvProvider {
    /// Provider backed by the process environment.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            environment: ProcessEnvironment,
        }
    }
}

impl<E: Environment> EnvProvider<E> {
    /// Provider backed by an injected environment.
    #[must_use]
    pub const fn with_environment(environment: E) -> Self {
        Self { environment }
    }
}

impl<E: Environment> Provider for EnvProvider<E> {
    fn name(&self) -> &str {
        "env"
    }

    fn resolve(&self, key: &str) -> Result<String, ProviderError> {
        Ok(self.environment.var(key)?.unwrap_or_default())
    }
}
