//! Placeholder providers and the prefix registry that dispatches to them.
//!
//! A placeholder is a string leaf starting with a registered prefix, such as
//! `env:HOME` or `ssm:/prod/db/password`. The registry maps each prefix to a
//! [`Provider`]; the resolver strips the prefix and hands the remainder to
//! that provider. Adding a provider is a registration, not a code change:
//!
//! ```rust
//! use strata_config::{Provider, ProviderError, ProviderRegistry};
//!
//! #[derive(Debug)]
//! struct Upper;
//!
//! impl Provider for Upper {
//!     fn name(&self) -> &str {
//!         "upper"
//!     }
//!
//!     fn resolve(&self, key: &str) -> Result<String, ProviderError> {
//!         Ok(key.to_uppercase())
//!     }
//! }
//!
//! let mut registry = ProviderRegistry::environment_only();
//! registry.register("upper:", Upper)?;
//! assert_eq!(registry.prefixes().collect::<Vec<_>>(), ["env:", "upper:"]);
//! # Ok::<_, std::sync::Arc<strata_config::StrataError>>(())
//! ```

#[cfg(feature = "aws")]
mod aws;
mod env;
mod registry;
mod secret;

use std::fmt;
use std::sync::Arc;

use crate::ProviderError;

#[cfg(feature = "aws")]
pub use aws::{AwsParameterStore, DEFAULT_REGION};
pub use env::{ENV_PREFIX, EnvProvider, Environment, MapEnvironment, ProcessEnvironment};
pub use registry::{Dispatch, ProviderRegistry};
pub use secret::{InMemorySecretStore, SSM_PREFIX, SecretStore, SecretStoreProvider};

/// Capability that turns a placeholder key into its concrete value.
///
/// Implementations must be shareable across threads so a single registry
/// can serve concurrent loads.
pub trait Provider: Send + Sync + fmt::Debug {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// Resolve `key`, the placeholder text after the prefix.
    ///
    /// # Errors
    ///
    /// Returns a [`ProviderError`] when the value cannot be produced.
    fn resolve(&self, key: &str) -> Result<String, ProviderError>;
}

impl<P: Provider + ?Sized> Provider for Box<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn resolve(&self, key: &str) -> Result<String, ProviderError> {
        (**self).resolve(key)
    }
}

impl<P: Provider + ?Sized> Provider for Arc<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn resolve(&self, key: &str) -> Result<String, ProviderError> {
        (**self).resolve(key)
    }
}
