//! Runtime loading entrypoints tying the pipeline stages together.

mod config;

use camino::{Utf8Path, Utf8PathBuf};
use serde::de::DeserializeOwned;

use crate::format::parse_source;
use crate::merge::LayerStack;
use crate::resolve::resolve_tree;
use crate::{FileService, LocalFileService, Provider, ProviderRegistry, Source, StrataResult};

pub use config::Config;

/// Reusable configuration loader.
///
/// A loader bundles the file service, the directory sources are read from,
/// and the provider registry. It holds no per-load state, so one loader can
/// serve any number of loads, including concurrent ones.
///
/// # Examples
///
/// ```rust
/// use strata_config::{
///     EnvProvider, InMemorySecretStore, Loader, MapEnvironment, MemoryFileService,
///     ProviderRegistry, SSM_PREFIX, SecretStoreProvider,
/// };
///
/// let files = MemoryFileService::new()
///     .with_file("conf/base.yaml", "db:\n  user: a\n  pass: env:DB_PASS\n  token: ssm:/app/token\n")
///     .with_file("conf/override.yaml", "db:\n  user: b\n");
/// let registry = ProviderRegistry::new()
///     .with_provider(
///         "env:",
///         EnvProvider::with_environment(MapEnvironment::new().with_var("DB_PASS", "secretpw")),
///     )?
///     .with_provider(
///         SSM_PREFIX,
///         SecretStoreProvider::new(InMemorySecretStore::new().with_parameter("/app/token", "t0k3n")),
///     )?;
///
/// let config = Loader::new("conf")
///     .with_file_service(files)
///     .with_registry(registry)
///     .build(["base.yaml", "override.yaml"])?;
///
/// assert_eq!(config.get("db.user").and_then(|v| v.as_str()), Some("b"));
/// assert_eq!(config.get("db.pass").and_then(|v| v.as_str()), Some("secretpw"));
/// assert_eq!(config.get("db.token").and_then(|v| v.as_str()), Some("t0k3n"));
/// # Ok::<_, std::sync::Arc<strata_config::StrataError>>(())
/// ```
#[derive(Debug)]
pub struct Loader<F = LocalFileService> {
    file_service: F,
    directory: Utf8PathBuf,
    registry: ProviderRegistry,
}

impl Loader {
    /// Loader reading from `directory` on the local filesystem, resolving
    /// only `env:` placeholders until another registry is supplied.
    #[must_use]
    pub fn new(directory: impl Into<Utf8PathBuf>) -> Self {
        Self {
            file_service: LocalFileService::new(),
            directory: directory.into(),
            registry: ProviderRegistry::environment_only(),
        }
    }
}

impl<F: FileService> Loader<F> {
    /// Swap the file service, keeping the directory and registry.
    #[must_use]
    pub fn with_file_service<G: FileService>(self, file_service: G) -> Loader<G> {
        Loader {
            file_service,
            directory: self.directory,
            registry: self.registry,
        }
    }

    /// Replace the provider registry.
    #[must_use]
    pub fn with_registry(mut self, registry: ProviderRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Register one more provider.
    ///
    /// # Errors
    ///
    /// Returns [`crate::StrataError::Registry`] when `prefix` clashes with
    /// an existing one.
    pub fn with_provider<P>(mut self, prefix: impl Into<String>, provider: P) -> StrataResult<Self>
    where
        P: Provider + 'static,
    {
        self.registry.register(prefix, provider)?;
        Ok(self)
    }

    /// Directory that source names are resolved against.
    #[must_use]
    pub fn directory(&self) -> &Utf8Path {
        &self.directory
    }

    /// The registry used for placeholder resolution.
    #[must_use]
    pub const fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// Read, parse, merge and resolve `sources`, ordered lowest to highest
    /// priority.
    ///
    /// # Errors
    ///
    /// Fails fast with the first [`crate::StrataError::Io`],
    /// [`crate::StrataError::Parse`] or [`crate::StrataError::Resolution`]
    /// encountered.
    pub fn build<I, S>(&self, sources: I) -> StrataResult<Config>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut stack = LayerStack::new();
        for name in sources {
            let source = Source::read(&self.file_service, &self.directory, name.as_ref())?;
            let layer_name = source.path().to_path_buf();
            stack.push(layer_name, parse_source(source)?);
        }
        let resolved = resolve_tree(stack.merge(), &self.registry)?;
        Ok(Config::new(resolved))
    }

    /// Like [`Loader::build`], then deserialise the result into `T`.
    ///
    /// # Errors
    ///
    /// As [`Loader::build`], plus [`crate::StrataError::Conversion`] when
    /// the resolved tree does not fit `T`.
    pub fn load<T, I, S>(&self, sources: I) -> StrataResult<T>
    where
        T: DeserializeOwned,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.build(sources)?.extract()
    }
}

/// Build a resolved [`Config`] from `sources` under `directory`.
///
/// `sources` are ordered lowest to highest priority.
///
/// # Errors
///
/// See [`Loader::build`].
pub fn build<F, I, S>(
    file_service: F,
    registry: ProviderRegistry,
    directory: impl Into<Utf8PathBuf>,
    sources: I,
) -> StrataResult<Config>
where
    F: FileService,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    Loader::new(directory)
        .with_file_service(file_service)
        .with_registry(registry)
        .build(sources)
}

/// Load `sources` under `directory` straight into `T`.
///
/// `sources` are ordered lowest to highest priority.
///
/// # Errors
///
/// See [`Loader::load`].
pub fn load<T, F, I, S>(
    file_service: F,
    registry: ProviderRegistry,
    directory: impl Into<Utf8PathBuf>,
    sources: I,
) -> StrataResult<T>
where
    T: DeserializeOwned,
    F: FileService,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    build(file_service, registry, directory, sources)?.extract()
}

#[cfg(test)]
mod tests;
