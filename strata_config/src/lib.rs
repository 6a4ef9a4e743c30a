//! Layered configuration loading with placeholder resolution.
//!
//! `strata_config` reads an ordered list of configuration documents, merges
//! them so that later sources override earlier ones key-by-key, and replaces
//! placeholder strings such as `env:DB_PASS` or `ssm:/prod/db/password` with
//! values fetched from registered providers. The resolved tree can be
//! inspected dynamically through [`Config`] or deserialised into any type
//! implementing [`serde::de::DeserializeOwned`].
//!
//! The pipeline has three stages, each exposed for callers that need to
//! drive them separately:
//!
//! 1. [`format::parse_source`] turns raw bytes into a [`ConfigTree`].
//! 2. [`merge::merge_layers`] folds the parsed trees in priority order.
//! 3. [`resolve::resolve_tree`] swaps placeholders for provider values.
//!
//! # Example
//!
//! ```rust
//! use serde::Deserialize;
//! use strata_config::{Loader, MemoryFileService, ProviderRegistry};
//!
//! #[derive(Debug, Deserialize)]
//! struct Database {
//!     user: String,
//! }
//!
//! #[derive(Debug, Deserialize)]
//! struct AppConfig {
//!     db: Database,
//! }
//!
//! let files = MemoryFileService::new()
//!     .with_file("conf/base.yaml", "db:\n  user: alice\n")
//!     .with_file("conf/local.yaml", "db:\n  user: bob\n");
//!
//! let config: AppConfig = Loader::new("conf")
//!     .with_file_service(files)
//!     .with_registry(ProviderRegistry::environment_only())
//!     .load(["base.yaml", "local.yaml"])?;
//! assert_eq!(config.db.user, "bob");
//! # Ok::<_, std::sync::Arc<strata_config::StrataError>>(())
//! ```

mod error;
pub mod format;
mod loader;
pub mod merge;
pub mod provider;
pub mod resolve;
mod result_ext;
pub mod source;
mod tree;

pub use error::{ProviderError, StrataError, StrataResult};
pub use format::DocumentFormat;
pub use loader::{Config, Loader, build, load};
pub use merge::{LayerStack, SourceLayer, merge_value};
pub use provider::{
    ENV_PREFIX, EnvProvider, Environment, InMemorySecretStore, MapEnvironment,
    ProcessEnvironment, Provider, ProviderRegistry, SSM_PREFIX, SecretStore,
    SecretStoreProvider,
};
#[cfg(feature = "aws")]
pub use provider::AwsParameterStore;
pub use result_ext::StrataResultExt;
pub use source::{FileService, LocalFileService, MemoryFileService, Source};
pub use tree::{ConfigTree, KeyPath, Mapping, PathSegment, Scalar};
