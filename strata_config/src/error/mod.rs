//! Error types produced by the configuration pipeline.

mod constructors;
mod conversions;
mod provider;
mod types;

pub use provider::ProviderError;
pub use types::{StrataError, StrataResult};
