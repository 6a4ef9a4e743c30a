//! AWS Systems Manager Parameter Store client.
//!
//! Compiled with the `aws` feature. The SDK client is built once and reused
//! for every lookup; a private current-thread runtime drives the async SDK
//! from the synchronous pipeline, so these methods must not be called from
//! inside another async runtime.

use aws_sdk_ssm::{Client, config::Region};
use tokio::runtime::{Builder, Runtime};

use super::SecretStore;
use crate::ProviderError;

/// Region used when neither the caller nor the AWS config chain names one.
pub const DEFAULT_REGION: &str = "ap-southeast-2";

/// [`SecretStore`] backed by AWS SSM `GetParameter`.
#[derive(Debug)]
pub struct AwsParameterStore {
    client: Client,
    runtime: Runtime,
}

impl AwsParameterStore {
    /// Build a client from the default AWS configuration chain (environment,
    /// shared config and credentials files, instance metadata).
    ///
    /// # Errors
    ///
    /// Returns a [`ProviderError`] when the async runtime cannot start.
    pub fn from_env() -> Result<Self, ProviderError> {
        Self::build(None)
    }

    /// Build a client pinned to `region`.
    ///
    /// # Errors
    ///
    /// Returns a [`ProviderError`] when the async runtime cannot start.
    pub fn with_region(region: impl Into<String>) -> Result<Self, ProviderError> {
        Self::build(Some(Region::new(region.into())))
    }

    /// Wrap an existing SDK client.
    ///
    /// # Errors
    ///
    /// Returns a [`ProviderError`] when the async runtime cannot start.
    pub fn from_client(client: Client) -> Result<Self, ProviderError> {
        Ok(Self {
            client,
            runtime: runtime()?,
        })
    }

    fn build(explicit: Option<Region>) -> Result<Self, ProviderError> {
        let runtime = runtime()?;
        let region = aws_config::meta::region::RegionProviderChain::first_try(explicit)
            .or_default_provider()
            .or_else(Region::new(DEFAULT_REGION));
        let config = runtime.block_on(
            aws_config::defaults(aws_config::BehaviorVersion::latest())
                .region(region)
                .load(),
        );
        Ok(Self {
            client: Client::new(&config),
            runtime,
        })
    }
}

fn runtime() -> Result<Runtime, ProviderError> {
    Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| ProviderError::with_source("failed to start AWS client runtime", err))
}

impl SecretStore for AwsParameterStore {
    fn get_parameter(&self, name: &str, with_decryption: bool) -> Result<String, ProviderError> {
        let request = self
            .client
            .get_parameter()
            .name(name)
            .with_decryption(with_decryption)
            .send();
        let output = self.runtime.block_on(request).map_err(|err| {
            ProviderError::with_source(format!("GetParameter failed for '{name}'"), err)
        })?;
        output
            .parameter()
            .and_then(|parameter| parameter.value())
            .map(str::to_owned)
            .ok_or_else(|| ProviderError::new(format!("parameter '{name}' has no value")))
    }
}
