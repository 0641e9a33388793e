use thiserror::Error;

use k8_client::ClientError;
use k8_config::ConfigError;

/// failure to set up the provider, reads report diagnostics instead
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Kubernetes config error: {0}")]
    ConfigError(#[from] ConfigError),
    #[error("Kubernetes client error: {0}")]
    ClientError(#[from] ClientError),
    #[error("Provider configuration task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
