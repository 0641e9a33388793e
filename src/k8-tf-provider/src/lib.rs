//!
//! # Terraform provider for Cluster API and Karpenter resources
//!
//! Every kind is served twice: a data source reading the live object through a
//! [`MetadataClient`](k8_metadata_client::MetadataClient), and a manifest
//! rendering user configuration to YAML without any cluster access.
//!
mod datasource;
mod error;
mod kind;
mod manifest;
mod provider;
mod reader;
pub mod resources;

pub use datasource::KindDataSource;
pub use error::ProviderError;
pub use kind::{snake_case, type_name, TerraformKind};
pub use manifest::{KindManifest, MANIFEST_SUFFIX};
pub use provider::{Provider, ProviderConfig, PROVIDER_PREFIX};
pub use reader::{ReadResponse, Reader, ReaderVariant};

pub use k8_tf_schema as schema;
