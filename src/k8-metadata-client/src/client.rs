use std::fmt::Debug;
use std::fmt::Display;

use async_trait::async_trait;
use serde_json::Error as SerdeJsonError;
use serde_json::Value;
use tracing::debug;
use tracing::trace;

use k8_types::Crd;
use k8_types::K8Meta;
use k8_types::K8Obj;
use k8_types::Spec;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameSpace {
    /// cluster scoped, or across all namespaces
    All,
    Named(String),
}

impl NameSpace {
    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    pub fn named(&self) -> &str {
        match self {
            Self::All => "all",
            Self::Named(name) => name,
        }
    }

    /// namespace used to address an object of `S`
    pub fn for_spec<S: Spec>(namespace: &str) -> Self {
        if S::NAME_SPACED {
            Self::Named(namespace.to_owned())
        } else {
            Self::All
        }
    }
}

impl From<String> for NameSpace {
    fn from(namespace: String) -> Self {
        NameSpace::Named(namespace)
    }
}

impl From<&str> for NameSpace {
    fn from(namespace: &str) -> Self {
        NameSpace::Named(namespace.to_owned())
    }
}

pub trait MetadataClientError: Debug + Display {
    /// object does not exist
    fn not_found(&self) -> bool;
}

/// Dynamic client: objects are addressed by group, version and resource
/// and returned as untyped JSON.
#[async_trait]
pub trait MetadataClient: Send + Sync {
    type MetadataClientError: MetadataClientError + Send + From<SerdeJsonError>;

    /// retrieve a single object as raw JSON
    async fn retrieve_object(
        &self,
        crd: &Crd,
        namespace: NameSpace,
        name: &str,
    ) -> Result<Value, Self::MetadataClientError>;

    /// retrieve a single item and decode it as `S`
    async fn retrieve_item<S, M>(&self, metadata: &M) -> Result<K8Obj<S>, Self::MetadataClientError>
    where
        S: Spec,
        M: K8Meta + Send + Sync,
    {
        let namespace = NameSpace::for_spec::<S>(metadata.namespace());
        debug!(
            "{}: retrieving '{}' in {}",
            S::label(),
            metadata.name(),
            namespace.named()
        );
        let value = self
            .retrieve_object(S::metadata(), namespace, metadata.name())
            .await?;
        trace!("{}: raw object {:#?}", S::label(), value);
        Ok(serde_json::from_value(value)?)
    }
}
