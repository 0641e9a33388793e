use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use k8_types::Crd;
use k8_types::K8Obj;
use k8_types::Spec;

use crate::MetadataClient;
use crate::MetadataClientError;
use crate::NameSpace;

#[derive(Error, Debug)]
pub enum InMemoryError {
    #[error("Json error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("lock poison error")]
    LockPoisonError,
    #[error("{0} not found")]
    NotFound(String),
}

impl MetadataClientError for InMemoryError {
    fn not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ItemKey {
    group: String,
    version: String,
    plural: String,
    ns: String,
    name: String,
}

impl ItemKey {
    fn new(crd: &Crd, namespace: &NameSpace, name: &str) -> Self {
        let ns = match namespace {
            NameSpace::All => String::new(),
            NameSpace::Named(ns) => ns.clone(),
        };
        Self {
            group: crd.group.to_owned(),
            version: crd.version.to_owned(),
            plural: crd.names.plural.to_owned(),
            ns,
            name: name.to_owned(),
        }
    }
}

type ItemMap = HashMap<ItemKey, Value>;

/// Stores raw objects in memory, used as a stand-in for the API server
#[derive(Debug, Default)]
pub struct InMemoryClient {
    store: RwLock<ItemMap>,
}

impl InMemoryClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// store raw body, returned as is by `retrieve_object`
    pub fn insert_object(
        &self,
        crd: &Crd,
        namespace: NameSpace,
        name: &str,
        value: Value,
    ) -> Result<(), InMemoryError> {
        let key = ItemKey::new(crd, &namespace, name);
        let mut store = self
            .store
            .write()
            .map_err(|_| InMemoryError::LockPoisonError)?;
        store.insert(key, value);
        Ok(())
    }

    /// store typed item under its own name and namespace
    pub fn insert_item<S>(&self, item: &K8Obj<S>) -> Result<(), InMemoryError>
    where
        S: Spec,
    {
        let namespace = NameSpace::for_spec::<S>(&item.metadata.namespace);
        let value = serde_json::to_value(item)?;
        self.insert_object(S::metadata(), namespace, &item.metadata.name, value)
    }

    pub fn len(&self) -> usize {
        self.store.read().map(|store| store.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl MetadataClient for InMemoryClient {
    type MetadataClientError = InMemoryError;

    async fn retrieve_object(
        &self,
        crd: &Crd,
        namespace: NameSpace,
        name: &str,
    ) -> Result<Value, Self::MetadataClientError> {
        let key = ItemKey::new(crd, &namespace, name);
        let store = self
            .store
            .read()
            .map_err(|_| InMemoryError::LockPoisonError)?;
        debug!(plural = crd.names.plural, name, "in memory lookup");
        store
            .get(&key)
            .cloned()
            .ok_or_else(|| InMemoryError::NotFound(format!("{}/{}", crd.names.plural, name)))
    }
}
