use std::marker::PhantomData;

use async_trait::async_trait;
use serde_json::json;
use serde_json::Map;
use serde_json::Value;
use tracing::debug;
use tracing::instrument;

use k8_metadata_client::MetadataClient;
use k8_metadata_client::NameSpace;
use k8_tf_schema::{from_kubernetes, validate_config};
use k8_tf_schema::{get_error, json_unmarshal_error, offline_error};
use k8_tf_schema::{Attribute, AttributeType, Schema};
use k8_types::K8Obj;

use crate::kind::type_name;
use crate::reader::{metadata_attribute, object_id};
use crate::{ReadResponse, Reader, ReaderVariant, TerraformKind};

/// Looks up a live object of kind `S`
pub struct KindDataSource<S>(PhantomData<fn() -> S>);

impl<S> Default for KindDataSource<S> {
    fn default() -> Self {
        Self(PhantomData)
    }
}

impl<S> KindDataSource<S>
where
    S: TerraformKind,
{
    pub fn new() -> Self {
        Self::default()
    }

    fn spec_attribute() -> Attribute {
        Attribute::optional("spec", AttributeType::Object(S::spec_attributes()))
            .description("Specification of the desired behavior of the resource.")
            .into_computed()
    }

    fn build_schema() -> Schema {
        Schema::new(
            S::DESCRIPTION,
            vec![
                Attribute::computed("id", AttributeType::String)
                    .description("Contains the value `metadata.namespace/metadata.name`."),
                Attribute::computed("api_version", AttributeType::String)
                    .description("The API group of the requested resource."),
                Attribute::computed("kind", AttributeType::String)
                    .description("The type of the requested resource."),
                metadata_attribute::<S>(false),
                Self::spec_attribute(),
            ],
        )
    }

    fn state(obj: K8Obj<S>) -> Result<Value, serde_json::Error> {
        let mut metadata = Map::new();
        metadata.insert("name".to_owned(), Value::from(obj.metadata.name.clone()));
        if S::NAME_SPACED {
            metadata.insert(
                "namespace".to_owned(),
                Value::from(obj.metadata.namespace.clone()),
            );
        }
        metadata.insert(
            "labels".to_owned(),
            if obj.metadata.labels.is_empty() {
                Value::Null
            } else {
                serde_json::to_value(&obj.metadata.labels)?
            },
        );
        metadata.insert(
            "annotations".to_owned(),
            if obj.metadata.annotations.is_empty() {
                Value::Null
            } else {
                serde_json::to_value(&obj.metadata.annotations)?
            },
        );

        let spec = serde_json::to_value(&obj.spec)?;

        Ok(json!({
            "id": object_id::<S>(&obj.metadata.name, &obj.metadata.namespace),
            "api_version": obj.api_version,
            "kind": obj.kind,
            "metadata": metadata,
            "spec": from_kubernetes(&S::spec_attributes(), &spec),
        }))
    }
}

#[async_trait]
impl<C, S> Reader<C> for KindDataSource<S>
where
    C: MetadataClient,
    S: TerraformKind,
{
    fn type_name(&self) -> String {
        type_name::<S>()
    }

    fn variant(&self) -> ReaderVariant {
        ReaderVariant::DataSource
    }

    fn schema(&self) -> Schema {
        Self::build_schema()
    }

    #[instrument(skip_all, fields(kind = S::label()))]
    async fn read(&self, client: Option<&C>, config: &Value) -> ReadResponse {
        let Some(client) = client else {
            return ReadResponse::failed(offline_error());
        };

        let diagnostics = validate_config(&Self::build_schema().attributes, config);
        if diagnostics.has_error() {
            debug!(count = diagnostics.len(), "invalid data source configuration");
            return ReadResponse::failed(diagnostics);
        }

        let name = config
            .pointer("/metadata/name")
            .and_then(Value::as_str)
            .unwrap_or_default();
        let namespace = config
            .pointer("/metadata/namespace")
            .and_then(Value::as_str)
            .unwrap_or_default();
        debug!(name, namespace, "reading data source");

        let value = match client
            .retrieve_object(S::metadata(), NameSpace::for_spec::<S>(namespace), name)
            .await
        {
            Ok(value) => value,
            Err(err) => return ReadResponse::failed(get_error(&err)),
        };

        let obj: K8Obj<S> = match serde_json::from_value(value) {
            Ok(obj) => obj,
            Err(err) => return ReadResponse::failed(json_unmarshal_error(&err)),
        };

        match Self::state(obj) {
            Ok(state) => ReadResponse::state(state),
            Err(err) => ReadResponse::failed(json_unmarshal_error(&err)),
        }
    }
}
