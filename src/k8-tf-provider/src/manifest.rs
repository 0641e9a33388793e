use std::marker::PhantomData;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;
use tracing::instrument;
use tracing::trace;

use k8_metadata_client::MetadataClient;
use k8_tf_schema::{conversion_error, json_unmarshal_error, yaml_marshal_error};
use k8_tf_schema::{to_kubernetes, validate_config};
use k8_tf_schema::{Attribute, AttributeMode, AttributeType, Schema};
use k8_types::ManifestObj;

use crate::kind::type_name;
use crate::reader::{metadata_attribute, object_id};
use crate::{ReadResponse, Reader, ReaderVariant, TerraformKind};

pub const MANIFEST_SUFFIX: &str = "_manifest";

/// Renders configuration of kind `S` as a YAML manifest, never contacts the cluster
pub struct KindManifest<S>(PhantomData<fn() -> S>);

impl<S> Default for KindManifest<S> {
    fn default() -> Self {
        Self(PhantomData)
    }
}

impl<S> KindManifest<S>
where
    S: TerraformKind,
{
    pub fn new() -> Self {
        Self::default()
    }

    fn build_schema() -> Schema {
        let spec = Attribute::new(
            "spec",
            AttributeType::Object(S::spec_attributes()),
            if S::SPEC_REQUIRED {
                AttributeMode::Required
            } else {
                AttributeMode::Optional
            },
        )
        .description("Specification of the desired behavior of the resource.");

        Schema::new(
            format!("{} Renders the resource as a YAML manifest.", S::DESCRIPTION),
            vec![
                Attribute::computed("id", AttributeType::String)
                    .description("Contains the value `metadata.namespace/metadata.name`."),
                Attribute::computed("yaml", AttributeType::String)
                    .description("The generated manifest in YAML format."),
                metadata_attribute::<S>(true),
                spec,
            ],
        )
    }

    /// configuration to YAML, failures are reported as diagnostics
    fn render(attributes: &[Attribute], config: &Value) -> Result<String, ReadResponse> {
        let mut value = to_kubernetes(attributes, config)
            .map_err(|err| ReadResponse::failed(conversion_error(&err)))?;
        if let Value::Object(object) = &mut value {
            object.insert("apiVersion".to_owned(), Value::from(S::api_version()));
            object.insert("kind".to_owned(), Value::from(S::kind()));
        }
        trace!(%value, "manifest object");

        let manifest: ManifestObj<S> = serde_json::from_value(value)
            .map_err(|err| ReadResponse::failed(json_unmarshal_error(&err)))?;
        serde_yaml::to_string(&manifest).map_err(|err| ReadResponse::failed(yaml_marshal_error(&err)))
    }
}

#[async_trait]
impl<C, S> Reader<C> for KindManifest<S>
where
    C: MetadataClient,
    S: TerraformKind,
{
    fn type_name(&self) -> String {
        format!("{}{MANIFEST_SUFFIX}", type_name::<S>())
    }

    fn variant(&self) -> ReaderVariant {
        ReaderVariant::Manifest
    }

    fn schema(&self) -> Schema {
        Self::build_schema()
    }

    #[instrument(skip_all, fields(kind = S::label()))]
    async fn read(&self, _client: Option<&C>, config: &Value) -> ReadResponse {
        let schema = Self::build_schema();
        let diagnostics = validate_config(&schema.attributes, config);
        if diagnostics.has_error() {
            debug!(count = diagnostics.len(), "invalid manifest configuration");
            return ReadResponse::failed(diagnostics);
        }

        let yaml = match Self::render(&schema.attributes, config) {
            Ok(yaml) => yaml,
            Err(response) => return response,
        };

        let name = config
            .pointer("/metadata/name")
            .and_then(Value::as_str)
            .unwrap_or_default();
        let namespace = config
            .pointer("/metadata/namespace")
            .and_then(Value::as_str)
            .unwrap_or_default();

        let mut state = config.clone();
        if let Value::Object(object) = &mut state {
            object.insert("id".to_owned(), Value::from(object_id::<S>(name, namespace)));
            object.insert("yaml".to_owned(), Value::from(yaml));
        }
        ReadResponse::state(state)
    }
}
