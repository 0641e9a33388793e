use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use k8_metadata_client::MetadataClient;
use k8_tf_schema::{Attribute, AttributeType, Diagnostics, Schema, Validator};
use k8_types::Spec;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReaderVariant {
    /// live lookup against the API server
    DataSource,
    /// local YAML rendering
    Manifest,
}

/// outcome of a read, state is absent when an error was reported
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReadResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<Value>,
    pub diagnostics: Diagnostics,
}

impl ReadResponse {
    pub fn state(state: Value) -> Self {
        Self {
            state: Some(state),
            diagnostics: Diagnostics::new(),
        }
    }

    pub fn failed(diagnostics: impl Into<Diagnostics>) -> Self {
        Self {
            state: None,
            diagnostics: diagnostics.into(),
        }
    }

    pub fn has_error(&self) -> bool {
        self.diagnostics.has_error()
    }
}

#[async_trait]
pub trait Reader<C>: Send + Sync
where
    C: MetadataClient,
{
    /// type name without provider prefix
    fn type_name(&self) -> String;

    fn variant(&self) -> ReaderVariant;

    fn schema(&self) -> Schema;

    /// client is `None` when the provider is offline
    async fn read(&self, client: Option<&C>, config: &Value) -> ReadResponse;
}

/// `metadata` block, `configurable` adds optional labels and annotations
pub(crate) fn metadata_attribute<S: Spec>(configurable: bool) -> Attribute {
    let mut attributes = vec![Attribute::required("name", AttributeType::String)
        .description("Unique name of the resource.")
        .validator(Validator::Name)];
    if S::NAME_SPACED {
        attributes.push(
            Attribute::required("namespace", AttributeType::String)
                .description("Namespace the resource belongs to.")
                .validator(Validator::Namespace),
        );
    }
    if configurable {
        attributes.push(
            Attribute::optional("labels", AttributeType::map(AttributeType::String))
                .description("Map of string keys and values that can be used to organize and categorize objects.")
                .validator(Validator::LabelKeys)
                .validator(Validator::LabelValues),
        );
        attributes.push(
            Attribute::optional("annotations", AttributeType::map(AttributeType::String))
                .description("Unstructured key value map stored with a resource that may be set by external tools.")
                .validator(Validator::AnnotationKeys),
        );
    } else {
        attributes.push(
            Attribute::computed("labels", AttributeType::map(AttributeType::String))
                .description("Labels of the resource."),
        );
        attributes.push(
            Attribute::computed("annotations", AttributeType::map(AttributeType::String))
                .description("Annotations of the resource."),
        );
    }

    Attribute::required("metadata", AttributeType::Object(attributes))
        .description("Data that helps uniquely identify this object.")
}

/// `ns/name` or `name` for cluster scoped kinds
pub(crate) fn object_id<S: Spec>(name: &str, namespace: &str) -> String {
    if S::NAME_SPACED {
        format!("{namespace}/{name}")
    } else {
        name.to_owned()
    }
}
