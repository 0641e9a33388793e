use std::path::PathBuf;
use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;
use tracing::info;

use k8_client::K8Client;
use k8_config::K8Config;
use k8_config::LoadOptions;
use k8_metadata_client::MetadataClient;
use k8_tf_schema::{validate_config, Diagnostic, Diagnostics};
use k8_tf_schema::{Attribute, AttributeType, Schema};

use crate::resources::{readers, Readers};
use crate::{ProviderError, ReadResponse, Reader, ReaderVariant};

/// prefix of every type name exposed by the provider
pub const PROVIDER_PREFIX: &str = "k8s_";

/// provider block
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// no client, data sources fail and manifests keep working
    pub offline: bool,
    pub kubeconfig: Option<PathBuf>,
    pub context: Option<String>,
}

impl ProviderConfig {
    pub fn schema() -> Schema {
        Schema::new(
            "Provider for Cluster API and Karpenter custom resources.",
            vec![
                Attribute::optional("offline", AttributeType::Bool)
                    .description("Skip connecting to a cluster. Data sources fail, manifests still render."),
                Attribute::optional("kubeconfig", AttributeType::String)
                    .description("Path to the kubeconfig file. Defaults to $KUBECONFIG, then ~/.kube/config."),
                Attribute::optional("context", AttributeType::String)
                    .description("Context of the kubeconfig to use instead of current-context."),
            ],
        )
    }

    /// validate and decode, null means defaults
    pub fn from_value(value: &Value) -> Result<Self, Diagnostics> {
        if value.is_null() {
            return Ok(Self::default());
        }
        let diagnostics = validate_config(&Self::schema().attributes, value);
        if diagnostics.has_error() {
            return Err(diagnostics);
        }
        // nulls are allowed for every attribute
        let object: serde_json::Map<String, Value> = value
            .as_object()
            .map(|object| {
                object
                    .iter()
                    .filter(|(_, v)| !v.is_null())
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect()
            })
            .unwrap_or_default();
        serde_json::from_value(Value::Object(object)).map_err(|err| {
            Diagnostics::from(Diagnostic::error(
                "Invalid provider configuration",
                err.to_string(),
            ))
        })
    }

    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            kubeconfig: self.kubeconfig.clone(),
            context: self.context.clone(),
        }
    }
}

/// Registry of readers plus the client they share
pub struct Provider<C>
where
    C: MetadataClient + 'static,
{
    client: Option<Arc<C>>,
    readers: Readers<C>,
}

impl<C> Provider<C>
where
    C: MetadataClient + 'static,
{
    pub fn offline() -> Self {
        Self {
            client: None,
            readers: readers(),
        }
    }

    pub fn with_client(client: Arc<C>) -> Self {
        Self {
            client: Some(client),
            readers: readers(),
        }
    }

    pub fn is_offline(&self) -> bool {
        self.client.is_none()
    }

    /// full type names, e.g. `k8s_cluster_x_k8s_io_cluster_v1beta1`
    pub fn type_names(&self) -> Vec<String> {
        self.readers
            .iter()
            .map(|reader| format!("{PROVIDER_PREFIX}{}", reader.type_name()))
            .collect()
    }

    /// accepts the name with or without prefix
    pub fn reader(&self, name: &str) -> Option<&dyn Reader<C>> {
        let name = name.strip_prefix(PROVIDER_PREFIX).unwrap_or(name);
        self.readers
            .iter()
            .find(|reader| reader.type_name() == name)
            .map(|reader| reader.as_ref())
    }

    /// only data sources talk to the cluster, manifests and unknown types never do
    pub fn needs_client(&self, name: &str) -> bool {
        self.reader(name)
            .is_some_and(|reader| reader.variant() == ReaderVariant::DataSource)
    }

    pub fn schema(&self, name: &str) -> Option<Schema> {
        self.reader(name).map(|reader| reader.schema())
    }

    pub async fn read(&self, name: &str, config: &Value) -> ReadResponse {
        let Some(reader) = self.reader(name) else {
            return ReadResponse::failed(Diagnostic::error(
                "Unknown type",
                format!("The provider does not support the type \"{name}\"."),
            ));
        };
        debug!(name, variant = ?reader.variant(), "read");
        reader.read(self.client.as_deref(), config).await
    }
}

impl Provider<K8Client> {
    /// offline provider, or one connected with the resolved kubernetes config.
    /// Loading runs on the blocking pool since exec credential plugins are spawned and awaited synchronously.
    pub async fn configure(config: &ProviderConfig) -> Result<Self, ProviderError> {
        if config.offline {
            info!("provider running offline");
            return Ok(Self::offline());
        }
        let options = config.load_options();
        let client = tokio::task::spawn_blocking(move || -> Result<K8Client, ProviderError> {
            let k8_config = K8Config::load_with(&options)?;
            Ok(K8Client::new(k8_config)?)
        })
        .await??;
        info!(host = client.hostname(), "provider configured");
        Ok(Self::with_client(Arc::new(client)))
    }
}

#[cfg(test)]
mod test {

    use serde_json::json;

    use k8_metadata_client::InMemoryClient;

    use crate::ProviderError;

    use super::{Provider, ProviderConfig};

    #[test]
    fn test_provider_config() {
        let config = ProviderConfig::from_value(&json!({
            "offline": true,
            "context": "kind-demo",
            "kubeconfig": null
        }))
        .expect("config");
        assert!(config.offline);
        assert_eq!(config.context.as_deref(), Some("kind-demo"));
        assert!(config.kubeconfig.is_none());

        assert_eq!(
            ProviderConfig::from_value(&serde_json::Value::Null).expect("default"),
            ProviderConfig::default()
        );

        let diagnostics =
            ProviderConfig::from_value(&json!({ "offline": "yes", "host": "x" })).expect_err("invalid");
        assert_eq!(diagnostics.len(), 2);
    }

    #[test]
    fn test_type_names() {
        let provider = Provider::<InMemoryClient>::offline();
        let names = provider.type_names();
        assert_eq!(names.len(), 12);
        assert!(names.iter().all(|name| name.starts_with("k8s_")));
        assert!(names.contains(&"k8s_cluster_x_k8s_io_cluster_v1beta1".to_owned()));
        assert!(names.contains(&"k8s_karpenter_sh_node_pool_v1beta1_manifest".to_owned()));
    }

    #[test]
    fn test_needs_client() {
        let provider = Provider::<InMemoryClient>::offline();
        assert!(provider.needs_client("k8s_cluster_x_k8s_io_cluster_v1beta1"));
        assert!(provider.needs_client("karpenter_sh_node_pool_v1beta1"));
        assert!(!provider.needs_client("k8s_cluster_x_k8s_io_cluster_v1beta1_manifest"));
        assert!(!provider.needs_client("k8s_karpenter_sh_node_pool_v1beta1_manifest"));
        assert!(!provider.needs_client("k8s_core_pod_v1"));
    }

    #[tokio::test]
    async fn test_configure_offline() {
        let config = ProviderConfig {
            offline: true,
            kubeconfig: Some("/nonexistent/kubeconfig".into()),
            context: None,
        };
        let provider = Provider::configure(&config).await.expect("offline");
        assert!(provider.is_offline());
    }

    #[tokio::test]
    async fn test_configure_missing_kubeconfig() {
        let config = ProviderConfig {
            kubeconfig: Some("/nonexistent/kubeconfig".into()),
            ..Default::default()
        };
        let err = Provider::configure(&config).await.err().expect("missing file");
        assert!(matches!(err, ProviderError::ConfigError(_)), "{err}");
    }

    #[test]
    fn test_reader_lookup() {
        let provider = Provider::<InMemoryClient>::offline();
        assert!(provider.is_offline());
        assert!(provider
            .reader("k8s_karpenter_k8s_aws_ec2_node_class_v1beta1")
            .is_some());
        assert!(provider
            .reader("karpenter_k8s_aws_ec2_node_class_v1beta1")
            .is_some());
        assert!(provider.reader("k8s_core_pod_v1").is_none());

        let schema = provider
            .schema("cluster_x_k8s_io_machine_health_check_v1beta1")
            .expect("schema");
        let range = schema.attribute("spec.unhealthy_range").expect("range");
        assert!(range.validators.is_empty());

        let schema = provider
            .schema("cluster_x_k8s_io_machine_health_check_v1beta1_manifest")
            .expect("schema");
        let range = schema.attribute("spec.unhealthy_range").expect("range");
        assert_eq!(range.validators.len(), 1);
        assert!(schema.attribute("metadata.namespace").expect("ns").is_required());
    }
}
