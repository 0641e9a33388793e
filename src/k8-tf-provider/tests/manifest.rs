use serde_json::json;
use serde_json::Value;

use k8_metadata_client::InMemoryClient;
use k8_tf_provider::Provider;
use k8_types::capi::machine_health_check::MachineHealthCheckSpec;
use k8_types::karpenter::ec2_node_class::Ec2NodeClassSpec;
use k8_types::karpenter::node_pool::NodePoolSpec;
use k8_types::Int32OrString;
use k8_types::ManifestObj;
use k8_types::Quantity;

const MHC_MANIFEST: &str = "k8s_cluster_x_k8s_io_machine_health_check_v1beta1_manifest";
const EC2_MANIFEST: &str = "k8s_karpenter_k8s_aws_ec2_node_class_v1beta1_manifest";
const NODE_POOL_MANIFEST: &str = "k8s_karpenter_sh_node_pool_v1beta1_manifest";
const CLUSTER_MANIFEST: &str = "k8s_cluster_x_k8s_io_cluster_v1beta1_manifest";

fn fixture(name: &str) -> Value {
    let path = format!("{}/data/{name}", env!("CARGO_MANIFEST_DIR"));
    let content = std::fs::read_to_string(&path).expect("fixture");
    serde_yaml::from_str(&content).expect("yaml fixture")
}

fn provider() -> Provider<InMemoryClient> {
    Provider::offline()
}

#[tokio::test]
async fn test_machine_health_check_manifest() {
    let config = fixture("machine_health_check.yaml");
    let response = provider().read(MHC_MANIFEST, &config).await;
    assert!(response.diagnostics.is_empty(), "{:?}", response.diagnostics);
    let state = response.state.expect("state");

    assert_eq!(state["id"], "default/demo-node-unhealthy-5m");
    assert_eq!(state["spec"], config["spec"]);

    let yaml = state["yaml"].as_str().expect("yaml");
    assert!(yaml.contains("apiVersion: cluster.x-k8s.io/v1beta1"));
    assert!(yaml.contains("kind: MachineHealthCheck"));
    assert!(yaml.contains("clusterName: demo"));
    assert!(!yaml.contains("cluster_name"));

    let manifest: ManifestObj<MachineHealthCheckSpec> =
        serde_yaml::from_str(yaml).expect("manifest");
    assert_eq!(manifest.metadata.name, "demo-node-unhealthy-5m");
    assert_eq!(manifest.metadata.namespace.as_deref(), Some("default"));
    assert!(manifest.metadata.annotations.is_none());
    assert_eq!(
        manifest.spec.max_unhealthy,
        Some(Int32OrString::String("40%".to_owned()))
    );
    assert_eq!(manifest.spec.unhealthy_range.as_deref(), Some("[1-3]"));
    let conditions = manifest.spec.unhealthy_conditions.expect("conditions");
    assert_eq!(conditions.len(), 2);
    assert_eq!(conditions[1].status, "False");
    assert_eq!(conditions[0].timeout, "300s");
}

#[tokio::test]
async fn test_int_or_string_number() {
    let config = json!({
        "metadata": { "name": "demo", "namespace": "default" },
        "spec": {
            "cluster_name": "demo",
            "selector": {},
            "max_unhealthy": "3"
        }
    });
    let response = provider().read(MHC_MANIFEST, &config).await;
    let state = response.state.expect("state");
    let yaml = state["yaml"].as_str().expect("yaml");
    assert!(yaml.contains("maxUnhealthy: 3\n"));

    let manifest: ManifestObj<MachineHealthCheckSpec> =
        serde_yaml::from_str(yaml).expect("manifest");
    assert_eq!(manifest.spec.max_unhealthy, Some(Int32OrString::Int(3)));
}

#[tokio::test]
async fn test_int_or_string_keeps_leading_zeros() {
    let config = json!({
        "metadata": { "name": "demo", "namespace": "default" },
        "spec": {
            "cluster_name": "demo",
            "selector": {},
            "max_unhealthy": "007"
        }
    });
    let response = provider().read(MHC_MANIFEST, &config).await;
    assert!(response.diagnostics.is_empty(), "{:?}", response.diagnostics);
    let state = response.state.expect("state");
    let yaml = state["yaml"].as_str().expect("yaml");
    assert!(yaml.contains("maxUnhealthy: '007'\n"), "{yaml}");

    let manifest: ManifestObj<MachineHealthCheckSpec> =
        serde_yaml::from_str(yaml).expect("manifest");
    assert_eq!(
        manifest.spec.max_unhealthy,
        Some(Int32OrString::String("007".to_owned()))
    );
}

#[tokio::test]
async fn test_node_pool_large_limits() {
    let config = json!({
        "metadata": { "name": "default" },
        "spec": {
            "template": {
                "spec": {
                    "node_class_ref": { "name": "default" },
                    "requirements": [
                        { "key": "karpenter.sh/capacity-type", "operator": "In", "values": ["spot"] }
                    ]
                }
            },
            "limits": { "cpu": "1000", "memory": "68719476736" }
        }
    });
    let response = provider().read(NODE_POOL_MANIFEST, &config).await;
    assert!(response.diagnostics.is_empty(), "{:?}", response.diagnostics);
    let state = response.state.expect("state");
    assert_eq!(state["id"], "default");
    let yaml = state["yaml"].as_str().expect("yaml");
    assert!(yaml.contains("memory: '68719476736'"), "{yaml}");

    let manifest: ManifestObj<NodePoolSpec> = serde_yaml::from_str(yaml).expect("manifest");
    let limits = manifest.spec.limits.expect("limits");
    assert_eq!(limits.get("memory"), Some(&Quantity::from("68719476736")));
    assert_eq!(limits.get("cpu"), Some(&Quantity::from("1000")));
}

#[tokio::test]
async fn test_int32_overflow_rejected() {
    let config = json!({
        "metadata": { "name": "demo", "namespace": "default" },
        "spec": {
            "topology": {
                "class": "quick-start",
                "version": "v1.29.0",
                "control_plane": { "replicas": 3000000000_i64 }
            }
        }
    });
    let response = provider().read(CLUSTER_MANIFEST, &config).await;
    assert!(response.state.is_none());
    assert_eq!(response.diagnostics.len(), 1);
    let diagnostic = response.diagnostics.iter().next().expect("diagnostic");
    assert_eq!(diagnostic.summary, "Incorrect attribute value type");
    assert_eq!(
        diagnostic.attribute.as_ref().expect("path").to_string(),
        "spec.topology.control_plane.replicas"
    );

    let mut config = config;
    config["spec"]["topology"]["control_plane"]["replicas"] = json!(i32::MAX);
    let response = provider().read(CLUSTER_MANIFEST, &config).await;
    assert!(!response.has_error(), "{:?}", response.diagnostics);
}

#[tokio::test]
async fn test_unhealthy_range_rejected() {
    let config = json!({
        "metadata": { "name": "demo", "namespace": "default" },
        "spec": {
            "cluster_name": "demo",
            "selector": { "match_labels": { "nodepool": "nodepool-0" } },
            "unhealthy_range": "5"
        }
    });
    let response = provider().read(MHC_MANIFEST, &config).await;
    assert!(response.state.is_none());
    assert_eq!(response.diagnostics.len(), 1);
    let diagnostic = response.diagnostics.iter().next().expect("diagnostic");
    assert_eq!(diagnostic.summary, "Invalid Attribute Value");
    assert_eq!(
        diagnostic.attribute.as_ref().expect("path").to_string(),
        "spec.unhealthy_range"
    );
}

#[tokio::test]
async fn test_manifest_validation() {
    let config = json!({
        "id": "default/demo",
        "metadata": {
            "name": "demo",
            "namespace": "default",
            "labels": { "bad key": "x" }
        },
        "spec": {
            "selector": {},
            "unhealthy_conditions": [ { "type": "Ready", "status": "Unknown" } ]
        }
    });
    let response = provider().read(MHC_MANIFEST, &config).await;
    let paths: Vec<String> = response
        .diagnostics
        .iter()
        .map(|d| d.attribute.as_ref().expect("path").to_string())
        .collect();
    assert_eq!(
        paths,
        vec![
            "id",
            "metadata.labels",
            "spec.cluster_name",
            "spec.unhealthy_conditions[0].timeout"
        ]
    );
}

#[tokio::test]
async fn test_ec2_node_class_manifest() {
    let config = fixture("ec2_node_class.yaml");
    let response = provider().read(EC2_MANIFEST, &config).await;
    assert!(response.diagnostics.is_empty(), "{:?}", response.diagnostics);
    let state = response.state.expect("state");
    assert_eq!(state["id"], "default");

    let yaml = state["yaml"].as_str().expect("yaml");
    assert!(yaml.contains("associatePublicIPAddress: false"));
    assert!(yaml.contains("httpProtocolIPv6: disabled"));
    assert!(yaml.contains("kmsKeyID:"));
    assert!(!yaml.contains("namespace"));

    let manifest: ManifestObj<Ec2NodeClassSpec> = serde_yaml::from_str(yaml).expect("manifest");
    assert_eq!(manifest.kind, "EC2NodeClass");
    assert_eq!(manifest.spec.ami_family.as_deref(), Some("AL2023"));
    let options = manifest.spec.metadata_options.expect("options");
    assert_eq!(options.http_put_response_hop_limit, Some(2));
    let ebs = manifest.spec.block_device_mappings.expect("mappings")[0]
        .ebs
        .clone()
        .expect("ebs");
    assert_eq!(ebs.encrypted, Some(true));
    assert_eq!(ebs.volume_type.as_deref(), Some("gp3"));
}

#[tokio::test]
async fn test_cluster_scoped_rejects_namespace() {
    let mut config = fixture("ec2_node_class.yaml");
    config["metadata"]["namespace"] = json!("default");
    config["spec"]["metadata_options"]["http_put_response_hop_limit"] = json!(65);
    let response = provider().read(EC2_MANIFEST, &config).await;
    let paths: Vec<String> = response
        .diagnostics
        .iter()
        .map(|d| d.attribute.as_ref().expect("path").to_string())
        .collect();
    assert_eq!(
        paths,
        vec![
            "metadata.namespace",
            "spec.metadata_options.http_put_response_hop_limit"
        ]
    );
}

#[tokio::test]
async fn test_cluster_without_spec() {
    let config = json!({ "metadata": { "name": "demo", "namespace": "capi-system" } });
    let response = provider()
        .read("cluster_x_k8s_io_cluster_v1beta1_manifest", &config)
        .await;
    assert!(!response.has_error(), "{:?}", response.diagnostics);
    let state = response.state.expect("state");
    assert_eq!(state["id"], "capi-system/demo");
    let yaml = state["yaml"].as_str().expect("yaml");
    assert!(yaml.contains("namespace: capi-system"));

    let response = provider()
        .read(
            "cluster_x_k8s_io_machine_health_check_v1beta1_manifest",
            &config,
        )
        .await;
    let diagnostic = response.diagnostics.iter().next().expect("diagnostic");
    assert_eq!(
        diagnostic.attribute.as_ref().expect("path").to_string(),
        "spec"
    );
}
