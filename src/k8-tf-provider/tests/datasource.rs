use std::sync::Arc;

use serde_json::json;
use serde_json::Value;

use k8_metadata_client::InMemoryClient;
use k8_metadata_client::NameSpace;
use k8_tf_provider::schema::{GET_ERROR_SUMMARY, JSON_UNMARSHAL_ERROR_SUMMARY, OFFLINE_ERROR_SUMMARY};
use k8_tf_provider::Provider;
use k8_types::capi::cluster::ClusterSpec;
use k8_types::karpenter::node_pool::NodePoolSpec;
use k8_types::Spec;

const CLUSTER: &str = "k8s_cluster_x_k8s_io_cluster_v1beta1";
const NODE_POOL: &str = "k8s_karpenter_sh_node_pool_v1beta1";

fn fixture(name: &str) -> Value {
    let path = format!("{}/data/{name}", env!("CARGO_MANIFEST_DIR"));
    let content = std::fs::read_to_string(&path).expect("fixture");
    serde_json::from_str(&content).expect("json fixture")
}

fn provider() -> Provider<InMemoryClient> {
    let client = InMemoryClient::new();
    client
        .insert_object(
            ClusterSpec::metadata(),
            NameSpace::from("default"),
            "demo",
            fixture("cluster.json"),
        )
        .expect("insert cluster");
    client
        .insert_object(
            ClusterSpec::metadata(),
            NameSpace::from("default"),
            "broken",
            json!({ "metadata": { "name": "broken" }, "spec": { "clusterNetwork": "oops" } }),
        )
        .expect("insert broken");
    client
        .insert_object(
            NodePoolSpec::metadata(),
            NameSpace::All,
            "default",
            fixture("node_pool.json"),
        )
        .expect("insert node pool");
    Provider::with_client(Arc::new(client))
}

#[tokio::test]
async fn test_read_cluster() {
    let response = provider()
        .read(
            CLUSTER,
            &json!({ "metadata": { "name": "demo", "namespace": "default" } }),
        )
        .await;
    assert!(response.diagnostics.is_empty(), "{:?}", response.diagnostics);
    let state = response.state.expect("state");

    assert_eq!(state["id"], "default/demo");
    assert_eq!(state["api_version"], "cluster.x-k8s.io/v1beta1");
    assert_eq!(state["kind"], "Cluster");
    assert_eq!(state["metadata"]["name"], "demo");
    assert_eq!(state["metadata"]["namespace"], "default");
    assert_eq!(
        state["metadata"]["labels"],
        json!({ "cluster.x-k8s.io/cluster-name": "demo" })
    );
    assert!(state["metadata"]["annotations"].is_null());

    let spec = &state["spec"];
    assert!(spec["paused"].is_null());
    assert!(spec["topology"].is_null());
    assert_eq!(spec["cluster_network"]["service_domain"], "cluster.local");
    assert_eq!(
        spec["cluster_network"]["pods"]["cidr_blocks"],
        json!(["192.168.0.0/16"])
    );
    assert!(spec["cluster_network"]["services"].is_null());
    assert_eq!(spec["control_plane_endpoint"]["port"], 6443);
    assert_eq!(spec["control_plane_ref"]["kind"], "KubeadmControlPlane");
    assert!(spec["control_plane_ref"]["uid"].is_null());
}

#[tokio::test]
async fn test_read_cluster_scoped() {
    let response = provider()
        .read(
            "karpenter_sh_node_pool_v1beta1",
            &json!({ "metadata": { "name": "default" } }),
        )
        .await;
    assert!(!response.has_error(), "{:?}", response.diagnostics);
    let state = response.state.expect("state");

    assert_eq!(state["id"], "default");
    assert!(state["metadata"].get("namespace").is_none());
    assert!(state["metadata"]["labels"].is_null());
    assert_eq!(
        state["metadata"]["annotations"]["karpenter.sh/nodepool-hash"],
        "12345"
    );
    let spec = &state["spec"];
    assert_eq!(
        spec["limits"],
        json!({ "cpu": "1000", "ephemeral-storage": "68719476736", "memory": "1000Gi" })
    );
    assert!(spec["weight"].is_null());
    assert_eq!(
        spec["template"]["spec"]["kubelet"]["cluster_dns"],
        json!(["10.100.0.10"])
    );
    assert_eq!(spec["template"]["spec"]["requirements"][1]["min_values"], 2);
    assert!(spec["template"]["spec"]["requirements"][1]["values"].is_null());
    assert_eq!(spec["disruption"]["consolidation_policy"], "WhenUnderutilized");
}

#[tokio::test]
async fn test_read_not_found() {
    let response = provider()
        .read(
            CLUSTER,
            &json!({ "metadata": { "name": "missing", "namespace": "default" } }),
        )
        .await;
    assert!(response.state.is_none());
    let diagnostic = response.diagnostics.iter().next().expect("diagnostic");
    assert_eq!(diagnostic.summary, GET_ERROR_SUMMARY);
    assert!(diagnostic.detail.contains("not found"));
}

#[tokio::test]
async fn test_read_malformed_body() {
    let response = provider()
        .read(
            CLUSTER,
            &json!({ "metadata": { "name": "broken", "namespace": "default" } }),
        )
        .await;
    assert!(response.state.is_none());
    assert_eq!(response.diagnostics.len(), 1);
    let diagnostic = response.diagnostics.iter().next().expect("diagnostic");
    assert_eq!(diagnostic.summary, JSON_UNMARSHAL_ERROR_SUMMARY);
}

#[tokio::test]
async fn test_invalid_metadata_rejected_before_get() {
    // nothing stored, a GET would report "Unable to GET resource"
    let provider = Provider::with_client(Arc::new(InMemoryClient::new()));
    let response = provider
        .read(
            CLUSTER,
            &json!({ "metadata": { "name": "Demo_Cluster", "namespace": "kube.system" } }),
        )
        .await;
    let paths: Vec<String> = response
        .diagnostics
        .iter()
        .map(|d| {
            assert_ne!(d.summary, GET_ERROR_SUMMARY);
            d.attribute.as_ref().expect("path").to_string()
        })
        .collect();
    assert_eq!(paths, vec!["metadata.name", "metadata.namespace"]);

    let response = provider
        .read(CLUSTER, &json!({ "metadata": { "name": "demo" } }))
        .await;
    let diagnostic = response.diagnostics.iter().next().expect("diagnostic");
    assert_eq!(diagnostic.summary, "Missing required argument");

    let response = provider
        .read(
            CLUSTER,
            &json!({ "metadata": { "name": "demo", "namespace": "default" }, "spec": { "paused": true } }),
        )
        .await;
    let diagnostic = response.diagnostics.iter().next().expect("diagnostic");
    assert_eq!(diagnostic.summary, "Invalid Configuration for Read-Only Attribute");
}

#[tokio::test]
async fn test_offline_data_source() {
    let provider = Provider::<InMemoryClient>::offline();
    let response = provider
        .read(NODE_POOL, &json!({ "metadata": { "name": "default" } }))
        .await;
    assert!(response.state.is_none());
    let diagnostic = response.diagnostics.iter().next().expect("diagnostic");
    assert_eq!(diagnostic.summary, OFFLINE_ERROR_SUMMARY);
}

#[tokio::test]
async fn test_unknown_type() {
    let response = provider().read("k8s_core_pod_v1", &json!({})).await;
    assert!(response.has_error());
}
