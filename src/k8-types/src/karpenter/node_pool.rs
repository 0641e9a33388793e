use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

use crate::Crd;
use crate::CrdNames;
use crate::Quantity;
use crate::Spec;
use crate::Status;
use crate::TemplateMeta;

use super::GROUP;
use super::V1BETA1;

const NODE_POOL_API: Crd = Crd {
    group: GROUP,
    version: V1BETA1,
    names: CrdNames {
        kind: "NodePool",
        plural: "nodepools",
        singular: "nodepool",
    },
};

impl Spec for NodePoolSpec {
    type Status = NodePoolStatus;

    const NAME_SPACED: bool = false;

    fn metadata() -> &'static Crd {
        &NODE_POOL_API
    }
}

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NodePoolSpec {
    pub template: NodeClaimTemplate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disruption: Option<Disruption>,
    /// resource limits, e.g. `cpu: 1000` or `memory: 64Gi`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limits: Option<BTreeMap<String, Quantity>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<i32>,
}

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Disruption {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budgets: Option<Vec<Budget>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consolidate_after: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consolidation_policy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expire_after: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub nodes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NodeClaimTemplate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<TemplateMeta>,
    pub spec: NodeClaimSpec,
}

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NodeClaimSpec {
    pub node_class_ref: NodeClassReference,
    pub requirements: Vec<NodeSelectorRequirement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taints: Option<Vec<Taint>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub startup_taints: Option<Vec<Taint>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kubelet: Option<KubeletConfiguration>,
}

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NodeClassReference {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NodeSelectorRequirement {
    pub key: String,
    pub operator: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_values: Option<i64>,
}

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Taint {
    pub key: String,
    pub effect: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_added: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct KubeletConfiguration {
    #[serde(default, rename = "clusterDNS", skip_serializing_if = "Option::is_none")]
    pub cluster_dns: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_pods: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pods_per_core: Option<i32>,
}

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct NodePoolStatus {
    pub resources: BTreeMap<String, Quantity>,
}

impl Status for NodePoolStatus {}

#[cfg(test)]
mod test {

    use crate::{K8Obj, Quantity, Spec};

    use super::NodePoolSpec;

    #[test]
    fn test_node_pool_cluster_scoped() {
        assert!(!NodePoolSpec::NAME_SPACED);
        assert_eq!(NodePoolSpec::api_version(), "karpenter.sh/v1beta1");
    }

    #[test]
    fn test_decode_node_pool() {
        let data = r#"
        {
            "apiVersion": "karpenter.sh/v1beta1",
            "kind": "NodePool",
            "metadata": { "name": "default" },
            "spec": {
                "limits": { "cpu": 1000, "memory": 68719476736 },
                "disruption": {
                    "consolidationPolicy": "WhenUnderutilized",
                    "budgets": [ { "nodes": "10%" } ]
                },
                "template": {
                    "spec": {
                        "nodeClassRef": { "name": "default" },
                        "requirements": [
                            { "key": "karpenter.sh/capacity-type", "operator": "In", "values": ["spot"] }
                        ],
                        "kubelet": { "clusterDNS": ["10.0.0.10"], "maxPods": 110 }
                    }
                }
            },
            "status": { "resources": { "cpu": "20", "nodes": 5 } }
        }"#;

        let pool: K8Obj<NodePoolSpec> = serde_json::from_str(data).expect("node pool");
        assert!(pool.metadata.namespace.is_empty());
        let limits = pool.spec.limits.expect("limits");
        assert_eq!(limits.get("cpu"), Some(&Quantity::from("1000")));
        assert_eq!(limits.get("memory"), Some(&Quantity::from("68719476736")));
        let kubelet = pool.spec.template.spec.kubelet.expect("kubelet");
        assert_eq!(kubelet.cluster_dns, Some(vec!["10.0.0.10".to_owned()]));
        assert_eq!(pool.status.resources.len(), 2);
        assert_eq!(pool.status.resources.get("nodes"), Some(&Quantity::from("5")));
    }
}
