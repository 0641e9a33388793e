use serde::Deserialize;
use serde::Serialize;

use crate::Crd;
use crate::CrdNames;
use crate::LabelSelector;
use crate::Spec;
use crate::Status;

use super::Condition;
use super::ADDONS_GROUP;
use super::V1BETA1;

const CLUSTER_RESOURCE_SET_API: Crd = Crd {
    group: ADDONS_GROUP,
    version: V1BETA1,
    names: CrdNames {
        kind: "ClusterResourceSet",
        plural: "clusterresourcesets",
        singular: "clusterresourceset",
    },
};

impl Spec for ClusterResourceSetSpec {
    type Status = ClusterResourceSetStatus;

    fn metadata() -> &'static Crd {
        &CLUSTER_RESOURCE_SET_API
    }
}

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClusterResourceSetSpec {
    pub cluster_selector: LabelSelector,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<Vec<ResourceRef>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<String>,
}

/// Secret or ConfigMap applied to matching clusters
#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResourceRef {
    pub kind: String,
    pub name: String,
}

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ClusterResourceSetStatus {
    pub observed_generation: Option<i64>,
    pub conditions: Vec<Condition>,
}

impl Status for ClusterResourceSetStatus {}
