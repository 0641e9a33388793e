//! Cluster API kinds (`cluster.x-k8s.io` and `addons.cluster.x-k8s.io`)

pub mod cluster;
pub mod cluster_resource_set;
pub mod machine_deployment;
pub mod machine_health_check;

use serde::Deserialize;
use serde::Serialize;

pub const GROUP: &str = "cluster.x-k8s.io";
pub const ADDONS_GROUP: &str = "addons.cluster.x-k8s.io";
pub const V1BETA1: &str = "v1beta1";

/// condition reported in the status of Cluster API objects
#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Condition {
    pub r#type: String,
    pub status: String,
    pub severity: Option<String>,
    pub last_transition_time: Option<String>,
    pub reason: Option<String>,
    pub message: Option<String>,
}
