use serde::Deserialize;
use serde::Serialize;

use crate::Crd;
use crate::CrdNames;
use crate::Int32OrString;
use crate::LabelSelector;
use crate::ObjectReference;
use crate::Spec;
use crate::Status;

use super::Condition;
use super::GROUP;
use super::V1BETA1;

const MACHINE_HEALTH_CHECK_API: Crd = Crd {
    group: GROUP,
    version: V1BETA1,
    names: CrdNames {
        kind: "MachineHealthCheck",
        plural: "machinehealthchecks",
        singular: "machinehealthcheck",
    },
};

impl Spec for MachineHealthCheckSpec {
    type Status = MachineHealthCheckStatus;

    fn metadata() -> &'static Crd {
        &MACHINE_HEALTH_CHECK_API
    }
}

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MachineHealthCheckSpec {
    pub cluster_name: String,
    pub selector: LabelSelector,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unhealthy_conditions: Option<Vec<UnhealthyCondition>>,
    /// remediation is skipped when more machines than this are unhealthy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_unhealthy: Option<Int32OrString>,
    /// e.g. `[3-5]`: remediate only while the unhealthy count is in range
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unhealthy_range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_startup_timeout: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remediation_template: Option<ObjectReference>,
}

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UnhealthyCondition {
    pub r#type: String,
    pub status: String,
    pub timeout: String,
}

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct MachineHealthCheckStatus {
    pub expected_machines: Option<i32>,
    pub current_healthy: Option<i32>,
    pub remediations_allowed: Option<i32>,
    pub targets: Vec<String>,
    pub conditions: Vec<Condition>,
}

impl Status for MachineHealthCheckStatus {}
