use serde::Deserialize;
use serde::Serialize;

use crate::Crd;
use crate::CrdNames;
use crate::Int32OrString;
use crate::LabelSelector;
use crate::ObjectReference;
use crate::Spec;
use crate::Status;
use crate::TemplateMeta;

use super::Condition;
use super::GROUP;
use super::V1BETA1;

const MACHINE_DEPLOYMENT_API: Crd = Crd {
    group: GROUP,
    version: V1BETA1,
    names: CrdNames {
        kind: "MachineDeployment",
        plural: "machinedeployments",
        singular: "machinedeployment",
    },
};

impl Spec for MachineDeploymentSpec {
    type Status = MachineDeploymentStatus;

    fn metadata() -> &'static Crd {
        &MACHINE_DEPLOYMENT_API
    }
}

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MachineDeploymentSpec {
    pub cluster_name: String,
    pub selector: LabelSelector,
    pub template: MachineTemplateSpec,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replicas: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_ready_seconds: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paused: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress_deadline_seconds: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision_history_limit: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rollout_after: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<MachineDeploymentStrategy>,
}

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MachineDeploymentStrategy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r#type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rolling_update: Option<RollingUpdate>,
}

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RollingUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_surge: Option<Int32OrString>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_unavailable: Option<Int32OrString>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete_policy: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MachineTemplateSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<TemplateMeta>,
    pub spec: MachineSpec,
}

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MachineSpec {
    pub cluster_name: String,
    pub bootstrap: Bootstrap,
    pub infrastructure_ref: ObjectReference,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, rename = "providerID", skip_serializing_if = "Option::is_none")]
    pub provider_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_deletion_timeout: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_drain_timeout: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_volume_detach_timeout: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Bootstrap {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_ref: Option<ObjectReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_secret_name: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct MachineDeploymentStatus {
    pub phase: Option<String>,
    pub replicas: Option<i32>,
    pub ready_replicas: Option<i32>,
    pub available_replicas: Option<i32>,
    pub unavailable_replicas: Option<i32>,
    pub updated_replicas: Option<i32>,
    pub selector: Option<String>,
    pub observed_generation: Option<i64>,
    pub conditions: Vec<Condition>,
}

impl Status for MachineDeploymentStatus {}

#[cfg(test)]
mod test {

    use crate::{Int32OrString, K8Obj};

    use super::MachineDeploymentSpec;

    #[test]
    fn test_decode_machine_deployment() {
        let data = r#"
        {
            "apiVersion": "cluster.x-k8s.io/v1beta1",
            "kind": "MachineDeployment",
            "metadata": { "name": "demo-md-0", "namespace": "default" },
            "spec": {
                "clusterName": "demo",
                "replicas": 3,
                "selector": { "matchLabels": {} },
                "strategy": {
                    "type": "RollingUpdate",
                    "rollingUpdate": { "maxSurge": 1, "maxUnavailable": 0 }
                },
                "template": {
                    "spec": {
                        "clusterName": "demo",
                        "version": "v1.29.2",
                        "providerID": "aws:///us-east-1a/i-0123",
                        "bootstrap": {
                            "configRef": {
                                "apiVersion": "bootstrap.cluster.x-k8s.io/v1beta1",
                                "kind": "KubeadmConfigTemplate",
                                "name": "demo-md-0"
                            }
                        },
                        "infrastructureRef": {
                            "apiVersion": "infrastructure.cluster.x-k8s.io/v1beta1",
                            "kind": "DockerMachineTemplate",
                            "name": "demo-md-0"
                        }
                    }
                }
            },
            "status": { "phase": "Running", "readyReplicas": 3 }
        }"#;

        let deployment: K8Obj<MachineDeploymentSpec> =
            serde_json::from_str(data).expect("machine deployment");
        assert_eq!(deployment.spec.replicas, Some(3));
        let rolling = deployment
            .spec
            .strategy
            .and_then(|strategy| strategy.rolling_update)
            .expect("rolling update");
        assert_eq!(rolling.max_surge, Some(Int32OrString::Int(1)));
        assert_eq!(
            deployment.spec.template.spec.provider_id.as_deref(),
            Some("aws:///us-east-1a/i-0123")
        );
        assert_eq!(deployment.status.ready_replicas, Some(3));
    }
}
