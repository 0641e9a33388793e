use k8_tf_schema::{Attribute, AttributeType, Validator};
use k8_types::capi::machine_deployment::MachineDeploymentSpec;

use super::common::{label_selector, object_reference, template_metadata};
use crate::TerraformKind;

fn machine_spec() -> AttributeType {
    AttributeType::Object(vec![
        Attribute::required("cluster_name", AttributeType::String)
            .validator(Validator::LengthAtLeast(1)),
        Attribute::required(
            "bootstrap",
            AttributeType::Object(vec![
                Attribute::optional("config_ref", object_reference())
                    .description("Bootstrap provider object with the bootstrap data."),
                Attribute::optional("data_secret_name", AttributeType::String)
                    .description("Secret holding bootstrap data, takes precedence over `config_ref`."),
            ]),
        ),
        Attribute::required("infrastructure_ref", object_reference()),
        Attribute::optional("version", AttributeType::String)
            .description("Kubernetes version of the machines."),
        Attribute::optional("provider_id", AttributeType::String).json_name("providerID"),
        Attribute::optional("failure_domain", AttributeType::String),
        Attribute::optional("node_deletion_timeout", AttributeType::String),
        Attribute::optional("node_drain_timeout", AttributeType::String),
        Attribute::optional("node_volume_detach_timeout", AttributeType::String),
    ])
}

impl TerraformKind for MachineDeploymentSpec {
    const DESCRIPTION: &'static str =
        "MachineDeployment is the Schema for the machinedeployments API.";

    fn spec_attributes() -> Vec<Attribute> {
        vec![
            Attribute::required("cluster_name", AttributeType::String)
                .description("Name of the Cluster this object belongs to.")
                .validator(Validator::LengthAtLeast(1)),
            Attribute::required("selector", label_selector())
                .description("Label selector for machines, must match the template labels."),
            Attribute::required(
                "template",
                AttributeType::Object(vec![
                    Attribute::optional("metadata", template_metadata()),
                    Attribute::required("spec", machine_spec()),
                ]),
            )
            .description("Machine template."),
            Attribute::optional("replicas", AttributeType::Int32)
                .validator(Validator::Int64AtLeast(0)),
            Attribute::optional("min_ready_seconds", AttributeType::Int32)
                .validator(Validator::Int64AtLeast(0)),
            Attribute::optional("paused", AttributeType::Bool),
            Attribute::optional("progress_deadline_seconds", AttributeType::Int32),
            Attribute::optional("revision_history_limit", AttributeType::Int32),
            Attribute::optional("rollout_after", AttributeType::String),
            Attribute::optional(
                "strategy",
                AttributeType::Object(vec![
                    Attribute::optional("type", AttributeType::String)
                        .validator(Validator::one_of(&["RollingUpdate", "OnDelete"])),
                    Attribute::optional(
                        "rolling_update",
                        AttributeType::Object(vec![
                            Attribute::optional("max_surge", AttributeType::IntOrString),
                            Attribute::optional("max_unavailable", AttributeType::IntOrString),
                            Attribute::optional("delete_policy", AttributeType::String)
                                .validator(Validator::one_of(&["Random", "Newest", "Oldest"])),
                        ]),
                    ),
                ]),
            )
            .description("Deployment strategy used to replace machines."),
        ]
    }
}
