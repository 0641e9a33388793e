use k8_tf_schema::{Attribute, AttributeType, Validator};
use k8_types::capi::cluster::ClusterSpec;

use super::common::{object_reference, string_list, template_metadata};
use crate::TerraformKind;

fn network_ranges() -> AttributeType {
    AttributeType::Object(vec![Attribute::required("cidr_blocks", string_list())])
}

fn topology() -> AttributeType {
    AttributeType::Object(vec![
        Attribute::required("class", AttributeType::String)
            .description("Name of the ClusterClass used to create the topology."),
        Attribute::required("version", AttributeType::String)
            .description("Kubernetes version of the cluster."),
        Attribute::optional(
            "control_plane",
            AttributeType::Object(vec![
                Attribute::optional("metadata", template_metadata()),
                Attribute::optional("replicas", AttributeType::Int32)
                    .validator(Validator::Int64AtLeast(0)),
                Attribute::optional("node_deletion_timeout", AttributeType::String),
                Attribute::optional("node_drain_timeout", AttributeType::String),
                Attribute::optional("node_volume_detach_timeout", AttributeType::String),
            ]),
        ),
        Attribute::optional("rollout_after", AttributeType::String),
        Attribute::optional(
            "workers",
            AttributeType::Object(vec![Attribute::optional(
                "machine_deployments",
                AttributeType::ObjectList(vec![
                    Attribute::required("class", AttributeType::String),
                    Attribute::required("name", AttributeType::String)
                        .validator(Validator::LengthAtLeast(1)),
                    Attribute::optional("failure_domain", AttributeType::String),
                    Attribute::optional("metadata", template_metadata()),
                    Attribute::optional("replicas", AttributeType::Int32)
                        .validator(Validator::Int64AtLeast(0)),
                ]),
            )]),
        ),
        Attribute::optional(
            "variables",
            AttributeType::ObjectList(vec![
                Attribute::required("name", AttributeType::String),
                Attribute::required("value", AttributeType::Dynamic)
                    .description("Value of the variable, any JSON value."),
                Attribute::optional("definition_from", AttributeType::String),
            ]),
        ),
    ])
}

impl TerraformKind for ClusterSpec {
    const DESCRIPTION: &'static str = "Cluster is the Schema for the clusters API.";

    const SPEC_REQUIRED: bool = false;

    fn spec_attributes() -> Vec<Attribute> {
        vec![
            Attribute::optional("paused", AttributeType::Bool)
                .description("Pauses reconciliation of all objects of the cluster."),
            Attribute::optional(
                "cluster_network",
                AttributeType::Object(vec![
                    Attribute::optional("api_server_port", AttributeType::Int32)
                        .validator(Validator::Int64Between(1, 65535)),
                    Attribute::optional("pods", network_ranges()),
                    Attribute::optional("service_domain", AttributeType::String),
                    Attribute::optional("services", network_ranges()),
                ]),
            )
            .description("Cluster network configuration."),
            Attribute::optional(
                "control_plane_endpoint",
                AttributeType::Object(vec![
                    Attribute::required("host", AttributeType::String),
                    Attribute::required("port", AttributeType::Int32)
                        .validator(Validator::Int64Between(0, 65535)),
                ]),
            )
            .description("Endpoint used to communicate with the control plane."),
            Attribute::optional("control_plane_ref", object_reference())
                .description("Provider-specific control plane object."),
            Attribute::optional("infrastructure_ref", object_reference())
                .description("Provider-specific infrastructure object."),
            Attribute::optional("topology", topology())
                .description("Managed topology derived from a ClusterClass."),
        ]
    }
}
