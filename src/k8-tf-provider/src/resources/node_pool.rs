use std::sync::LazyLock;

use regex::Regex;

use k8_tf_schema::{Attribute, AttributeType, Validator};
use k8_types::karpenter::node_pool::NodePoolSpec;

use super::common::{string_list, template_metadata};
use crate::TerraformKind;

const NODE_SELECTOR_OPERATORS: &[&str] = &["In", "NotIn", "Exists", "DoesNotExist", "Gt", "Lt"];

/// `10`, `10%` or `100%`
static BUDGET_NODES_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^((100|[0-9]{1,2})%|[0-9]+)$").unwrap());

fn taints() -> AttributeType {
    AttributeType::ObjectList(vec![
        Attribute::required("key", AttributeType::String).validator(Validator::LengthAtLeast(1)),
        Attribute::required("effect", AttributeType::String).validator(Validator::one_of(&[
            "NoSchedule",
            "PreferNoSchedule",
            "NoExecute",
        ])),
        Attribute::optional("value", AttributeType::String),
        Attribute::optional("time_added", AttributeType::String),
    ])
}

fn node_claim_spec() -> AttributeType {
    AttributeType::Object(vec![
        Attribute::required(
            "node_class_ref",
            AttributeType::Object(vec![
                Attribute::required("name", AttributeType::String)
                    .validator(Validator::LengthAtLeast(1)),
                Attribute::optional("api_version", AttributeType::String),
                Attribute::optional("kind", AttributeType::String),
            ]),
        )
        .description("Reference to the cloud provider specific node class."),
        Attribute::required(
            "requirements",
            AttributeType::ObjectList(vec![
                Attribute::required("key", AttributeType::String),
                Attribute::required("operator", AttributeType::String)
                    .validator(Validator::one_of(NODE_SELECTOR_OPERATORS)),
                Attribute::optional("values", string_list()),
                Attribute::optional("min_values", AttributeType::Int64)
                    .validator(Validator::Int64Between(1, 50)),
            ]),
        )
        .description("Requirements that constrain the parameters of provisioned nodes."),
        Attribute::optional("taints", taints()),
        Attribute::optional("startup_taints", taints())
            .description("Taints removed by a daemonset once the node is initialized."),
        Attribute::optional(
            "kubelet",
            AttributeType::Object(vec![
                Attribute::optional("cluster_dns", string_list()).json_name("clusterDNS"),
                Attribute::optional("max_pods", AttributeType::Int32)
                    .validator(Validator::Int64AtLeast(0)),
                Attribute::optional("pods_per_core", AttributeType::Int32)
                    .validator(Validator::Int64AtLeast(0)),
            ]),
        ),
    ])
}

impl TerraformKind for NodePoolSpec {
    const DESCRIPTION: &'static str = "NodePool is the Schema for the NodePools API.";

    fn spec_attributes() -> Vec<Attribute> {
        vec![
            Attribute::required(
                "template",
                AttributeType::Object(vec![
                    Attribute::optional("metadata", template_metadata()),
                    Attribute::required("spec", node_claim_spec()),
                ]),
            )
            .description("Template for the NodeClaims created by this pool."),
            Attribute::optional(
                "disruption",
                AttributeType::Object(vec![
                    Attribute::optional(
                        "budgets",
                        AttributeType::ObjectList(vec![
                            Attribute::required("nodes", AttributeType::String)
                                .validator(Validator::pattern(&BUDGET_NODES_REGEX)),
                            Attribute::optional("schedule", AttributeType::String),
                            Attribute::optional("duration", AttributeType::String),
                        ]),
                    ),
                    Attribute::optional("consolidate_after", AttributeType::String),
                    Attribute::optional("consolidation_policy", AttributeType::String)
                        .validator(Validator::one_of(&["WhenEmpty", "WhenUnderutilized"])),
                    Attribute::optional("expire_after", AttributeType::String),
                ]),
            )
            .description("Disruption behavior of the nodes in the pool."),
            Attribute::optional("limits", AttributeType::map(AttributeType::String))
                .description("Resource limits constraining the maximum size of the pool."),
            Attribute::optional("weight", AttributeType::Int32)
                .description("Priority given to the pool during scheduling.")
                .validator(Validator::Int64Between(1, 100)),
        ]
    }
}
