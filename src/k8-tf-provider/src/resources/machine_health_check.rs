use std::sync::LazyLock;

use regex::Regex;

use k8_tf_schema::{Attribute, AttributeType, Validator};
use k8_types::capi::machine_health_check::MachineHealthCheckSpec;

use super::common::{label_selector, object_reference};
use crate::TerraformKind;

static UNHEALTHY_RANGE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[[0-9]+-[0-9]+\]$").unwrap());

impl TerraformKind for MachineHealthCheckSpec {
    const DESCRIPTION: &'static str =
        "MachineHealthCheck is the Schema for the machinehealthchecks API.";

    fn spec_attributes() -> Vec<Attribute> {
        vec![
            Attribute::required("cluster_name", AttributeType::String)
                .description("Name of the Cluster this object belongs to.")
                .validator(Validator::LengthAtLeast(1)),
            Attribute::required("selector", label_selector())
                .description("Label selector to match machines whose health will be exercised."),
            Attribute::optional(
                "unhealthy_conditions",
                AttributeType::ObjectList(vec![
                    Attribute::required("type", AttributeType::String)
                        .validator(Validator::LengthAtLeast(1)),
                    Attribute::required("status", AttributeType::String)
                        .validator(Validator::LengthAtLeast(1)),
                    Attribute::required("timeout", AttributeType::String),
                ]),
            )
            .description("Node conditions that determine whether a node is considered unhealthy."),
            Attribute::optional("max_unhealthy", AttributeType::IntOrString)
                .description("Remediation is not allowed above this number or percentage of unhealthy machines."),
            Attribute::optional("unhealthy_range", AttributeType::String)
                .description("Remediation is allowed only while the number of unhealthy machines is within the range, e.g. `[3-5]`.")
                .validator(Validator::pattern(&UNHEALTHY_RANGE_REGEX)),
            Attribute::optional("node_startup_timeout", AttributeType::String),
            Attribute::optional("remediation_template", object_reference())
                .description("External remediation template."),
        ]
    }
}
