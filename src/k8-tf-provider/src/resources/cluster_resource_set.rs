use k8_tf_schema::{Attribute, AttributeType, Validator};
use k8_types::capi::cluster_resource_set::ClusterResourceSetSpec;

use super::common::label_selector;
use crate::TerraformKind;

impl TerraformKind for ClusterResourceSetSpec {
    const DESCRIPTION: &'static str =
        "ClusterResourceSet is the Schema for the clusterresourcesets API.";

    fn spec_attributes() -> Vec<Attribute> {
        vec![
            Attribute::required("cluster_selector", label_selector())
                .description("Label selector for clusters, an empty selector matches nothing."),
            Attribute::optional(
                "resources",
                AttributeType::ObjectList(vec![
                    Attribute::required("kind", AttributeType::String)
                        .validator(Validator::one_of(&["Secret", "ConfigMap"])),
                    Attribute::required("name", AttributeType::String)
                        .validator(Validator::LengthAtLeast(1)),
                ]),
            )
            .description("Secrets and ConfigMaps applied to matching clusters."),
            Attribute::optional("strategy", AttributeType::String)
                .validator(Validator::one_of(&["ApplyOnce", "Reconcile"])),
        ]
    }
}
