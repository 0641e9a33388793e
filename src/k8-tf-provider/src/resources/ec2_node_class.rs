use k8_tf_schema::{Attribute, AttributeType, Validator};
use k8_types::karpenter::ec2_node_class::Ec2NodeClassSpec;

use super::common::string_map;
use crate::TerraformKind;

const AMI_FAMILIES: &[&str] = &[
    "AL2",
    "AL2023",
    "Bottlerocket",
    "Ubuntu",
    "Custom",
    "Windows2019",
    "Windows2022",
];

const VOLUME_TYPES: &[&str] = &["standard", "io1", "io2", "gp2", "sc1", "st1", "gp3"];

fn selector_term(name: bool, owner: bool) -> AttributeType {
    let mut attributes = vec![Attribute::optional("id", AttributeType::String)];
    if name {
        attributes.push(Attribute::optional("name", AttributeType::String));
    }
    if owner {
        attributes.push(Attribute::optional("owner", AttributeType::String));
    }
    attributes.push(Attribute::optional("tags", string_map()));
    AttributeType::ObjectList(attributes)
}

fn metadata_options() -> AttributeType {
    AttributeType::Object(vec![
        Attribute::optional("http_endpoint", AttributeType::String)
            .validator(Validator::one_of(&["enabled", "disabled"])),
        Attribute::optional("http_protocol_ipv6", AttributeType::String)
            .json_name("httpProtocolIPv6")
            .validator(Validator::one_of(&["enabled", "disabled"])),
        Attribute::optional("http_put_response_hop_limit", AttributeType::Int64)
            .validator(Validator::Int64Between(1, 64)),
        Attribute::optional("http_tokens", AttributeType::String)
            .validator(Validator::one_of(&["required", "optional"])),
    ])
}

fn block_device_mappings() -> AttributeType {
    AttributeType::ObjectList(vec![
        Attribute::optional("device_name", AttributeType::String),
        Attribute::optional("root_volume", AttributeType::Bool),
        Attribute::optional(
            "ebs",
            AttributeType::Object(vec![
                Attribute::optional("delete_on_termination", AttributeType::Bool),
                Attribute::optional("encrypted", AttributeType::Bool),
                Attribute::optional("iops", AttributeType::Int64),
                Attribute::optional("kms_key_id", AttributeType::String).json_name("kmsKeyID"),
                Attribute::optional("snapshot_id", AttributeType::String).json_name("snapshotID"),
                Attribute::optional("throughput", AttributeType::Int64),
                Attribute::optional("volume_size", AttributeType::String),
                Attribute::optional("volume_type", AttributeType::String)
                    .validator(Validator::one_of(VOLUME_TYPES)),
            ]),
        ),
    ])
}

impl TerraformKind for Ec2NodeClassSpec {
    const DESCRIPTION: &'static str = "EC2NodeClass is the Schema for the EC2NodeClass API.";

    fn spec_attributes() -> Vec<Attribute> {
        vec![
            Attribute::required("subnet_selector_terms", selector_term(false, false))
                .description("Selects subnets by tags or id, terms are ORed.")
                .validator(Validator::SizeAtLeast(1)),
            Attribute::required("security_group_selector_terms", selector_term(true, false))
                .description("Selects security groups by tags, id or name, terms are ORed.")
                .validator(Validator::SizeAtLeast(1)),
            Attribute::optional("ami_family", AttributeType::String)
                .validator(Validator::one_of(AMI_FAMILIES)),
            Attribute::optional("ami_selector_terms", selector_term(true, true)),
            Attribute::optional("role", AttributeType::String)
                .description("IAM role used to generate the instance profile."),
            Attribute::optional("instance_profile", AttributeType::String),
            Attribute::optional("tags", string_map())
                .description("Tags applied to all AWS resources created for the node class."),
            Attribute::optional("user_data", AttributeType::String),
            Attribute::optional("detailed_monitoring", AttributeType::Bool),
            Attribute::optional("associate_public_ip_address", AttributeType::Bool)
                .json_name("associatePublicIPAddress"),
            Attribute::optional("metadata_options", metadata_options())
                .description("Instance metadata service options."),
            Attribute::optional("block_device_mappings", block_device_mappings()),
        ]
    }
}
