use k8_tf_schema::Attribute;
use k8_types::Spec;

/// Kubernetes kind exposed through Terraform
pub trait TerraformKind: Spec + 'static {
    const DESCRIPTION: &'static str;

    /// manifests must configure `spec`
    const SPEC_REQUIRED: bool = true;

    /// attributes of `spec`, named the Terraform way
    fn spec_attributes() -> Vec<Attribute>;
}

/// `<group>_<kind>_<version>`, e.g. `cluster_x_k8s_io_machine_health_check_v1beta1`
pub fn type_name<S: Spec>() -> String {
    let crd = S::metadata();
    let group = crd.group.replace(['.', '-'], "_");
    format!("{group}_{}_{}", snake_case(crd.names.kind), crd.version)
}

/// `EC2NodeClass` -> `ec2_node_class`
pub fn snake_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut result = String::with_capacity(name.len() + 4);
    for (i, c) in chars.iter().enumerate() {
        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_lower)
            {
                result.push('_');
            }
        }
        result.extend(c.to_lowercase());
    }
    result
}

#[cfg(test)]
mod test {

    use k8_types::capi::cluster_resource_set::ClusterResourceSetSpec;
    use k8_types::capi::machine_health_check::MachineHealthCheckSpec;
    use k8_types::karpenter::ec2_node_class::Ec2NodeClassSpec;

    use super::{snake_case, type_name};

    #[test]
    fn test_snake_case() {
        assert_eq!(snake_case("Cluster"), "cluster");
        assert_eq!(snake_case("MachineHealthCheck"), "machine_health_check");
        assert_eq!(snake_case("EC2NodeClass"), "ec2_node_class");
        assert_eq!(snake_case("HTTPRoute"), "http_route");
    }

    #[test]
    fn test_type_name() {
        assert_eq!(
            type_name::<MachineHealthCheckSpec>(),
            "cluster_x_k8s_io_machine_health_check_v1beta1"
        );
        assert_eq!(
            type_name::<ClusterResourceSetSpec>(),
            "addons_cluster_x_k8s_io_cluster_resource_set_v1beta1"
        );
        assert_eq!(
            type_name::<Ec2NodeClassSpec>(),
            "karpenter_k8s_aws_ec2_node_class_v1beta1"
        );
    }
}
