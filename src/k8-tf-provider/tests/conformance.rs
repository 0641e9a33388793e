//! Schema attributes agree with the typed structs of every kind

use serde_json::json;
use serde_json::Map;
use serde_json::Value;

use k8_tf_provider::schema::{from_kubernetes, to_kubernetes, Attribute, AttributeType};
use k8_tf_provider::TerraformKind;
use k8_types::capi::cluster::ClusterSpec;
use k8_types::capi::cluster_resource_set::ClusterResourceSetSpec;
use k8_types::capi::machine_deployment::MachineDeploymentSpec;
use k8_types::capi::machine_health_check::MachineHealthCheckSpec;
use k8_types::karpenter::ec2_node_class::Ec2NodeClassSpec;
use k8_types::karpenter::node_pool::NodePoolSpec;
use k8_types::{ManifestMeta, ManifestObj};

/// configuration with every configurable attribute when `full`, only required ones otherwise
fn sample(attributes: &[Attribute], full: bool) -> Value {
    let object: Map<String, Value> = attributes
        .iter()
        .filter(|a| a.mode.is_configurable() && (full || a.is_required()))
        .map(|a| (a.name.clone(), sample_value(&a.r#type, full)))
        .collect();
    Value::Object(object)
}

/// Integers sit at the edge of their declared width: an `Int64` attribute backed by
/// an `i32` field fails to decode, an `Int32` one must hold `i32::MAX`.
fn sample_value(r#type: &AttributeType, full: bool) -> Value {
    match r#type {
        AttributeType::String => json!("sample"),
        AttributeType::Bool => json!(true),
        AttributeType::Int32 => json!(i32::MAX),
        AttributeType::Int64 => json!(i64::from(i32::MAX) + 1),
        AttributeType::Float64 => json!(1.5),
        AttributeType::IntOrString => json!("1"),
        AttributeType::Dynamic => json!({ "key": ["value", 1] }),
        AttributeType::List(element) => json!([sample_value(element, full)]),
        AttributeType::Map(element) => json!({ "key": sample_value(element, full) }),
        AttributeType::Object(attributes) => sample(attributes, full),
        AttributeType::ObjectList(attributes) => json!([sample(attributes, full)]),
    }
}

/// (JSON pointer of parent, attribute name) of every required attribute in the full sample
fn required_attributes(attributes: &[Attribute], parent: &str, found: &mut Vec<(String, String)>) {
    for attribute in attributes.iter().filter(|a| a.mode.is_configurable()) {
        if attribute.is_required() {
            found.push((parent.to_owned(), attribute.name.clone()));
        }
        match &attribute.r#type {
            AttributeType::Object(nested) => {
                required_attributes(nested, &format!("{parent}/{}", attribute.name), found)
            }
            AttributeType::ObjectList(nested) => {
                required_attributes(nested, &format!("{parent}/{}/0", attribute.name), found)
            }
            _ => {}
        }
    }
}

fn check_kind<S>()
where
    S: TerraformKind + PartialEq,
{
    let attributes = S::spec_attributes();
    let label = S::label();

    let minimal = to_kubernetes(&attributes, &sample(&attributes, false)).expect("minimal");
    serde_json::from_value::<S>(minimal)
        .unwrap_or_else(|err| panic!("{label}: minimal object does not decode: {err}"));

    let config = sample(&attributes, true);
    let full = to_kubernetes(&attributes, &config).expect("full");
    let spec: S = serde_json::from_value(full.clone())
        .unwrap_or_else(|err| panic!("{label}: full object does not decode: {err}"));
    assert_eq!(
        serde_json::to_value(&spec).expect("encode"),
        full,
        "{label}: attribute missing from the struct"
    );
    assert_eq!(
        from_kubernetes(&attributes, &full),
        config,
        "{label}: projection differs from configuration"
    );

    let manifest = ManifestObj::new(
        ManifestMeta {
            name: "sample".to_owned(),
            namespace: Some("default".to_owned()),
            ..Default::default()
        },
        spec,
    );
    let yaml = serde_yaml::to_string(&manifest).expect("yaml");
    let parsed: ManifestObj<S> = serde_yaml::from_str(&yaml).expect("parse yaml");
    assert_eq!(parsed, manifest, "{label}: yaml round trip");

    let mut required = vec![];
    required_attributes(&attributes, "", &mut required);
    for (parent, name) in required {
        let mut config = sample(&attributes, true);
        let removed = config
            .pointer_mut(&parent)
            .and_then(Value::as_object_mut)
            .and_then(|object| object.remove(&name));
        assert!(removed.is_some(), "{label}: {parent}/{name} not in sample");

        let value = to_kubernetes(&attributes, &config).expect("convert");
        assert!(
            serde_json::from_value::<S>(value).is_err(),
            "{label}: {parent}/{name} is required but decodes without it"
        );
    }
}

#[test]
fn test_cluster() {
    check_kind::<ClusterSpec>();
}

#[test]
fn test_machine_deployment() {
    check_kind::<MachineDeploymentSpec>();
}

#[test]
fn test_machine_health_check() {
    check_kind::<MachineHealthCheckSpec>();
}

#[test]
fn test_cluster_resource_set() {
    check_kind::<ClusterResourceSetSpec>();
}

#[test]
fn test_node_pool() {
    check_kind::<NodePoolSpec>();
}

#[test]
fn test_ec2_node_class() {
    check_kind::<Ec2NodeClassSpec>();
}
