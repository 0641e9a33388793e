use serde_json::Map;
use serde_json::Number;
use serde_json::Value;
use tracing::trace;

use crate::{Attribute, AttributeMode, AttributePath, AttributeType, Diagnostics};

/// Check configuration against attributes.
/// Missing required attributes, values for read-only attributes, type mismatches
/// and failing validators are reported with their attribute path.
pub fn validate_config(attributes: &[Attribute], config: &Value) -> Diagnostics {
    let mut diagnostics = Diagnostics::new();
    match config {
        Value::Object(object) => {
            validate_object(attributes, object, &AttributePath::root(), &mut diagnostics)
        }
        other => diagnostics.add_error(
            "Invalid configuration",
            format!("configuration must be an object, got: {}", type_name(other)),
        ),
    }
    trace!(count = diagnostics.len(), "validated configuration");
    diagnostics
}

fn validate_object(
    attributes: &[Attribute],
    object: &Map<String, Value>,
    path: &AttributePath,
    diagnostics: &mut Diagnostics,
) {
    for key in object.keys() {
        if !attributes.iter().any(|a| &a.name == key) {
            diagnostics.add_attribute_error(
                path.attribute(key),
                "Unsupported argument",
                format!("An argument named \"{key}\" is not expected here."),
            );
        }
    }

    for attribute in attributes {
        let attribute_path = path.attribute(&attribute.name);
        let value = object.get(&attribute.name).unwrap_or(&Value::Null);
        if value.is_null() {
            if attribute.mode == AttributeMode::Required {
                diagnostics.add_attribute_error(
                    attribute_path,
                    "Missing required argument",
                    format!(
                        "The argument \"{}\" is required, but no definition was found.",
                        attribute.name
                    ),
                );
            }
            continue;
        }

        if !attribute.mode.is_configurable() {
            diagnostics.add_attribute_error(
                attribute_path,
                "Invalid Configuration for Read-Only Attribute",
                "Cannot set value for this attribute as the provider has marked it as read-only. Remove the configuration line setting the value.",
            );
            continue;
        }

        validate_value(attribute, value, &attribute_path, diagnostics);
    }
}

fn validate_value(
    attribute: &Attribute,
    value: &Value,
    path: &AttributePath,
    diagnostics: &mut Diagnostics,
) {
    if !check_type(&attribute.r#type, value, path, diagnostics) {
        return;
    }

    for validator in &attribute.validators {
        if let Err(detail) = validator.validate(value) {
            diagnostics.add_attribute_error(
                path.clone(),
                "Invalid Attribute Value",
                format!("Attribute {path} {detail}"),
            );
        }
    }
}

/// returns false when the value does not have the declared type
fn check_type(
    r#type: &AttributeType,
    value: &Value,
    path: &AttributePath,
    diagnostics: &mut Diagnostics,
) -> bool {
    let valid = match (r#type, value) {
        (_, Value::Null) => true,
        (AttributeType::String, Value::String(_)) => true,
        (AttributeType::Bool, Value::Bool(_)) => true,
        (AttributeType::Int32 | AttributeType::IntOrString, Value::Number(n)) => is_i32(n),
        (AttributeType::Int64, Value::Number(n)) => n.is_i64(),
        (AttributeType::Float64, Value::Number(_)) => true,
        (AttributeType::IntOrString, Value::String(_)) => true,
        (AttributeType::Dynamic, _) => true,
        (AttributeType::List(element), Value::Array(items)) => {
            for (i, item) in items.iter().enumerate() {
                check_type(element, item, &path.index(i), diagnostics);
            }
            true
        }
        (AttributeType::Map(element), Value::Object(map)) => {
            for (key, item) in map {
                check_type(element, item, &path.key(key), diagnostics);
            }
            true
        }
        (AttributeType::Object(attributes), Value::Object(object)) => {
            validate_object(attributes, object, path, diagnostics);
            true
        }
        (AttributeType::ObjectList(attributes), Value::Array(items)) => {
            for (i, item) in items.iter().enumerate() {
                let item_path = path.index(i);
                match item {
                    Value::Object(object) => {
                        validate_object(attributes, object, &item_path, diagnostics)
                    }
                    other => diagnostics.add_attribute_error(
                        item_path,
                        "Incorrect attribute value type",
                        format!("expected object, got: {}", type_name(other)),
                    ),
                }
            }
            true
        }
        _ => false,
    };

    if !valid {
        diagnostics.add_attribute_error(
            path.clone(),
            "Incorrect attribute value type",
            format!(
                "expected {}, got: {}",
                expected_name(r#type),
                type_name(value)
            ),
        );
    }
    valid
}

fn expected_name(r#type: &AttributeType) -> &'static str {
    match r#type {
        AttributeType::String => "string",
        AttributeType::Bool => "bool",
        AttributeType::Int32 => "number (int32)",
        AttributeType::Int64 => "number (int64)",
        AttributeType::Float64 => "number",
        AttributeType::IntOrString => "string or integer",
        AttributeType::Dynamic => "any value",
        AttributeType::List(_) => "list",
        AttributeType::Map(_) => "map",
        AttributeType::Object(_) => "object",
        AttributeType::ObjectList(_) => "list of objects",
    }
}

fn is_i32(n: &Number) -> bool {
    n.as_i64().is_some_and(|i| i32::try_from(i).is_ok())
}

pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod test {

    use std::sync::LazyLock;

    use regex::Regex;
    use serde_json::json;

    use crate::{validate_config, Attribute, AttributeType, Validator};

    static RANGE_REGEX: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"^\[[0-9]+-[0-9]+\]$").unwrap());

    fn attributes() -> Vec<Attribute> {
        vec![
            Attribute::computed("id", AttributeType::String),
            Attribute::required(
                "metadata",
                AttributeType::Object(vec![
                    Attribute::required("name", AttributeType::String).validator(Validator::Name),
                    Attribute::optional("labels", AttributeType::map(AttributeType::String))
                        .validator(Validator::LabelKeys),
                ]),
            ),
            Attribute::optional(
                "spec",
                AttributeType::Object(vec![
                    Attribute::optional("unhealthy_range", AttributeType::String)
                        .validator(Validator::pattern(&RANGE_REGEX)),
                    Attribute::optional("max_unhealthy", AttributeType::IntOrString),
                    Attribute::optional(
                        "conditions",
                        AttributeType::ObjectList(vec![Attribute::required(
                            "type",
                            AttributeType::String,
                        )]),
                    ),
                    Attribute::optional("cidr_blocks", AttributeType::list(AttributeType::String))
                        .validator(Validator::SizeAtLeast(1)),
                    Attribute::optional("replicas", AttributeType::Int32),
                ]),
            ),
        ]
    }

    #[test]
    fn test_valid_config() {
        let config = json!({
            "metadata": { "name": "workers", "labels": { "app": "demo" } },
            "spec": {
                "unhealthy_range": "[1-3]",
                "max_unhealthy": "40%",
                "conditions": [ { "type": "Ready" } ],
                "cidr_blocks": ["10.0.0.0/16"]
            }
        });
        let diagnostics = validate_config(&attributes(), &config);
        assert!(diagnostics.is_empty(), "{diagnostics:?}");
    }

    #[test]
    fn test_missing_and_read_only() {
        let config = json!({ "id": "x", "spec": null });
        let diagnostics = validate_config(&attributes(), &config);
        let paths: Vec<String> = diagnostics
            .iter()
            .map(|d| d.attribute.as_ref().expect("path").to_string())
            .collect();
        assert_eq!(paths, vec!["id", "metadata"]);
    }

    #[test]
    fn test_validator_failures() {
        let config = json!({
            "metadata": { "name": "Bad Name", "labels": { "-bad": "x" } },
            "spec": { "unhealthy_range": "5", "cidr_blocks": [] }
        });
        let diagnostics = validate_config(&attributes(), &config);
        let paths: Vec<String> = diagnostics
            .iter()
            .map(|d| d.attribute.as_ref().expect("path").to_string())
            .collect();
        assert_eq!(
            paths,
            vec![
                "metadata.name",
                "metadata.labels",
                "spec.unhealthy_range",
                "spec.cidr_blocks"
            ]
        );
        assert!(diagnostics.iter().all(|d| d.summary == "Invalid Attribute Value"));
    }

    #[test]
    fn test_type_errors() {
        let config = json!({
            "metadata": { "name": "ok", "extra": true },
            "spec": {
                "max_unhealthy": 1.5,
                "conditions": [ { "type": 3 }, "nope" ],
                "cidr_blocks": [ 1 ],
                "replicas": 3000000000_i64
            }
        });
        let diagnostics = validate_config(&attributes(), &config);
        let paths: Vec<String> = diagnostics
            .iter()
            .map(|d| d.attribute.as_ref().expect("path").to_string())
            .collect();
        assert_eq!(
            paths,
            vec![
                "metadata.extra",
                "spec.max_unhealthy",
                "spec.conditions[0].type",
                "spec.conditions[1]",
                "spec.cidr_blocks[0]",
                "spec.replicas"
            ]
        );
        let replicas = diagnostics.iter().last().expect("replicas");
        assert_eq!(replicas.detail, "expected number (int32), got: number");
    }

    #[test]
    fn test_int32_bounds() {
        let config = |replicas: i64, max_unhealthy: i64| {
            json!({
                "metadata": { "name": "ok" },
                "spec": { "replicas": replicas, "max_unhealthy": max_unhealthy }
            })
        };
        let max = i64::from(i32::MAX);
        assert!(validate_config(&attributes(), &config(max, max)).is_empty());

        let diagnostics = validate_config(&attributes(), &config(max + 1, max + 1));
        let paths: Vec<String> = diagnostics
            .iter()
            .map(|d| d.attribute.as_ref().expect("path").to_string())
            .collect();
        assert_eq!(paths, vec!["spec.max_unhealthy", "spec.replicas"]);
    }

    #[test]
    fn test_config_not_object() {
        let diagnostics = validate_config(&attributes(), &json!([]));
        assert!(diagnostics.has_error());
    }
}
