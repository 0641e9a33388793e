use serde_json::Map;
use serde_json::Value;

use crate::validate::type_name;
use crate::{Attribute, AttributePath, AttributeType, SchemaError};

/// Terraform object to Kubernetes JSON.
/// Attribute names become JSON names, null and read-only attributes are dropped
/// and int-or-string values holding a canonical int32 become numbers.
pub fn to_kubernetes(attributes: &[Attribute], value: &Value) -> Result<Value, SchemaError> {
    to_kubernetes_object(attributes, value, &AttributePath::root())
}

fn to_kubernetes_object(
    attributes: &[Attribute],
    value: &Value,
    path: &AttributePath,
) -> Result<Value, SchemaError> {
    let object = value.as_object().ok_or_else(|| {
        SchemaError::conversion(path, format!("expected object, got: {}", type_name(value)))
    })?;

    let mut result = Map::new();
    for attribute in attributes {
        if !attribute.mode.is_configurable() {
            continue;
        }
        match object.get(&attribute.name) {
            None | Some(Value::Null) => {}
            Some(value) => {
                let converted = to_kubernetes_value(
                    &attribute.r#type,
                    value,
                    &path.attribute(&attribute.name),
                )?;
                result.insert(attribute.json_name.clone(), converted);
            }
        }
    }
    Ok(Value::Object(result))
}

fn to_kubernetes_value(
    r#type: &AttributeType,
    value: &Value,
    path: &AttributePath,
) -> Result<Value, SchemaError> {
    match (r#type, value) {
        (AttributeType::IntOrString, Value::String(s)) => Ok(match canonical_i32(s) {
            Some(i) => Value::from(i),
            None => value.clone(),
        }),
        (AttributeType::List(element), Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(i, item)| to_kubernetes_value(element, item, &path.index(i)))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        (AttributeType::Map(element), Value::Object(map)) => map
            .iter()
            .map(|(key, item)| {
                to_kubernetes_value(element, item, &path.key(key)).map(|v| (key.clone(), v))
            })
            .collect::<Result<Map<_, _>, _>>()
            .map(Value::Object),
        (AttributeType::Object(attributes), _) => to_kubernetes_object(attributes, value, path),
        (AttributeType::ObjectList(attributes), Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(i, item)| to_kubernetes_object(attributes, item, &path.index(i)))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        (AttributeType::List(_) | AttributeType::ObjectList(_), _) => Err(
            SchemaError::conversion(path, format!("expected list, got: {}", type_name(value))),
        ),
        (AttributeType::Map(_), _) => Err(SchemaError::conversion(
            path,
            format!("expected map, got: {}", type_name(value)),
        )),
        _ => Ok(value.clone()),
    }
}

/// `"007"`, `"+5"` or values beyond int32 stay strings
fn canonical_i32(s: &str) -> Option<i32> {
    s.parse::<i32>().ok().filter(|i| i.to_string() == s)
}

/// Kubernetes JSON to Terraform object.
/// Every attribute is present in the result, null when absent from the object.
pub fn from_kubernetes(attributes: &[Attribute], value: &Value) -> Value {
    let mut result = Map::new();
    for attribute in attributes {
        let converted = match value.get(&attribute.json_name) {
            None | Some(Value::Null) => Value::Null,
            Some(item) => from_kubernetes_value(&attribute.r#type, item),
        };
        result.insert(attribute.name.clone(), converted);
    }
    Value::Object(result)
}

fn from_kubernetes_value(r#type: &AttributeType, value: &Value) -> Value {
    match (r#type, value) {
        (_, Value::Null) => Value::Null,
        (AttributeType::IntOrString, Value::Number(n)) => Value::String(n.to_string()),
        (AttributeType::List(element), Value::Array(items)) => Value::Array(
            items
                .iter()
                .map(|item| from_kubernetes_value(element, item))
                .collect(),
        ),
        (AttributeType::Map(element), Value::Object(map)) => Value::Object(
            map.iter()
                .map(|(key, item)| (key.clone(), from_kubernetes_value(element, item)))
                .collect(),
        ),
        (AttributeType::Object(attributes), Value::Object(_)) => {
            from_kubernetes(attributes, value)
        }
        (AttributeType::ObjectList(attributes), Value::Array(items)) => Value::Array(
            items
                .iter()
                .map(|item| from_kubernetes(attributes, item))
                .collect(),
        ),
        _ => value.clone(),
    }
}
