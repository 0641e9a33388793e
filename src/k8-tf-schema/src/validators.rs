use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use serde::Serializer;
use serde_json::Value;

/// DNS-1123 subdomain, used for object names
static DNS_SUBDOMAIN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?(\.[a-z0-9]([-a-z0-9]*[a-z0-9])?)*$").unwrap()
});

/// DNS-1123 label, used for namespaces
static DNS_LABEL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?$").unwrap());

/// name part of a qualified key and label values
static QUALIFIED_NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z0-9][-A-Za-z0-9_.]*)?[A-Za-z0-9]$").unwrap());

const DNS_SUBDOMAIN_MAX: usize = 253;
const DNS_LABEL_MAX: usize = 63;
const ANNOTATIONS_TOTAL_MAX: usize = 256 * 1024;

/// Regular expression compiled once, compared and serialized by its source
#[derive(Debug, Clone, Copy)]
pub struct Pattern(&'static Regex);

impl Pattern {
    pub fn is_match(&self, value: &str) -> bool {
        self.0.is_match(value)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Serialize for Pattern {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Validator {
    /// string matches regular expression
    Pattern(Pattern),
    LengthBetween(usize, usize),
    LengthAtLeast(usize),
    LengthAtMost(usize),
    OneOf(Vec<String>),
    Int64Between(i64, i64),
    Int64AtLeast(i64),
    /// object name
    Name,
    Namespace,
    LabelKeys,
    LabelValues,
    AnnotationKeys,
    /// minimum number of list elements
    SizeAtLeast(usize),
}

impl Validator {
    /// regex is usually a `static LazyLock<Regex>`
    pub fn pattern(regex: &'static Regex) -> Self {
        Self::Pattern(Pattern(regex))
    }

    pub fn one_of(values: &[&str]) -> Self {
        Self::OneOf(values.iter().map(|v| (*v).to_owned()).collect())
    }

    /// Check a non null value. Values of the wrong shape are left to type checking.
    pub fn validate(&self, value: &Value) -> Result<(), String> {
        match (self, value) {
            (Self::Pattern(pattern), Value::String(s)) => {
                if pattern.is_match(s) {
                    Ok(())
                } else {
                    Err(format!("value must match regular expression '{pattern}', got: \"{s}\""))
                }
            }
            (Self::LengthBetween(min, max), Value::String(s)) => {
                let len = s.chars().count();
                if len < *min || len > *max {
                    Err(format!(
                        "string length must be between {min} and {max}, got: {len}"
                    ))
                } else {
                    Ok(())
                }
            }
            (Self::LengthAtLeast(min), Value::String(s)) => {
                let len = s.chars().count();
                if len < *min {
                    Err(format!("string length must be at least {min}, got: {len}"))
                } else {
                    Ok(())
                }
            }
            (Self::LengthAtMost(max), Value::String(s)) => {
                let len = s.chars().count();
                if len > *max {
                    Err(format!("string length must be at most {max}, got: {len}"))
                } else {
                    Ok(())
                }
            }
            (Self::OneOf(values), Value::String(s)) => {
                if values.iter().any(|v| v == s) {
                    Ok(())
                } else {
                    Err(format!(
                        "value must be one of: [{}], got: \"{s}\"",
                        values
                            .iter()
                            .map(|v| format!("\"{v}\""))
                            .collect::<Vec<_>>()
                            .join(" ")
                    ))
                }
            }
            (Self::Int64Between(min, max), Value::Number(n)) => match n.as_i64() {
                Some(i) if i < *min || i > *max => {
                    Err(format!("value must be between {min} and {max}, got: {i}"))
                }
                _ => Ok(()),
            },
            (Self::Int64AtLeast(min), Value::Number(n)) => match n.as_i64() {
                Some(i) if i < *min => Err(format!("value must be at least {min}, got: {i}")),
                _ => Ok(()),
            },
            (Self::Name, Value::String(s)) => validate_name(s),
            (Self::Namespace, Value::String(s)) => validate_namespace(s),
            (Self::LabelKeys, Value::Object(map)) => {
                map.keys().try_for_each(|key| validate_qualified_key(key))
            }
            (Self::AnnotationKeys, Value::Object(map)) => {
                map.keys().try_for_each(|key| validate_qualified_key(key))?;
                let total: usize = map
                    .iter()
                    .map(|(k, v)| k.len() + v.as_str().map(str::len).unwrap_or_default())
                    .sum();
                if total > ANNOTATIONS_TOTAL_MAX {
                    Err(format!(
                        "annotations size must be at most {ANNOTATIONS_TOTAL_MAX} bytes, got: {total}"
                    ))
                } else {
                    Ok(())
                }
            }
            (Self::LabelValues, Value::Object(map)) => map
                .values()
                .filter_map(Value::as_str)
                .try_for_each(validate_label_value),
            (Self::SizeAtLeast(min), Value::Array(items)) => {
                if items.len() < *min {
                    Err(format!(
                        "list must contain at least {min} elements, got: {}",
                        items.len()
                    ))
                } else {
                    Ok(())
                }
            }
            _ => Ok(()),
        }
    }
}

impl fmt::Display for Validator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Pattern(pattern) => write!(f, "value must match regular expression '{pattern}'"),
            Self::LengthBetween(min, max) => {
                write!(f, "string length must be between {min} and {max}")
            }
            Self::LengthAtLeast(min) => write!(f, "string length must be at least {min}"),
            Self::LengthAtMost(max) => write!(f, "string length must be at most {max}"),
            Self::OneOf(values) => write!(f, "value must be one of: {}", values.join(", ")),
            Self::Int64Between(min, max) => write!(f, "value must be between {min} and {max}"),
            Self::Int64AtLeast(min) => write!(f, "value must be at least {min}"),
            Self::Name => write!(f, "value must be a valid DNS subdomain name"),
            Self::Namespace => write!(f, "value must be a valid DNS label"),
            Self::LabelKeys => write!(f, "keys must be valid label keys"),
            Self::LabelValues => write!(f, "values must be valid label values"),
            Self::AnnotationKeys => write!(f, "keys must be valid annotation keys"),
            Self::SizeAtLeast(min) => write!(f, "list must contain at least {min} elements"),
        }
    }
}

fn validate_name(value: &str) -> Result<(), String> {
    if value.len() > DNS_SUBDOMAIN_MAX {
        return Err(format!(
            "name must be at most {DNS_SUBDOMAIN_MAX} characters, got: {}",
            value.len()
        ));
    }
    if !DNS_SUBDOMAIN_REGEX.is_match(value) {
        return Err(format!(
            "\"{value}\" is not a valid name: lowercase alphanumeric characters, '-' or '.', starting and ending with an alphanumeric character"
        ));
    }
    Ok(())
}

fn validate_namespace(value: &str) -> Result<(), String> {
    if value.len() > DNS_LABEL_MAX {
        return Err(format!(
            "namespace must be at most {DNS_LABEL_MAX} characters, got: {}",
            value.len()
        ));
    }
    if !DNS_LABEL_REGEX.is_match(value) {
        return Err(format!(
            "\"{value}\" is not a valid namespace: lowercase alphanumeric characters or '-', starting and ending with an alphanumeric character"
        ));
    }
    Ok(())
}

/// `[prefix/]name`, prefix is a DNS subdomain
fn validate_qualified_key(key: &str) -> Result<(), String> {
    let (prefix, name) = match key.split_once('/') {
        Some((prefix, name)) => (Some(prefix), name),
        None => (None, key),
    };
    if let Some(prefix) = prefix {
        if prefix.is_empty()
            || prefix.len() > DNS_SUBDOMAIN_MAX
            || !DNS_SUBDOMAIN_REGEX.is_match(prefix)
        {
            return Err(format!("\"{key}\" has an invalid prefix: must be a DNS subdomain"));
        }
    }
    if name.is_empty() || name.len() > DNS_LABEL_MAX || !QUALIFIED_NAME_REGEX.is_match(name) {
        return Err(format!(
            "\"{key}\" is not a valid key: name part must be at most {DNS_LABEL_MAX} alphanumeric characters, '-', '_' or '.'"
        ));
    }
    Ok(())
}

fn validate_label_value(value: &str) -> Result<(), String> {
    if value.is_empty() {
        return Ok(());
    }
    if value.len() > DNS_LABEL_MAX || !QUALIFIED_NAME_REGEX.is_match(value) {
        return Err(format!(
            "\"{value}\" is not a valid label value: at most {DNS_LABEL_MAX} alphanumeric characters, '-', '_' or '.'"
        ));
    }
    Ok(())
}
