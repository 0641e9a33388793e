use std::fmt;

use serde::Serialize;
use serde::Serializer;

use crate::Validator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeMode {
    Required,
    Optional,
    Computed,
}

impl AttributeMode {
    /// user may set the attribute
    pub fn is_configurable(&self) -> bool {
        !matches!(self, Self::Computed)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "element", rename_all = "snake_case")]
pub enum AttributeType {
    String,
    Bool,
    /// number backed by an `int32` field
    Int32,
    Int64,
    Float64,
    /// Kubernetes `int-or-string`, a string on the Terraform side
    IntOrString,
    /// arbitrary JSON, e.g. fields preserving unknown fields
    Dynamic,
    List(Box<AttributeType>),
    Map(Box<AttributeType>),
    Object(Vec<Attribute>),
    ObjectList(Vec<Attribute>),
}

impl AttributeType {
    pub fn list(element: AttributeType) -> Self {
        Self::List(Box::new(element))
    }

    pub fn map(element: AttributeType) -> Self {
        Self::Map(Box::new(element))
    }

    fn into_computed(self) -> Self {
        match self {
            Self::Object(attributes) => {
                Self::Object(attributes.into_iter().map(Attribute::into_computed).collect())
            }
            Self::ObjectList(attributes) => {
                Self::ObjectList(attributes.into_iter().map(Attribute::into_computed).collect())
            }
            other => other,
        }
    }

    /// nested attributes of object types
    pub fn attributes(&self) -> Option<&[Attribute]> {
        match self {
            Self::Object(attributes) | Self::ObjectList(attributes) => Some(attributes),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attribute {
    pub name: String,
    pub json_name: String,
    #[serde(flatten)]
    pub r#type: AttributeType,
    pub mode: AttributeMode,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub validators: Vec<Validator>,
}

impl Attribute {
    pub fn new(name: impl Into<String>, r#type: AttributeType, mode: AttributeMode) -> Self {
        let name = name.into();
        Self {
            json_name: camel_case(&name),
            name,
            r#type,
            mode,
            description: String::new(),
            validators: vec![],
        }
    }

    pub fn required(name: impl Into<String>, r#type: AttributeType) -> Self {
        Self::new(name, r#type, AttributeMode::Required)
    }

    pub fn optional(name: impl Into<String>, r#type: AttributeType) -> Self {
        Self::new(name, r#type, AttributeMode::Optional)
    }

    pub fn computed(name: impl Into<String>, r#type: AttributeType) -> Self {
        Self::new(name, r#type, AttributeMode::Computed)
    }

    /// override the derived JSON name, e.g. `providerID`
    pub fn json_name(mut self, json_name: impl Into<String>) -> Self {
        self.json_name = json_name.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn validator(mut self, validator: Validator) -> Self {
        self.validators.push(validator);
        self
    }

    pub fn is_required(&self) -> bool {
        self.mode == AttributeMode::Required
    }

    /// same attribute for reading: everything computed, no validators
    pub fn into_computed(self) -> Self {
        Self {
            r#type: self.r#type.into_computed(),
            mode: AttributeMode::Computed,
            validators: vec![],
            ..self
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Schema {
    pub description: String,
    pub attributes: Vec<Attribute>,
}

impl Schema {
    pub fn new(description: impl Into<String>, attributes: Vec<Attribute>) -> Self {
        Self {
            description: description.into(),
            attributes,
        }
    }

    /// all attributes computed, used to derive data source schemas
    pub fn computed(&self) -> Self {
        Self {
            description: self.description.clone(),
            attributes: self
                .attributes
                .iter()
                .cloned()
                .map(Attribute::into_computed)
                .collect(),
        }
    }

    /// find attribute by dotted Terraform path, e.g. `spec.selector.match_labels`
    pub fn attribute(&self, path: &str) -> Option<&Attribute> {
        let mut attributes: &[Attribute] = &self.attributes;
        let mut found = None;
        for step in path.split('.') {
            let attribute = attributes.iter().find(|a| a.name == step)?;
            attributes = attribute.r#type.attributes().unwrap_or_default();
            found = Some(attribute);
        }
        found
    }
}

/// `unhealthy_range` -> `unhealthyRange`
pub fn camel_case(name: &str) -> String {
    let mut result = String::with_capacity(name.len());
    let mut upper = false;
    for c in name.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            result.extend(c.to_uppercase());
            upper = false;
        } else {
            result.push(c);
        }
    }
    result
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathStep {
    Attribute(String),
    Index(usize),
    Key(String),
}

/// location of a value inside the configuration, rendered as `spec.conditions[0].type`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributePath(Vec<PathStep>);

impl AttributePath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn attribute(&self, name: &str) -> Self {
        self.with(PathStep::Attribute(name.to_owned()))
    }

    pub fn index(&self, index: usize) -> Self {
        self.with(PathStep::Index(index))
    }

    pub fn key(&self, key: &str) -> Self {
        self.with(PathStep::Key(key.to_owned()))
    }

    pub fn steps(&self) -> &[PathStep] {
        &self.0
    }

    fn with(&self, step: PathStep) -> Self {
        let mut steps = self.0.clone();
        steps.push(step);
        Self(steps)
    }
}

impl From<&str> for AttributePath {
    fn from(path: &str) -> Self {
        Self(
            path.split('.')
                .map(|step| PathStep::Attribute(step.to_owned()))
                .collect(),
        )
    }
}

impl fmt::Display for AttributePath {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, step) in self.0.iter().enumerate() {
            match step {
                PathStep::Attribute(name) if i == 0 => write!(f, "{name}")?,
                PathStep::Attribute(name) => write!(f, ".{name}")?,
                PathStep::Index(index) => write!(f, "[{index}]")?,
                PathStep::Key(key) => write!(f, "[\"{key}\"]")?,
            }
        }
        Ok(())
    }
}

impl Serialize for AttributePath {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
