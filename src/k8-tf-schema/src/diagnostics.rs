use std::fmt;
use std::fmt::Display;

use serde::Serialize;

use crate::AttributePath;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub summary: String,
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute: Option<AttributePath>,
}

impl Diagnostic {
    pub fn error(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            summary: summary.into(),
            detail: detail.into(),
            attribute: None,
        }
    }

    pub fn warning(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            ..Self::error(summary, detail)
        }
    }

    pub fn at(mut self, path: AttributePath) -> Self {
        self.attribute = Some(path);
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let severity = match self.severity {
            Severity::Error => "Error",
            Severity::Warning => "Warning",
        };
        match &self.attribute {
            Some(path) => write!(f, "{severity}: {} ({path})", self.summary)?,
            None => write!(f, "{severity}: {}", self.summary)?,
        }
        if !self.detail.is_empty() {
            write!(f, "\n\n{}", self.detail)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.0.push(diagnostic);
    }

    pub fn add_error(&mut self, summary: impl Into<String>, detail: impl Into<String>) {
        self.push(Diagnostic::error(summary, detail));
    }

    pub fn add_attribute_error(
        &mut self,
        path: AttributePath,
        summary: impl Into<String>,
        detail: impl Into<String>,
    ) {
        self.push(Diagnostic::error(summary, detail).at(path));
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.0.extend(other.0);
    }

    pub fn has_error(&self) -> bool {
        self.0.iter().any(Diagnostic::is_error)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.0.iter()
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.0.iter().filter(|d| d.is_error())
    }
}

impl From<Diagnostic> for Diagnostics {
    fn from(diagnostic: Diagnostic) -> Self {
        Self(vec![diagnostic])
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

pub const GET_ERROR_SUMMARY: &str = "Unable to GET resource";
pub const JSON_UNMARSHAL_ERROR_SUMMARY: &str = "Unable to unmarshal resource";
pub const YAML_MARSHAL_ERROR_SUMMARY: &str = "Unable to marshal resource to YAML";
pub const OFFLINE_ERROR_SUMMARY: &str = "Provider in offline mode";
pub const CONVERSION_ERROR_SUMMARY: &str = "Unable to convert configuration";

const REPORT: &str = "Please report this issue to the provider developers.";

pub fn get_error(err: &dyn Display) -> Diagnostic {
    Diagnostic::error(
        GET_ERROR_SUMMARY,
        format!("An unexpected error occurred while reading the resource. {REPORT}\n\nGET Error: {err}"),
    )
}

pub fn json_unmarshal_error(err: &dyn Display) -> Diagnostic {
    Diagnostic::error(
        JSON_UNMARSHAL_ERROR_SUMMARY,
        format!("An unexpected error occurred while parsing the resource read response. {REPORT}\n\nJSON Error: {err}"),
    )
}

pub fn yaml_marshal_error(err: &dyn Display) -> Diagnostic {
    Diagnostic::error(
        YAML_MARSHAL_ERROR_SUMMARY,
        format!("An unexpected error occurred while marshalling the resource. {REPORT}\n\nYAML Error: {err}"),
    )
}

pub fn offline_error() -> Diagnostic {
    Diagnostic::error(
        OFFLINE_ERROR_SUMMARY,
        "This provider is running in offline mode which prevents it from reading resources from a Kubernetes cluster. Set 'offline' to false in the provider configuration to enable data sources.",
    )
}

pub fn conversion_error(err: &dyn Display) -> Diagnostic {
    Diagnostic::error(
        CONVERSION_ERROR_SUMMARY,
        format!("The configuration could not be converted into a Kubernetes object. {REPORT}\n\nConversion Error: {err}"),
    )
}
