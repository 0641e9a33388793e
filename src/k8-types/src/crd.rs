//!
//! # CRD Definition
//!
//! Group, version and names used to address a resource through the API server.
//!
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct Crd {
    pub group: &'static str,
    pub version: &'static str,
    pub names: CrdNames,
}

#[derive(Debug, PartialEq, Eq, Hash)]
pub struct CrdNames {
    pub kind: &'static str,
    pub plural: &'static str,
    pub singular: &'static str,
}

impl Crd {
    /// `group/version`, or just the version for the core group
    pub fn api_version(&self) -> String {
        if self.group == "core" {
            return self.version.to_owned();
        }
        format!("{}/{}", self.group, self.version)
    }
}
