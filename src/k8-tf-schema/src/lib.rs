//!
//! # Terraform schema for Kubernetes objects
//!
//! Attributes carry both the Terraform (`snake_case`) and the Kubernetes JSON name,
//! so a single schema drives validation of user configuration and the conversion
//! in both directions.
//!
mod convert;
mod diagnostics;
mod error;
mod schema;
mod validate;
mod validators;

pub use convert::*;
pub use diagnostics::*;
pub use error::SchemaError;
pub use schema::*;
pub use validate::validate_config;
pub use validators::{Pattern, Validator};
