use thiserror::Error;

use crate::AttributePath;

#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("{path}: {message}")]
    Conversion { path: AttributePath, message: String },
}

impl SchemaError {
    pub fn conversion(path: &AttributePath, message: impl Into<String>) -> Self {
        Self::Conversion {
            path: path.clone(),
            message: message.into(),
        }
    }
}
