use std::io::Error as IoError;

use http::header::InvalidHeaderValue;
use http::status::StatusCode;
use http::uri::InvalidUri;
use http::Error as HttpError;
use hyper::Error as HyperError;
use thiserror::Error;

use k8_config::ConfigError;
use k8_metadata_client::MetadataClientError;
use k8_types::MetaStatus;

#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("IO error: {0}")]
    IoError(#[from] IoError),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("HTTP error: {0}")]
    HttpError(#[from] HttpError),
    #[error("Invalid HTTP header: {0}")]
    InvalidHttpHeader(#[from] InvalidHeaderValue),
    #[error("Invalid URI: {0}")]
    InvalidUri(#[from] InvalidUri),
    #[error("Kubernetes config error: {0}")]
    K8ConfigError(#[from] ConfigError),
    #[error("Hyper error: {0}")]
    HyperError(#[from] HyperError),
    #[error("TLS error: {0}")]
    TlsError(#[from] rustls::Error),
    #[error("base64 decoding error: {0}")]
    Base64Error(#[from] base64::DecodeError),
    #[error("{0}")]
    ApiResponse(MetaStatus),
    #[error("client error: {0}")]
    Client(StatusCode),
    #[error("{0}")]
    Other(String),
}

impl From<MetaStatus> for ClientError {
    fn from(status: MetaStatus) -> Self {
        Self::ApiResponse(status)
    }
}

impl MetadataClientError for ClientError {
    fn not_found(&self) -> bool {
        match self {
            Self::ApiResponse(status) => status.code == Some(StatusCode::NOT_FOUND.as_u16()),
            Self::Client(status) => status == &StatusCode::NOT_FOUND,
            _ => false,
        }
    }
}
