use std::fmt;

use async_trait::async_trait;
use http::header::InvalidHeaderValue;
use hyper::body::to_bytes;
use hyper::header::HeaderValue;
use hyper::header::ACCEPT;
use hyper::header::AUTHORIZATION;
use hyper::Body;
use hyper::Request;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use tracing::error;
use tracing::instrument;
use tracing::trace;

use k8_config::K8Config;
use k8_metadata_client::MetadataClient;
use k8_metadata_client::NameSpace;
use k8_types::Crd;
use k8_types::MetaStatus;

use crate::uri::object_uri;
use crate::ClientError;

use super::{HyperClient, HyperConfigBuilder};

/// K8 Cluster accessible thru API
pub struct K8Client {
    client: HyperClient,
    host: String,
    token: Option<String>,
}

impl fmt::Debug for K8Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("K8Client")
            .field("host", &self.host)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl K8Client {
    pub fn new(config: K8Config) -> Result<Self, ClientError> {
        let helper = HyperConfigBuilder::new(config)?;
        let host = helper.host();
        let token = helper.token();
        let client = helper.build()?;
        debug!(%host, has_token = token.is_some(), "k8 client configured");
        Ok(Self {
            client,
            host,
            token,
        })
    }

    pub fn hostname(&self) -> &str {
        &self.host
    }

    fn finish_request<B>(&self, request: &mut Request<B>) -> Result<(), InvalidHeaderValue> {
        if let Some(ref token) = self.token {
            let full_token = format!("Bearer {token}");
            request
                .headers_mut()
                .insert(AUTHORIZATION, HeaderValue::from_str(&full_token)?);
        }
        Ok(())
    }

    /// send request, non success responses are decoded as `Status`
    async fn handle_request<T>(&self, mut request: Request<Body>) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
    {
        self.finish_request(&mut request)?;
        trace!("request url: {}", request.uri());

        let response = self.client.request(request).await?;
        let status = response.status();
        let body = to_bytes(response.into_body()).await?;

        if status.is_success() {
            serde_json::from_slice(&body).map_err(|err| {
                error!("json error: {}", err);
                error!("source: {}", String::from_utf8_lossy(&body));
                err.into()
            })
        } else {
            trace!(%status, "error response received");
            match serde_json::from_slice::<MetaStatus>(&body) {
                Ok(mut api_status) => {
                    api_status.code.get_or_insert(status.as_u16());
                    Err(api_status.into())
                }
                Err(err) => {
                    debug!("status body not decodable: {}", err);
                    Err(ClientError::Client(status))
                }
            }
        }
    }
}

#[async_trait]
impl MetadataClient for K8Client {
    type MetadataClientError = ClientError;

    #[instrument(skip(self, crd), fields(plural = %crd.names.plural))]
    async fn retrieve_object(
        &self,
        crd: &Crd,
        namespace: NameSpace,
        name: &str,
    ) -> Result<Value, Self::MetadataClientError> {
        let uri = object_uri(crd, self.hostname(), namespace, name)?;
        debug!("retrieving object: {}", uri);
        let request = Request::get(uri)
            .header(ACCEPT, "application/json")
            .body(Body::empty())?;
        self.handle_request(request).await
    }
}
