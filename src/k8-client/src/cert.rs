use std::path::Path;
use std::process::Command;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Deserialize;
use tracing::debug;
use tracing::warn;

use k8_config::Exec;
use k8_config::K8Config;
use k8_config::KubeConfig;
use k8_config::PodConfig;

use crate::ClientError;

pub trait ConfigBuilder: Sized {
    type Client;

    fn new() -> Self;

    fn build(self) -> Result<Self::Client, ClientError>;

    fn load_ca_certificate(self, ca_path: impl AsRef<Path>) -> Result<Self, ClientError>;

    // load from ca data
    fn load_ca_cert_with_data(self, data: Vec<u8>) -> Result<Self, ClientError>;

    // load client certificate (crt) and private key
    fn load_client_certificate<P: AsRef<Path>>(
        self,
        client_crt_path: P,
        client_key_path: P,
    ) -> Result<Self, ClientError>;

    fn load_client_certificate_with_data(
        self,
        client_crt: Vec<u8>,
        client_key: Vec<u8>,
    ) -> Result<Self, ClientError>;

    /// accept any server certificate
    fn skip_verify(self) -> Self;
}

/// credential returned by an exec plugin such as `aws eks get-token`
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
struct ExecCredential {
    #[serde(default)]
    status: ExecCredentialStatus,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
struct ExecCredentialStatus {
    token: Option<String>,
    client_certificate_data: Option<String>,
    client_key_data: Option<String>,
}

/// Build Client
#[derive(Debug)]
pub struct ClientConfigBuilder<B> {
    config: K8Config,
    builder: B,
    token: Option<String>,
}

impl<B> ClientConfigBuilder<B>
where
    B: ConfigBuilder,
{
    pub fn new(config: K8Config) -> Result<Self, ClientError> {
        let (builder, token) = match &config {
            K8Config::Pod(pod_config) => Self::configure_in_cluster(B::new(), pod_config)?,
            K8Config::KubeConfig(context) => {
                Self::configure_out_of_cluster(B::new(), &context.config)?
            }
        };

        Ok(Self {
            config,
            builder,
            token,
        })
    }

    pub fn k8_config(&self) -> &K8Config {
        &self.config
    }

    pub fn token(&self) -> Option<String> {
        self.token.clone()
    }

    pub fn host(&self) -> String {
        self.k8_config().api_path().to_owned()
    }

    pub fn build(self) -> Result<B::Client, ClientError> {
        self.builder.build()
    }

    fn configure_in_cluster(
        builder: B,
        pod: &PodConfig,
    ) -> Result<(B, Option<String>), ClientError> {
        debug!("configure as pod in cluster");
        let path = pod.ca_path();
        debug!("loading ca at: {}", path.display());
        Ok((builder.load_ca_certificate(path)?, Some(pod.token.clone())))
    }

    fn configure_out_of_cluster(
        builder: B,
        kube_config: &KubeConfig,
    ) -> Result<(B, Option<String>), ClientError> {
        let current_user = kube_config
            .current_user()
            .ok_or_else(|| ClientError::Other("config must have current user".to_owned()))?;

        let current_cluster = kube_config
            .current_cluster()
            .ok_or_else(|| ClientError::Other("config must have current cluster".to_owned()))?;

        let cluster = &current_cluster.cluster;
        let builder = if cluster.skip_tls_verify() {
            warn!("server certificate will not be verified");
            builder.skip_verify()
        } else if let Some(ca_data) = &cluster.certificate_authority_data {
            debug!("detected in-line cluster CA certs");
            builder.load_ca_cert_with_data(STANDARD.decode(ca_data.trim())?)?
        } else if let Some(ca_path) = &cluster.certificate_authority {
            debug!("loading cluster CA from: {}", ca_path);
            builder.load_ca_certificate(ca_path)?
        } else {
            warn!(cluster = %current_cluster.name, "no cluster CA configured");
            builder
        };

        let user = &current_user.user;
        if let Some(exec) = &user.exec {
            debug!(command = %exec.command, "loading credential using exec");
            let credential = run_exec(exec)?.status;
            let builder = match (
                credential.client_certificate_data,
                credential.client_key_data,
            ) {
                (Some(crt), Some(key)) => builder
                    .load_client_certificate_with_data(crt.into_bytes(), key.into_bytes())?,
                _ => builder,
            };
            Ok((builder, credential.token))
        } else if let Some(client_cert_data) = &user.client_certificate_data {
            debug!("detected in-line client certs");
            let client_key_data = user.client_key_data.as_ref().ok_or_else(|| {
                ClientError::Other("current user must have client key data".to_owned())
            })?;
            let builder = builder.load_client_certificate_with_data(
                STANDARD.decode(client_cert_data.trim())?,
                STANDARD.decode(client_key_data.trim())?,
            )?;
            Ok((builder, user.bearer_token()?))
        } else if let Some(client_crt_path) = &user.client_certificate {
            let client_key_path = user.client_key.as_ref().ok_or_else(|| {
                ClientError::Other("current user must have client key".to_owned())
            })?;
            debug!(
                "loading client crt: {} and client key: {}",
                client_crt_path, client_key_path
            );
            let builder = builder.load_client_certificate(client_crt_path, client_key_path)?;
            Ok((builder, user.bearer_token()?))
        } else {
            let token = user.bearer_token()?;
            if token.is_none() {
                warn!(user = %current_user.name, "no credentials found for user");
            }
            Ok((builder, token))
        }
    }
}

/// Blocks until the plugin exits, async callers load configs on the blocking pool.
fn run_exec(exec: &Exec) -> Result<ExecCredential, ClientError> {
    let output = Command::new(&exec.command)
        .args(&exec.args)
        .envs(exec.env.iter().map(|env| (&env.name, &env.value)))
        .output()?;

    if !output.status.success() {
        return Err(ClientError::Other(format!(
            "exec plugin {} failed: {}",
            exec.command,
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    Ok(serde_json::from_slice(&output.stdout)?)
}
