mod config;
mod error;

pub use config::*;
pub use error::ConfigError;

use std::env;
use std::fs::read_to_string;
use std::path::Path;
use std::path::PathBuf;

use tracing::debug;
use tracing::trace;

const KUBECONFIG: &str = "KUBECONFIG";
const BASE_DIR: &str = "/var/run/secrets/kubernetes.io/serviceaccount";
const API_SERVER: &str = "https://kubernetes.default.svc";

/// Configuration of a process running inside a pod
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct PodConfig {
    pub namespace: String,
    pub token: String,
    pub api_path: String,
    base_dir: PathBuf,
}

impl PodConfig {
    /// load from the service account mount, `None` when not running in a pod
    pub fn load() -> Option<Self> {
        Self::load_from(BASE_DIR)
    }

    pub fn load_from<P: AsRef<Path>>(base_dir: P) -> Option<Self> {
        let base_dir = base_dir.as_ref();
        let namespace = read_trimmed(base_dir.join("namespace"))?;
        let token = read_trimmed(base_dir.join("token"))?;
        let api_path = match (
            env::var("KUBERNETES_SERVICE_HOST"),
            env::var("KUBERNETES_SERVICE_PORT"),
        ) {
            (Ok(host), Ok(port)) => format!("https://{host}:{port}"),
            _ => API_SERVER.to_owned(),
        };
        trace!(%namespace, %api_path, "found pod config");
        Some(Self {
            namespace,
            token,
            api_path,
            base_dir: base_dir.to_path_buf(),
        })
    }

    /// path to the CA certificate of the cluster
    pub fn ca_path(&self) -> PathBuf {
        self.base_dir.join("ca.crt")
    }

    pub fn api_path(&self) -> &str {
        &self.api_path
    }
}

fn read_trimmed(path: PathBuf) -> Option<String> {
    match read_to_string(&path) {
        Ok(value) => Some(value.trim().to_owned()),
        Err(err) => {
            trace!(path = %path.display(), %err, "not readable");
            None
        }
    }
}

/// kubeconfig resolved to its current context
#[derive(Debug, PartialEq, Clone)]
pub struct KubeContext {
    pub namespace: String,
    pub api_path: String,
    pub config: KubeConfig,
}

impl KubeContext {
    pub fn try_from_config(config: KubeConfig) -> Result<Self, ConfigError> {
        let context = config
            .current_context()
            .ok_or(ConfigError::NoCurrentContext)?;
        let cluster = config.current_cluster().ok_or_else(|| {
            ConfigError::Other(format!(
                "cluster {} of context {} not found",
                context.context.cluster, context.name
            ))
        })?;
        let namespace = context.context.namespace().to_owned();
        let api_path = cluster.cluster.server.trim_end_matches('/').to_owned();
        Ok(Self {
            namespace,
            api_path,
            config,
        })
    }
}

/// where to look for configuration
#[derive(Debug, Default, Clone)]
pub struct LoadOptions {
    /// explicit kubeconfig path
    pub kubeconfig: Option<PathBuf>,
    /// context overriding `current-context`
    pub context: Option<String>,
}

#[derive(Debug, Clone)]
pub enum K8Config {
    Pod(PodConfig),
    KubeConfig(KubeContext),
}

impl K8Config {
    /// load with defaults, see [`K8Config::load_with`]
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(&LoadOptions::default())
    }

    /// Resolution order: explicit path, `$KUBECONFIG`, `~/.kube/config`, service account.
    pub fn load_with(options: &LoadOptions) -> Result<Self, ConfigError> {
        if let Some(path) = kubeconfig_path(options)? {
            debug!(path = %path.display(), "loading kubeconfig");
            let mut config = KubeConfig::from_file(&path)?;
            if let Some(context) = &options.context {
                config.use_context(context)?;
            }
            return Ok(Self::KubeConfig(KubeContext::try_from_config(config)?));
        }

        if let Some(pod) = PodConfig::load() {
            debug!("using in-cluster config");
            return Ok(Self::Pod(pod));
        }

        Err(ConfigError::NoConfiguration)
    }

    pub fn api_path(&self) -> &str {
        match self {
            Self::Pod(pod) => pod.api_path(),
            Self::KubeConfig(context) => &context.api_path,
        }
    }

    pub fn namespace(&self) -> &str {
        match self {
            Self::Pod(pod) => &pod.namespace,
            Self::KubeConfig(context) => &context.namespace,
        }
    }
}

fn kubeconfig_path(options: &LoadOptions) -> Result<Option<PathBuf>, ConfigError> {
    if let Some(path) = &options.kubeconfig {
        return Ok(Some(path.clone()));
    }

    if let Some(paths) = env::var_os(KUBECONFIG) {
        if let Some(first) = env::split_paths(&paths).find(|p| !p.as_os_str().is_empty()) {
            return Ok(Some(first));
        }
    }

    match KubeConfig::home_path() {
        Ok(path) if path.exists() => Ok(Some(path)),
        Ok(_) | Err(ConfigError::NoHomeDir) => Ok(None),
        Err(err) => Err(err),
    }
}
