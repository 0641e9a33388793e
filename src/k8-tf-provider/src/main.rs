use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing::debug;

use k8_client::K8Client;
use k8_tf_provider::{Provider, ProviderConfig};

/// Cluster API and Karpenter lookups and manifests
#[derive(Debug, Parser)]
#[command(name = "k8s-provider", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// list data source and manifest type names
    List,
    /// print the provider schema, or the schema of one type, as JSON
    Schema {
        #[arg(value_name = "TYPE")]
        type_name: Option<String>,
    },
    /// read a data source or render a manifest
    Read {
        #[arg(value_name = "TYPE")]
        type_name: String,
        /// JSON or YAML configuration of the type
        #[arg(long, value_name = "FILE")]
        config: PathBuf,
        /// JSON or YAML provider configuration
        #[arg(long, value_name = "FILE")]
        provider_config: Option<PathBuf>,
    },
}

/// YAML parser accepts JSON as well
fn load_value(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("unable to read {}", path.display()))?;
    serde_yaml::from_str(&content).with_context(|| format!("unable to parse {}", path.display()))
}

async fn run(cli: Cli) -> Result<bool> {
    match cli.command {
        Command::List => {
            for name in Provider::<K8Client>::offline().type_names() {
                println!("{name}");
            }
            Ok(true)
        }
        Command::Schema { type_name } => {
            let schema = match type_name {
                Some(name) => Provider::<K8Client>::offline()
                    .schema(&name)
                    .ok_or_else(|| anyhow!("unknown type: {name}"))?,
                None => ProviderConfig::schema(),
            };
            println!("{}", serde_json::to_string_pretty(&schema)?);
            Ok(true)
        }
        Command::Read {
            type_name,
            config,
            provider_config,
        } => {
            let provider_config = match provider_config {
                Some(path) => ProviderConfig::from_value(&load_value(&path)?).map_err(|diagnostics| {
                    for diagnostic in diagnostics {
                        eprintln!("{diagnostic}");
                    }
                    anyhow!("invalid provider configuration")
                })?,
                None => ProviderConfig::default(),
            };
            debug!(?provider_config, "configuring provider");
            let config = load_value(&config)?;

            // manifests never load a kubeconfig
            let provider = if Provider::<K8Client>::offline().needs_client(&type_name) {
                Provider::configure(&provider_config).await?
            } else {
                Provider::offline()
            };

            let response = provider.read(&type_name, &config).await;
            for diagnostic in response.diagnostics.iter() {
                eprintln!("{diagnostic}");
            }
            if let Some(state) = &response.state {
                println!("{}", serde_json::to_string_pretty(state)?);
            }
            Ok(!response.has_error())
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    fluvio_future::subscriber::init_tracer(None);

    match run(Cli::parse()).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod test {

    use std::path::PathBuf;

    use serde_json::json;

    use super::load_value;

    fn write_temp(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("k8s-provider-{}-{name}", std::process::id()));
        std::fs::write(&path, content).expect("write");
        path
    }

    #[test]
    fn test_load_value() {
        let path = write_temp("config.json", r#"{"metadata": {"name": "demo"}, "spec": {"replicas": 3}}"#);
        let value = load_value(&path).expect("json");
        assert_eq!(value, json!({ "metadata": { "name": "demo" }, "spec": { "replicas": 3 } }));
        std::fs::remove_file(&path).expect("remove");

        let path = write_temp("config.yaml", "metadata:\n  name: demo\nspec:\n  max_unhealthy: '40%'\n");
        let value = load_value(&path).expect("yaml");
        assert_eq!(value["spec"]["max_unhealthy"], "40%");
        std::fs::remove_file(&path).expect("remove");
    }

    #[test]
    fn test_load_value_errors() {
        let err = load_value(&PathBuf::from("/nonexistent/config.yaml")).expect_err("missing");
        assert!(err.to_string().contains("unable to read /nonexistent/config.yaml"));

        let path = write_temp("broken.yaml", "metadata: [unclosed\n");
        let err = load_value(&path).expect_err("broken");
        assert!(err.to_string().starts_with("unable to parse"));
        std::fs::remove_file(&path).expect("remove");
    }
}
