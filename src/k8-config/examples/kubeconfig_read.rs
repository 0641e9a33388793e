use k8_config::K8Config;
use k8_config::KubeConfig;

const KUBECONFIG: &str = "KUBECONFIG";

fn main() {
    fluvio_future::subscriber::init_tracer(None);

    let config = std::env::var(KUBECONFIG)
        .map_or(KubeConfig::from_home(), KubeConfig::from_file)
        .expect("Load failed");

    println!("current context: {}", config.current_context);
    for context in &config.contexts {
        println!(
            "context {} -> cluster {} (namespace {})",
            context.name,
            context.context.cluster,
            context.context.namespace()
        );
    }

    match K8Config::load() {
        Ok(resolved) => println!(
            "api server: {}, namespace: {}",
            resolved.api_path(),
            resolved.namespace()
        ),
        Err(err) => println!("unable to resolve config: {err}"),
    }
}
