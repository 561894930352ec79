//! OCI Service Operator
//!
//! Watches the OCI custom resources and keeps the matching OCI resources in
//! sync with them.

use oci_service_operator::config::OperatorConfig;
use oci_service_operator::controller::{Controller, OciClients};
use oci_service_operator::error::ControllerError;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), ControllerError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // kube and reqwest both pull in rustls; pick the provider once
    if rustls::crypto::ring::default_provider().install_default().is_err() {
        warn!("rustls crypto provider was already installed");
    }

    info!("Starting OCI Service Operator");

    let config = OperatorConfig::from_env()?;
    info!("Configuration:");
    info!("  Region: {}", config.region);
    info!("  Service Mesh endpoint: {}", config.service_mesh_endpoint);
    info!("  Database endpoint: {}", config.database_endpoint);
    info!("  MySQL endpoint: {}", config.mysql_endpoint);
    info!("  Streaming endpoint: {}", config.streaming_endpoint);
    info!(
        "  Namespace: {}",
        config.watch_namespace.as_deref().unwrap_or("all namespaces")
    );
    info!("  Concurrency: {}", config.reconcile_concurrency);

    let clients = OciClients::from_config(&config)?;
    let controller = Controller::new(config, clients).await?;
    controller.run().await?;

    Ok(())
}
