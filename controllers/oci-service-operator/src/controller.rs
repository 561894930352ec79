//! Main controller implementation.
//!
//! Builds one service manager per kind, checks that the CRDs are installed
//! and runs every watcher until one of them stops.

use std::sync::Arc;
use std::time::Duration;

use crds::{CrdRegistry, VirtualDeploymentBinding, VirtualServiceRouteTable};
use futures::future::select_all;
use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1::CustomResourceDefinition;
use k8s_openapi::NamespaceResourceScope;
use kube::{Api, Client, Resource};
use kube_runtime::watcher;
use oci_client::{
    BearerTokenSigner, DatabaseClient, DatabaseHttpClient, HttpClient, MySqlClient,
    MySqlHttpClient, RequestSigner, ServiceMeshClient, ServiceMeshHttpClient, StreamAdminClient,
    StreamAdminHttpClient,
};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::backoff::BackoffTracker;
use crate::config::OperatorConfig;
use crate::error::ControllerError;
use crate::handlers::{
    AccessPolicyHandler, AutonomousDatabaseHandler, IngressGatewayHandler,
    IngressGatewayRouteTableHandler, MeshHandler, MySqlDbSystemHandler, StreamHandler,
    VirtualDeploymentHandler, VirtualServiceHandler, VirtualServiceRouteTableHandler,
};
use crate::handlers::virtual_deployment::{bound_virtual_deployment, routed_virtual_deployments};
use crate::manager::{CustomResourceHandler, ServiceManager};
use crate::resolver::{ClusterResolver, Resolver};
use crate::store::KubeObjectStore;
use crate::watcher::{scoped_api, watch_resource, WatchContext, WatchSettings};

type WatcherHandle = JoinHandle<Result<(), ControllerError>>;

/// Remote clients for every service the operator manages
#[derive(Clone)]
pub struct OciClients {
    pub service_mesh: Arc<dyn ServiceMeshClient>,
    pub database: Arc<dyn DatabaseClient>,
    pub mysql: Arc<dyn MySqlClient>,
    pub streaming: Arc<dyn StreamAdminClient>,
}

impl std::fmt::Debug for OciClients {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OciClients").finish_non_exhaustive()
    }
}

impl OciClients {
    /// HTTP clients for the configured endpoints
    pub fn from_config(config: &OperatorConfig) -> Result<Self, ControllerError> {
        let signer: Arc<dyn RequestSigner> = Arc::new(BearerTokenSigner::new(config.auth_token.as_str())?);
        let http = |endpoint: &str| HttpClient::with_endpoint(endpoint, Arc::clone(&signer));

        Ok(Self {
            service_mesh: Arc::new(ServiceMeshHttpClient::new(http(&config.service_mesh_endpoint)?)),
            database: Arc::new(DatabaseHttpClient::new(http(&config.database_endpoint)?)),
            mysql: Arc::new(MySqlHttpClient::new(http(&config.mysql_endpoint)?)),
            streaming: Arc::new(StreamAdminHttpClient::new(http(&config.streaming_endpoint)?)),
        })
    }
}

/// Main controller for OCI resource management.
pub struct Controller {
    watchers: Vec<(&'static str, WatcherHandle)>,
}

impl std::fmt::Debug for Controller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Controller")
            .field("watchers", &self.watchers.iter().map(|(kind, _)| *kind).collect::<Vec<_>>())
            .finish()
    }
}

/// Builds and spawns watchers that share one client and configuration
struct WatcherFactory {
    client: Client,
    store: Arc<KubeObjectStore>,
    namespace: Option<String>,
    settings: WatchSettings,
    backoff_min_secs: u64,
    backoff_max_secs: u64,
}

impl WatcherFactory {
    fn context<H>(&self, handler: H) -> Arc<WatchContext<H>>
    where
        H: CustomResourceHandler,
        H::Resource: Resource<Scope = NamespaceResourceScope>,
    {
        let manager = ServiceManager::new(handler, self.store.clone());
        Arc::new(WatchContext::new(
            manager,
            BackoffTracker::new(self.backoff_min_secs, self.backoff_max_secs),
        ))
    }

    fn spawn<H>(&self, handler: H) -> (&'static str, WatcherHandle)
    where
        H: CustomResourceHandler,
        H::Resource: Resource<Scope = NamespaceResourceScope>,
    {
        self.spawn_with(handler, |controller| controller)
    }

    fn spawn_with<H, F>(&self, handler: H, extend: F) -> (&'static str, WatcherHandle)
    where
        H: CustomResourceHandler,
        H::Resource: Resource<Scope = NamespaceResourceScope>,
        F: FnOnce(kube_runtime::Controller<H::Resource>) -> kube_runtime::Controller<H::Resource>
            + Send
            + 'static,
    {
        let api: Api<H::Resource> = scoped_api(self.client.clone(), self.namespace.as_deref());
        let ctx = self.context(handler);
        let settings = self.settings;
        let handle = tokio::spawn(async move { watch_resource(api, ctx, settings, extend).await });
        (H::KIND, handle)
    }

    fn api<K>(&self) -> Api<K>
    where
        K: Resource<Scope = NamespaceResourceScope>,
        K::DynamicType: Default,
    {
        scoped_api(self.client.clone(), self.namespace.as_deref())
    }
}

impl Controller {
    /// Creates a new controller instance and starts all watchers.
    pub async fn new(config: OperatorConfig, clients: OciClients) -> Result<Self, ControllerError> {
        info!("Initializing OCI service operator");

        let client = Client::try_default().await?;
        check_crds(&client).await;

        let resolver: Arc<dyn Resolver> = Arc::new(ClusterResolver::new(
            client.clone(),
            clients.service_mesh.clone(),
        ));
        let factory = WatcherFactory {
            client: client.clone(),
            store: Arc::new(KubeObjectStore::new(client.clone())),
            namespace: config.watch_namespace.clone(),
            settings: WatchSettings {
                debounce: Duration::from_secs(config.reconcile_debounce_secs),
                concurrency: config.reconcile_concurrency,
            },
            backoff_min_secs: config.backoff_min_secs,
            backoff_max_secs: config.backoff_max_secs,
        };

        let mesh = clients.service_mesh.clone();
        let binding_api: Api<VirtualDeploymentBinding> = factory.api();
        let route_table_api: Api<VirtualServiceRouteTable> = factory.api();

        let watchers = vec![
            factory.spawn(MeshHandler::new(mesh.clone())),
            factory.spawn(VirtualServiceHandler::new(mesh.clone(), resolver.clone())),
            // ref-form dependents re-trigger a blocked deletion
            factory.spawn_with(
                VirtualDeploymentHandler::new(mesh.clone(), resolver.clone()),
                move |controller| {
                    controller
                        .watches(binding_api, watcher::Config::default(), |binding| {
                            bound_virtual_deployment(&binding)
                        })
                        .watches(route_table_api, watcher::Config::default(), |route_table| {
                            routed_virtual_deployments(&route_table)
                        })
                },
            ),
            factory.spawn(VirtualServiceRouteTableHandler::new(mesh.clone(), resolver.clone())),
            factory.spawn(IngressGatewayHandler::new(mesh.clone(), resolver.clone())),
            factory.spawn(IngressGatewayRouteTableHandler::new(mesh.clone(), resolver.clone())),
            factory.spawn(AccessPolicyHandler::new(mesh, resolver.clone())),
            factory.spawn(AutonomousDatabaseHandler::new(clients.database, resolver.clone())),
            factory.spawn(MySqlDbSystemHandler::new(clients.mysql, resolver)),
            factory.spawn(StreamHandler::new(clients.streaming)),
        ];

        info!("Started {} watchers", watchers.len());
        Ok(Self { watchers })
    }

    /// Runs until any watcher stops.
    pub async fn run(self) -> Result<(), ControllerError> {
        let (kinds, handles): (Vec<&'static str>, Vec<WatcherHandle>) = self.watchers.into_iter().unzip();
        if handles.is_empty() {
            return Ok(());
        }

        let (result, index, _remaining) = select_all(handles).await;
        let kind = kinds.get(index).copied().unwrap_or("unknown");
        result
            .map_err(|e| ControllerError::Watch(format!("{kind} watcher panicked: {e}")))?
            .map_err(|e| ControllerError::Watch(format!("{kind} watcher error: {e}")))?;
        info!("{} watcher finished; shutting down", kind);
        Ok(())
    }
}

/// Warn about CRDs that are not installed. Their watchers will keep failing
/// until they are.
async fn check_crds(client: &Client) {
    let api: Api<CustomResourceDefinition> = Api::all(client.clone());
    for def in CrdRegistry::with_all_kinds().definitions() {
        match api.get_opt(def.name).await {
            Ok(Some(_)) => info!("CRD {} is installed", def.name),
            Ok(None) => warn!("CRD {} ({}) is not installed", def.name, def.kind),
            Err(e) => warn!("Could not check CRD {}: {}", def.name, e),
        }
    }
}
