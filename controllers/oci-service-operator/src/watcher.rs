//! Kubernetes resource watchers.
//!
//! Every kind runs its own `kube_runtime::Controller` through the generic
//! [`watch_resource`] helper. The controller handles reconnection; the error
//! policy here decides between a backoff requeue and waiting for the next
//! change of the object.

use std::sync::Arc;
use std::time::Duration;

use crds::ManagedResource;
use futures::StreamExt;
use k8s_openapi::NamespaceResourceScope;
use kube::{Api, Client, Resource};
use kube_runtime::controller::{Action, Config as ControllerConfig};
use kube_runtime::{Controller, watcher};
use tracing::{debug, error, info, warn};

use crate::backoff::BackoffTracker;
use crate::error::{ControllerError, ErrorKind, ServiceManagerError};
use crate::manager::{CustomResourceHandler, ServiceManager};

/// Shared state of one kind's controller
pub struct WatchContext<H: CustomResourceHandler> {
    pub manager: ServiceManager<H>,
    pub backoff: BackoffTracker,
}

impl<H: CustomResourceHandler> std::fmt::Debug for WatchContext<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatchContext")
            .field("kind", &H::KIND)
            .finish_non_exhaustive()
    }
}

impl<H: CustomResourceHandler> WatchContext<H> {
    pub fn new(manager: ServiceManager<H>, backoff: BackoffTracker) -> Self {
        Self { manager, backoff }
    }
}

/// Watch settings shared by every kind
#[derive(Debug, Clone, Copy)]
pub struct WatchSettings {
    pub debounce: Duration,
    pub concurrency: u16,
}

/// `Api` for the watched namespace, or for all namespaces
pub fn scoped_api<K>(client: Client, namespace: Option<&str>) -> Api<K>
where
    K: Resource<Scope = NamespaceResourceScope>,
    K::DynamicType: Default,
{
    match namespace {
        Some(namespace) => Api::namespaced(client, namespace),
        None => Api::all(client),
    }
}

async fn reconcile<H: CustomResourceHandler>(
    resource: Arc<H::Resource>,
    ctx: Arc<WatchContext<H>>,
) -> Result<Action, ServiceManagerError> {
    let key = resource.object_key();
    debug!("Reconciling {} {}", H::KIND, key);
    let action = ctx.manager.reconcile(resource).await?;
    ctx.backoff.reset(&key);
    Ok(action)
}

/// Retryable errors requeue with per-object backoff; terminal errors wait
/// for the object to change
pub fn error_policy<H: CustomResourceHandler>(
    resource: Arc<H::Resource>,
    error: &ServiceManagerError,
    ctx: Arc<WatchContext<H>>,
) -> Action {
    let key = resource.object_key();
    match error.kind() {
        ErrorKind::Retryable => {
            let (delay, attempts) = ctx.backoff.next(&key);
            warn!(
                "Reconcile of {} {} failed (attempt {}), retrying in {:?}: {}",
                H::KIND,
                key,
                attempts,
                delay,
                error
            );
            Action::requeue(delay)
        }
        ErrorKind::Terminal => {
            ctx.backoff.reset(&key);
            error!(
                "Reconcile of {} {} failed and will not be retried until it changes: {}",
                H::KIND,
                key,
                error
            );
            Action::await_change()
        }
    }
}

/// Run the controller of one kind until its watch stream ends.
///
/// `extend` adds secondary watches, e.g. objects whose changes should
/// re-trigger a blocked finalizer.
pub async fn watch_resource<H, F>(
    api: Api<H::Resource>,
    ctx: Arc<WatchContext<H>>,
    settings: WatchSettings,
    extend: F,
) -> Result<(), ControllerError>
where
    H: CustomResourceHandler,
    F: FnOnce(Controller<H::Resource>) -> Controller<H::Resource>,
{
    info!("Starting {} watcher", H::KIND);

    let controller_config = ControllerConfig::default()
        .debounce(settings.debounce)
        .concurrency(settings.concurrency);

    extend(Controller::new(api, watcher::Config::default()))
        .with_config(controller_config)
        .shutdown_on_signal()
        .run(reconcile::<H>, error_policy::<H>, ctx)
        .for_each(|res| async move {
            match res {
                Ok((object, _)) => debug!("{} {} reconciled", H::KIND, object.name),
                Err(e) => warn!("{} controller error: {}", H::KIND, e),
            }
        })
        .await;

    info!("{} watcher stopped", H::KIND);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use oci_client::MockServiceMeshClient;

    use crate::handlers::MeshHandler;
    use crate::test_utils::{mesh, InMemoryObjectStore};

    fn context() -> Arc<WatchContext<MeshHandler>> {
        let manager = ServiceManager::new(
            MeshHandler::new(Arc::new(MockServiceMeshClient::new())),
            Arc::new(InMemoryObjectStore::default()),
        );
        Arc::new(WatchContext::new(manager, BackoffTracker::new(5, 300)))
    }

    #[test]
    fn test_retryable_errors_back_off() {
        let ctx = context();
        let m = Arc::new(mesh("ns", "m"));
        let err = ServiceManagerError::requeue("Mesh ns/m has unknown status CREATING");

        assert_eq!(
            error_policy(m.clone(), &err, ctx.clone()),
            Action::requeue(Duration::from_secs(5))
        );
        assert_eq!(
            error_policy(m.clone(), &err, ctx.clone()),
            Action::requeue(Duration::from_secs(10))
        );

        // success resets the sequence
        ctx.backoff.reset("ns/m");
        assert_eq!(
            error_policy(m, &err, ctx),
            Action::requeue(Duration::from_secs(5))
        );
    }

    #[test]
    fn test_terminal_errors_wait_for_change() {
        let ctx = context();
        let m = Arc::new(mesh("ns", "m"));
        let err = ServiceManagerError::terminal("Mesh ocid1.mesh is in terminal state FAILED");
        assert_eq!(error_policy(m, &err, ctx), Action::await_change());
    }

    #[tokio::test]
    async fn test_successful_reconcile_resets_backoff() {
        let ctx = context();
        let m = Arc::new(mesh("ns", "m"));
        let err = ServiceManagerError::requeue("not yet");
        error_policy(m.clone(), &err, ctx.clone());
        error_policy(m.clone(), &err, ctx.clone());

        reconcile(m.clone(), ctx.clone()).await.unwrap();
        assert_eq!(
            error_policy(m, &err, ctx),
            Action::requeue(Duration::from_secs(5))
        );
    }
}
