//! # Generic Service Manager
//!
//! One state machine drives every managed kind. A reconcile pass runs these
//! steps in order and stops at the first failure:
//!
//! 1. resolve dependencies (`DependenciesActive`)
//! 2. fetch the remote object recorded in status
//! 3. build the desired remote object and create, move or update it (`Configured`)
//! 4. verify the remote lifecycle state (`Active`)
//! 5. copy ids and the remote update time into status
//!
//! The status is written back once at the end of the pass when it changed,
//! also when the pass failed, so conditions always describe the last attempt.
//! Deleting objects take the finalize path instead.

pub mod conditions;
pub mod handler;


use std::sync::Arc;

use crds::{ConditionType, ManagedResource, ResourceStatus};
use kube::ResourceExt;
use kube_runtime::controller::Action;
use oci_client::RemoteResource;
use tracing::{debug, info, warn};

pub use conditions::set_condition;
pub use handler::{
    CustomResourceHandler, ResolvedDependencies, ResolvedRef, ResourceDetails, SecretValue,
};

use crate::error::ServiceManagerError;
use crate::store::ObjectStore;

pub struct ServiceManager<H: CustomResourceHandler> {
    handler: H,
    store: Arc<dyn ObjectStore<H::Resource>>,
}

impl<H: CustomResourceHandler> std::fmt::Debug for ServiceManager<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceManager")
            .field("kind", &H::KIND)
            .finish_non_exhaustive()
    }
}

impl<H: CustomResourceHandler> ServiceManager<H> {
    pub fn new(handler: H, store: Arc<dyn ObjectStore<H::Resource>>) -> Self {
        Self { handler, store }
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Reconcile one object
    pub async fn reconcile(&self, resource: Arc<H::Resource>) -> Result<Action, ServiceManagerError> {
        let key = resource.object_key();

        if resource.is_deleting() {
            return self.finalize(&resource).await;
        }

        self.ensure_finalizer(&resource).await?;

        let mut working = (*resource).clone();
        let before = status_of(&working);
        let result = self.run_pass(&mut working).await;

        if status_of(&working) != before {
            if let Err(e) = self.store.patch_status(&working).await {
                warn!("Failed to persist status of {} {}: {}", H::KIND, key, e);
                if result.is_ok() {
                    return Err(e.into());
                }
            }
        }

        match result {
            Ok(()) => {
                debug!("{} {} reconciled", H::KIND, key);
                Ok(Action::await_change())
            }
            Err(e) => {
                warn!("Reconcile of {} {} failed: {}", H::KIND, key, e);
                Err(e)
            }
        }
    }

    async fn ensure_finalizer(&self, resource: &H::Resource) -> Result<(), ServiceManagerError> {
        let finalizer = self.handler.finalizer();
        if !has_finalizer(resource, finalizer) {
            self.store.add_finalizer(resource, finalizer).await?;
        }
        Ok(())
    }

    async fn run_pass(&self, resource: &mut H::Resource) -> Result<(), ServiceManagerError> {
        let key = resource.object_key();
        let generation = resource.generation();

        // Resolve dependencies
        let dependencies = match self.handler.resolve_dependencies(resource).await {
            Ok(dependencies) => {
                set_condition(
                    resource.resource_status_mut(),
                    ConditionType::DependenciesActive,
                    None,
                    generation,
                );
                dependencies
            }
            Err(e) => {
                return Err(fail(resource, ConditionType::DependenciesActive, e, generation));
            }
        };

        // Get the remote object
        let current = match self.fetch_current(resource).await {
            Ok(current) => current,
            Err(e) => return Err(fail(resource, ConditionType::Configured, e, generation)),
        };
        let details = ResourceDetails::new(dependencies)
            .with_current(current)
            .with_retry_token(resource.resource_status().and_then(|s| s.opc_retry_token.clone()));

        // Build, then create, move or update
        let desired = match self.handler.build_sdk(
            resource,
            details.current.as_ref(),
            &details.dependencies,
        ) {
            Ok(desired) => desired,
            Err(e) => return Err(fail(resource, ConditionType::Configured, e.into(), generation)),
        };
        let details = details.with_desired(desired);

        let details = match self.apply(resource, details).await {
            Ok(details) => details,
            Err(e) => return Err(fail(resource, ConditionType::Configured, e, generation)),
        };
        set_condition(
            resource.resource_status_mut(),
            ConditionType::Configured,
            None,
            generation,
        );

        let Some(current) = details.current else {
            return Err(ServiceManagerError::requeue(format!(
                "{} {} has no remote object after configure",
                H::KIND,
                key
            )));
        };

        // Verify the lifecycle state
        if let Err(e) = self.handler.verify_resource_status(&current) {
            return Err(fail(resource, ConditionType::Active, e, generation));
        }
        set_condition(
            resource.resource_status_mut(),
            ConditionType::Active,
            None,
            generation,
        );

        // Mirror ids and update time
        let status = resource.resource_status_mut();
        status.id = Some(current.id().to_string());
        self.handler
            .update_status(status, &current, &details.dependencies);
        let time_updated = current.time_updated();
        if status.last_updated_time != time_updated {
            status.last_updated_time = time_updated;
        }

        Ok(())
    }

    async fn fetch_current(
        &self,
        resource: &mut H::Resource,
    ) -> Result<Option<H::Sdk>, ServiceManagerError> {
        let key = resource.object_key();
        let Some(id) = resource.remote_id().map(str::to_string) else {
            return Ok(None);
        };

        debug!("Getting {} {} ({})", H::KIND, key, id);
        match self.handler.get_resource(&id).await {
            Ok(sdk) => Ok(Some(sdk)),
            Err(e) if e.is_not_found() => {
                let recorded = resource
                    .resource_status()
                    .and_then(ResourceStatus::remote_id)
                    .is_some();
                let bound = resource.bound_id().is_some_and(|b| b == id);
                if bound {
                    return Err(ServiceManagerError::terminal(format!(
                        "{} {} is bound to {} which does not exist",
                        H::KIND,
                        key,
                        id
                    )));
                }
                if recorded {
                    warn!(
                        "{} {} ({}) no longer exists remotely; it will be recreated",
                        H::KIND,
                        key,
                        id
                    );
                    resource.resource_status_mut().id = None;
                }
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Create, move or update the remote object; returns the details with a fresh `current`
    async fn apply(
        &self,
        resource: &mut H::Resource,
        details: ResourceDetails<H::Sdk>,
    ) -> Result<ResourceDetails<H::Sdk>, ServiceManagerError> {
        let key = resource.object_key();
        let Some(desired) = details.desired.as_ref() else {
            return Ok(details);
        };

        let Some(current) = details.current.as_ref() else {
            let token = match details.opc_retry_token.clone() {
                Some(token) => token,
                None => {
                    let token = uuid::Uuid::new_v4().to_string();
                    resource.resource_status_mut().opc_retry_token = Some(token.clone());
                    self.store.patch_status(resource).await?;
                    token
                }
            };

            info!("Creating {} {}", H::KIND, key);
            let created = self.handler.create_resource(desired, &token).await?;
            info!("Created {} {} with id {}", H::KIND, key, created.id());

            let status = resource.resource_status_mut();
            status.id = Some(created.id().to_string());
            status.opc_retry_token = None;
            return Ok(details.with_retry_token(None).with_current(Some(created)));
        };

        let id = current.id().to_string();
        if self.handler.has_compartment_id_changed(resource, current) {
            info!(
                "Moving {} {} from compartment {} to {}",
                H::KIND,
                key,
                current.compartment_id(),
                resource.compartment_id()
            );
            self.handler
                .change_compartment(&id, resource.compartment_id())
                .await?;
        } else if current.lifecycle_phase() == oci_client::LifecyclePhase::Active
            && desired != current
        {
            info!("Updating {} {} ({})", H::KIND, key, id);
            self.handler.update_resource(desired).await?;
        } else {
            return Ok(details);
        }

        let refreshed = self.handler.get_resource(&id).await?;
        Ok(details.with_current(Some(refreshed)))
    }

    async fn finalize(&self, resource: &H::Resource) -> Result<Action, ServiceManagerError> {
        let key = resource.object_key();
        let finalizer = self.handler.finalizer();
        if !has_finalizer(resource, finalizer) {
            return Ok(Action::await_change());
        }

        info!("Finalizing {} {}", H::KIND, key);
        self.handler.finalize(resource).await.inspect_err(|e| {
            warn!("Deletion of {} {} is blocked: {}", H::KIND, key, e);
        })?;

        let bound = resource.bound_id().is_some_and(|id| !id.is_empty());
        let recorded = resource
            .resource_status()
            .and_then(ResourceStatus::remote_id)
            .map(str::to_string);
        match recorded {
            Some(_) if bound => {
                info!("{} {} is bound to an existing resource; leaving it in place", H::KIND, key);
            }
            Some(id) => {
                info!("Deleting {} {} ({})", H::KIND, key, id);
                match self.handler.delete_resource(&id).await {
                    Ok(()) => {}
                    Err(e) if e.is_not_found() => {
                        debug!("{} {} ({}) already gone", H::KIND, key, id);
                    }
                    Err(e) => return Err(e.into()),
                }
            }
            None => debug!("{} {} was never created remotely", H::KIND, key),
        }

        self.store.remove_finalizer(resource, finalizer).await?;
        info!("Removed finalizer from {} {}", H::KIND, key);
        Ok(Action::await_change())
    }
}

fn status_of<K: ManagedResource>(resource: &K) -> ResourceStatus {
    resource.resource_status().cloned().unwrap_or_default()
}

fn has_finalizer<K: ManagedResource>(resource: &K, finalizer: &str) -> bool {
    resource.finalizers().iter().any(|f| f == finalizer)
}

/// Record a failed step on its condition and hand the error back
fn fail<K: ManagedResource>(
    resource: &mut K,
    condition_type: ConditionType,
    error: ServiceManagerError,
    generation: i64,
) -> ServiceManagerError {
    set_condition(
        resource.resource_status_mut(),
        condition_type,
        Some(&error),
        generation,
    );
    error
}
