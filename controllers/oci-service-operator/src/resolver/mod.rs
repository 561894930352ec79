//! Reference resolution.
//!
//! A `RefOrId` in a spec becomes a [`ResolvedRef`]: for the id form the id is
//! taken as-is (with a remote read when the name or parent is needed), for
//! the ref form the sibling custom resource is read from the cluster and must
//! be ready to be depended upon.

use std::sync::Arc;

use crds::{
    IngressGateway, ManagedResource, Mesh, RefOrId, ResourceStatus, VirtualDeployment,
    VirtualDeploymentBinding, VirtualService, VirtualServiceRouteTable,
};
use k8s_openapi::NamespaceResourceScope;
use k8s_openapi::api::core::v1::Secret;
use kube::api::ListParams;
use kube::{Api, Client, Resource};
use oci_client::ServiceMeshClient;
use tracing::debug;

use crate::error::ServiceManagerError;
use crate::manager::{ResolvedRef, SecretValue};
use crate::validator::validate_k8s;

#[async_trait::async_trait]
pub trait Resolver: Send + Sync {
    async fn resolve_mesh(
        &self,
        reference: &RefOrId,
        namespace: &str,
    ) -> Result<ResolvedRef, ServiceManagerError>;

    /// Resolves to the virtual service id, its name and its mesh id
    async fn resolve_virtual_service(
        &self,
        reference: &RefOrId,
        namespace: &str,
    ) -> Result<ResolvedRef, ServiceManagerError>;

    /// Resolves to the virtual deployment id and its virtual service id
    async fn resolve_virtual_deployment(
        &self,
        reference: &RefOrId,
        namespace: &str,
    ) -> Result<ResolvedRef, ServiceManagerError>;

    /// Resolves to the ingress gateway id, its name and its mesh id
    async fn resolve_ingress_gateway(
        &self,
        reference: &RefOrId,
        namespace: &str,
    ) -> Result<ResolvedRef, ServiceManagerError>;

    async fn list_virtual_deployment_bindings(
        &self,
    ) -> Result<Vec<VirtualDeploymentBinding>, ServiceManagerError>;

    async fn list_virtual_service_route_tables(
        &self,
    ) -> Result<Vec<VirtualServiceRouteTable>, ServiceManagerError>;

    async fn read_secret(
        &self,
        namespace: &str,
        name: &str,
        key: &str,
    ) -> Result<SecretValue, ServiceManagerError>;
}

/// Turn a looked-up sibling object into a [`ResolvedRef`].
///
/// Missing and deleting objects are retried: a deleting dependency blocks
/// its dependents until it is gone.
pub fn resolve_from_object<K: ManagedResource>(
    kind: &str,
    key: &str,
    object: Option<&K>,
    parent_id: fn(&ResourceStatus) -> Option<String>,
) -> Result<ResolvedRef, ServiceManagerError> {
    let Some(object) = object else {
        return Err(ServiceManagerError::requeue(format!("{kind} {key} not found")));
    };
    if object.is_deleting() {
        return Err(ServiceManagerError::requeue(format!(
            "{kind} {key} is being deleted"
        )));
    }

    let status = object.resource_status();
    validate_k8s(kind, key, status)?;

    let Some(status) = status else {
        return Err(ServiceManagerError::requeue(format!(
            "{kind} {key} dependencies not yet satisfied"
        )));
    };
    let Some(id) = status.remote_id() else {
        return Err(ServiceManagerError::requeue(format!(
            "{kind} {key} has no remote id yet"
        )));
    };

    Ok(ResolvedRef {
        id: id.to_string(),
        name: Some(object.display_name()),
        parent_id: parent_id(status),
    })
}

/// Resolver reading sibling objects from the cluster and ids from OCI
#[derive(Clone)]
pub struct ClusterResolver {
    client: Client,
    service_mesh: Arc<dyn ServiceMeshClient>,
}

impl std::fmt::Debug for ClusterResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClusterResolver").finish_non_exhaustive()
    }
}

impl ClusterResolver {
    pub fn new(client: Client, service_mesh: Arc<dyn ServiceMeshClient>) -> Self {
        Self {
            client,
            service_mesh,
        }
    }

    async fn resolve_sibling<K>(
        &self,
        kind: &str,
        reference: &RefOrId,
        namespace: &str,
        parent_id: fn(&ResourceStatus) -> Option<String>,
    ) -> Result<Option<ResolvedRef>, ServiceManagerError>
    where
        K: ManagedResource + Resource<Scope = NamespaceResourceScope>,
    {
        let Some(r) = reference.as_ref_parts() else {
            return Ok(None);
        };
        let key = r.key(namespace);
        debug!("Resolving {} {}", kind, key);
        let api: Api<K> = Api::namespaced(self.client.clone(), r.namespace_or(namespace));
        let object = api.get_opt(&r.name).await?;
        resolve_from_object(kind, &key, object.as_ref(), parent_id).map(Some)
    }
}

#[async_trait::async_trait]
impl Resolver for ClusterResolver {
    async fn resolve_mesh(
        &self,
        reference: &RefOrId,
        namespace: &str,
    ) -> Result<ResolvedRef, ServiceManagerError> {
        match self
            .resolve_sibling::<Mesh>("Mesh", reference, namespace, |_| None)
            .await?
        {
            Some(resolved) => Ok(resolved),
            None => Ok(ResolvedRef::from_id(reference.key(namespace))),
        }
    }

    async fn resolve_virtual_service(
        &self,
        reference: &RefOrId,
        namespace: &str,
    ) -> Result<ResolvedRef, ServiceManagerError> {
        if let Some(resolved) = self
            .resolve_sibling::<VirtualService>("VirtualService", reference, namespace, |s| {
                s.mesh_id.clone()
            })
            .await?
        {
            return Ok(resolved);
        }
        let id = reference.key(namespace);
        let vs = self.service_mesh.get_virtual_service(&id).await?;
        Ok(ResolvedRef {
            id,
            name: Some(vs.name),
            parent_id: Some(vs.mesh_id),
        })
    }

    async fn resolve_virtual_deployment(
        &self,
        reference: &RefOrId,
        namespace: &str,
    ) -> Result<ResolvedRef, ServiceManagerError> {
        match self
            .resolve_sibling::<VirtualDeployment>("VirtualDeployment", reference, namespace, |s| {
                s.virtual_service_id.clone()
            })
            .await?
        {
            Some(resolved) => Ok(resolved),
            None => Ok(ResolvedRef::from_id(reference.key(namespace))),
        }
    }

    async fn resolve_ingress_gateway(
        &self,
        reference: &RefOrId,
        namespace: &str,
    ) -> Result<ResolvedRef, ServiceManagerError> {
        if let Some(resolved) = self
            .resolve_sibling::<IngressGateway>("IngressGateway", reference, namespace, |s| {
                s.mesh_id.clone()
            })
            .await?
        {
            return Ok(resolved);
        }
        let id = reference.key(namespace);
        let ig = self.service_mesh.get_ingress_gateway(&id).await?;
        Ok(ResolvedRef {
            id,
            name: Some(ig.name),
            parent_id: Some(ig.mesh_id),
        })
    }

    async fn list_virtual_deployment_bindings(
        &self,
    ) -> Result<Vec<VirtualDeploymentBinding>, ServiceManagerError> {
        let api: Api<VirtualDeploymentBinding> = Api::all(self.client.clone());
        Ok(api.list(&ListParams::default()).await?.items)
    }

    async fn list_virtual_service_route_tables(
        &self,
    ) -> Result<Vec<VirtualServiceRouteTable>, ServiceManagerError> {
        let api: Api<VirtualServiceRouteTable> = Api::all(self.client.clone());
        Ok(api.list(&ListParams::default()).await?.items)
    }

    async fn read_secret(
        &self,
        namespace: &str,
        name: &str,
        key: &str,
    ) -> Result<SecretValue, ServiceManagerError> {
        let api: Api<Secret> = Api::namespaced(self.client.clone(), namespace);
        let Some(secret) = api.get_opt(name).await? else {
            return Err(ServiceManagerError::requeue(format!(
                "secret {namespace}/{name} not found"
            )));
        };
        let Some(bytes) = secret.data.as_ref().and_then(|data| data.get(key)) else {
            return Err(ServiceManagerError::terminal(format!(
                "secret {namespace}/{name} has no key {key}"
            )));
        };
        String::from_utf8(bytes.0.clone())
            .map(SecretValue::new)
            .map_err(|e| {
                ServiceManagerError::terminal(format!(
                    "secret {namespace}/{name} key {key} is not valid UTF-8: {e}"
                ))
            })
    }
}
