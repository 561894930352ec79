//! Writes the service manager makes to the Kubernetes API.
//!
//! The manager only ever touches two things on its own object: the status
//! subresource and the finalizer list. Both go through [`ObjectStore`] so the
//! state machine can be driven against an in-memory store in tests.

use k8s_openapi::NamespaceResourceScope;
use kube::api::{Patch, PatchParams};
use kube::{Api, Client, Resource, ResourceExt};
use serde_json::json;
use tracing::debug;

use crds::ManagedResource;

#[async_trait::async_trait]
pub trait ObjectStore<K>: Send + Sync {
    /// Persist `resource.status` as-is
    async fn patch_status(&self, resource: &K) -> Result<(), kube::Error>;

    async fn add_finalizer(&self, resource: &K, finalizer: &str) -> Result<(), kube::Error>;

    async fn remove_finalizer(&self, resource: &K, finalizer: &str) -> Result<(), kube::Error>;
}

/// [`ObjectStore`] backed by the API server
#[derive(Clone)]
pub struct KubeObjectStore {
    client: Client,
}

impl std::fmt::Debug for KubeObjectStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KubeObjectStore").finish_non_exhaustive()
    }
}

impl KubeObjectStore {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    fn api<K>(&self, resource: &K) -> Api<K>
    where
        K: ManagedResource + Resource<Scope = NamespaceResourceScope>,
    {
        Api::namespaced(self.client.clone(), &resource.namespace_or_default())
    }

    async fn patch_finalizers<K>(&self, resource: &K, finalizers: Vec<String>) -> Result<(), kube::Error>
    where
        K: ManagedResource + Resource<Scope = NamespaceResourceScope>,
    {
        let patch = json!({ "metadata": { "finalizers": finalizers } });
        self.api(resource)
            .patch(&resource.name_any(), &PatchParams::default(), &Patch::Merge(&patch))
            .await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl<K> ObjectStore<K> for KubeObjectStore
where
    K: ManagedResource + Resource<Scope = NamespaceResourceScope>,
{
    async fn patch_status(&self, resource: &K) -> Result<(), kube::Error> {
        debug!("Patching status of {}", resource.object_key());
        let patch = json!({ "status": resource.resource_status() });
        self.api(resource)
            .patch_status(&resource.name_any(), &PatchParams::default(), &Patch::Merge(&patch))
            .await?;
        Ok(())
    }

    async fn add_finalizer(&self, resource: &K, finalizer: &str) -> Result<(), kube::Error> {
        let mut finalizers = resource.finalizers().to_vec();
        if finalizers.iter().any(|f| f == finalizer) {
            return Ok(());
        }
        debug!("Adding finalizer {} to {}", finalizer, resource.object_key());
        finalizers.push(finalizer.to_string());
        self.patch_finalizers(resource, finalizers).await
    }

    async fn remove_finalizer(&self, resource: &K, finalizer: &str) -> Result<(), kube::Error> {
        let finalizers: Vec<String> = resource
            .finalizers()
            .iter()
            .filter(|f| f.as_str() != finalizer)
            .cloned()
            .collect();
        if finalizers.len() == resource.finalizers().len() {
            return Ok(());
        }
        debug!("Removing finalizer {} from {}", finalizer, resource.object_key());
        self.patch_finalizers(resource, finalizers).await
    }
}
