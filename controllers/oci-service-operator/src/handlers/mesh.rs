//! Mesh handler

use std::sync::Arc;

use crds::{Mesh, SERVICE_MESH_FINALIZER};
use oci_client::models::servicemesh as sdk;
use oci_client::{OciError, ServiceMeshClient};

use crate::conversions::mesh_to_sdk;
use crate::error::{ConversionError, ServiceManagerError};
use crate::manager::{CustomResourceHandler, ResolvedDependencies};

pub struct MeshHandler {
    client: Arc<dyn ServiceMeshClient>,
}

impl MeshHandler {
    pub fn new(client: Arc<dyn ServiceMeshClient>) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl CustomResourceHandler for MeshHandler {
    type Resource = Mesh;
    type Sdk = sdk::Mesh;

    const KIND: &'static str = "Mesh";

    fn finalizer(&self) -> &'static str {
        SERVICE_MESH_FINALIZER
    }

    async fn resolve_dependencies(&self, _mesh: &Mesh) -> Result<ResolvedDependencies, ServiceManagerError> {
        Ok(ResolvedDependencies::default())
    }

    async fn get_resource(&self, id: &str) -> Result<sdk::Mesh, OciError> {
        self.client.get_mesh(id).await
    }

    fn build_sdk(
        &self,
        mesh: &Mesh,
        base: Option<&sdk::Mesh>,
        _dependencies: &ResolvedDependencies,
    ) -> Result<sdk::Mesh, ConversionError> {
        mesh_to_sdk(mesh, base)
    }

    async fn create_resource(&self, mesh: &sdk::Mesh, opc_retry_token: &str) -> Result<sdk::Mesh, OciError> {
        self.client.create_mesh(mesh, opc_retry_token).await
    }

    async fn update_resource(&self, mesh: &sdk::Mesh) -> Result<(), OciError> {
        self.client.update_mesh(mesh).await
    }

    async fn change_compartment(&self, id: &str, compartment_id: &str) -> Result<(), OciError> {
        self.client.change_mesh_compartment(id, compartment_id).await
    }

    async fn delete_resource(&self, id: &str) -> Result<(), OciError> {
        self.client.delete_mesh(id).await
    }
}
