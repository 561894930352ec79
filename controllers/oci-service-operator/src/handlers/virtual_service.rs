//! VirtualService handler

use std::sync::Arc;

use crds::{ManagedResource, ResourceStatus, SERVICE_MESH_FINALIZER, VirtualService};
use oci_client::models::servicemesh as sdk;
use oci_client::{OciError, ServiceMeshClient};

use crate::conversions::virtual_service_to_sdk;
use crate::error::{ConversionError, ServiceManagerError};
use crate::manager::{CustomResourceHandler, ResolvedDependencies};
use crate::resolver::Resolver;

pub struct VirtualServiceHandler {
    client: Arc<dyn ServiceMeshClient>,
    resolver: Arc<dyn Resolver>,
}

impl VirtualServiceHandler {
    pub fn new(client: Arc<dyn ServiceMeshClient>, resolver: Arc<dyn Resolver>) -> Self {
        Self { client, resolver }
    }
}

#[async_trait::async_trait]
impl CustomResourceHandler for VirtualServiceHandler {
    type Resource = VirtualService;
    type Sdk = sdk::VirtualService;

    const KIND: &'static str = "VirtualService";

    fn finalizer(&self) -> &'static str {
        SERVICE_MESH_FINALIZER
    }

    async fn resolve_dependencies(
        &self,
        vs: &VirtualService,
    ) -> Result<ResolvedDependencies, ServiceManagerError> {
        let mesh = self
            .resolver
            .resolve_mesh(&vs.spec.mesh, &vs.namespace_or_default())
            .await?;
        Ok(ResolvedDependencies::with_parent(mesh))
    }

    async fn get_resource(&self, id: &str) -> Result<sdk::VirtualService, OciError> {
        self.client.get_virtual_service(id).await
    }

    fn build_sdk(
        &self,
        vs: &VirtualService,
        base: Option<&sdk::VirtualService>,
        dependencies: &ResolvedDependencies,
    ) -> Result<sdk::VirtualService, ConversionError> {
        virtual_service_to_sdk(vs, base, dependencies)
    }

    async fn create_resource(
        &self,
        vs: &sdk::VirtualService,
        opc_retry_token: &str,
    ) -> Result<sdk::VirtualService, OciError> {
        self.client.create_virtual_service(vs, opc_retry_token).await
    }

    async fn update_resource(&self, vs: &sdk::VirtualService) -> Result<(), OciError> {
        self.client.update_virtual_service(vs).await
    }

    async fn change_compartment(&self, id: &str, compartment_id: &str) -> Result<(), OciError> {
        self.client
            .change_virtual_service_compartment(id, compartment_id)
            .await
    }

    async fn delete_resource(&self, id: &str) -> Result<(), OciError> {
        self.client.delete_virtual_service(id).await
    }

    fn update_status(
        &self,
        status: &mut ResourceStatus,
        vs: &sdk::VirtualService,
        _dependencies: &ResolvedDependencies,
    ) {
        status.mesh_id = Some(vs.mesh_id.clone());
    }
}
