//! IngressGateway handler

use std::sync::Arc;

use crds::{IngressGateway, ManagedResource, ResourceStatus, SERVICE_MESH_FINALIZER};
use oci_client::models::servicemesh as sdk;
use oci_client::{OciError, ServiceMeshClient};

use crate::conversions::ingress_gateway_to_sdk;
use crate::error::{ConversionError, ServiceManagerError};
use crate::manager::{CustomResourceHandler, ResolvedDependencies};
use crate::resolver::Resolver;

pub struct IngressGatewayHandler {
    client: Arc<dyn ServiceMeshClient>,
    resolver: Arc<dyn Resolver>,
}

impl IngressGatewayHandler {
    pub fn new(client: Arc<dyn ServiceMeshClient>, resolver: Arc<dyn Resolver>) -> Self {
        Self { client, resolver }
    }
}

#[async_trait::async_trait]
impl CustomResourceHandler for IngressGatewayHandler {
    type Resource = IngressGateway;
    type Sdk = sdk::IngressGateway;

    const KIND: &'static str = "IngressGateway";

    fn finalizer(&self) -> &'static str {
        SERVICE_MESH_FINALIZER
    }

    async fn resolve_dependencies(
        &self,
        ig: &IngressGateway,
    ) -> Result<ResolvedDependencies, ServiceManagerError> {
        let mesh = self
            .resolver
            .resolve_mesh(&ig.spec.mesh, &ig.namespace_or_default())
            .await?;
        Ok(ResolvedDependencies::with_parent(mesh))
    }

    async fn get_resource(&self, id: &str) -> Result<sdk::IngressGateway, OciError> {
        self.client.get_ingress_gateway(id).await
    }

    fn build_sdk(
        &self,
        ig: &IngressGateway,
        base: Option<&sdk::IngressGateway>,
        dependencies: &ResolvedDependencies,
    ) -> Result<sdk::IngressGateway, ConversionError> {
        ingress_gateway_to_sdk(ig, base, dependencies)
    }

    async fn create_resource(
        &self,
        ig: &sdk::IngressGateway,
        opc_retry_token: &str,
    ) -> Result<sdk::IngressGateway, OciError> {
        self.client.create_ingress_gateway(ig, opc_retry_token).await
    }

    async fn update_resource(&self, ig: &sdk::IngressGateway) -> Result<(), OciError> {
        self.client.update_ingress_gateway(ig).await
    }

    async fn change_compartment(&self, id: &str, compartment_id: &str) -> Result<(), OciError> {
        self.client
            .change_ingress_gateway_compartment(id, compartment_id)
            .await
    }

    async fn delete_resource(&self, id: &str) -> Result<(), OciError> {
        self.client.delete_ingress_gateway(id).await
    }

    fn update_status(
        &self,
        status: &mut ResourceStatus,
        ig: &sdk::IngressGateway,
        _dependencies: &ResolvedDependencies,
    ) {
        status.mesh_id = Some(ig.mesh_id.clone());
    }
}
