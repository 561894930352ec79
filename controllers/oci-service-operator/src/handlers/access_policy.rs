//! AccessPolicy handler

use std::sync::Arc;

use crds::{AccessPolicy, ManagedResource, ResourceStatus, SERVICE_MESH_FINALIZER, TrafficTarget};
use oci_client::models::servicemesh as sdk;
use oci_client::{OciError, ServiceMeshClient};

use crate::conversions::access_policy_to_sdk;
use crate::error::{ConversionError, ServiceManagerError};
use crate::manager::{CustomResourceHandler, ResolvedDependencies};
use crate::resolver::Resolver;

pub struct AccessPolicyHandler {
    client: Arc<dyn ServiceMeshClient>,
    resolver: Arc<dyn Resolver>,
}

impl AccessPolicyHandler {
    pub fn new(client: Arc<dyn ServiceMeshClient>, resolver: Arc<dyn Resolver>) -> Self {
        Self { client, resolver }
    }

    async fn resolve_target(
        &self,
        target: &TrafficTarget,
        namespace: &str,
        dependencies: &mut ResolvedDependencies,
    ) -> Result<(), ServiceManagerError> {
        match target {
            TrafficTarget::VirtualService(reference) => {
                let vs = self.resolver.resolve_virtual_service(reference, namespace).await?;
                dependencies.insert_reference(reference, namespace, vs);
            }
            TrafficTarget::IngressGateway(reference) => {
                let ig = self.resolver.resolve_ingress_gateway(reference, namespace).await?;
                dependencies.insert_reference(reference, namespace, ig);
            }
            TrafficTarget::AllVirtualServices(_) | TrafficTarget::ExternalService(_) => {}
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl CustomResourceHandler for AccessPolicyHandler {
    type Resource = AccessPolicy;
    type Sdk = sdk::AccessPolicy;

    const KIND: &'static str = "AccessPolicy";

    fn finalizer(&self) -> &'static str {
        SERVICE_MESH_FINALIZER
    }

    async fn resolve_dependencies(
        &self,
        ap: &AccessPolicy,
    ) -> Result<ResolvedDependencies, ServiceManagerError> {
        let namespace = ap.namespace_or_default();
        let mesh = self.resolver.resolve_mesh(&ap.spec.mesh, &namespace).await?;
        let mut dependencies = ResolvedDependencies::with_parent(mesh);
        for rule in &ap.spec.rules {
            self.resolve_target(&rule.source, &namespace, &mut dependencies)
                .await?;
            self.resolve_target(&rule.destination, &namespace, &mut dependencies)
                .await?;
        }
        Ok(dependencies)
    }

    async fn get_resource(&self, id: &str) -> Result<sdk::AccessPolicy, OciError> {
        self.client.get_access_policy(id).await
    }

    fn build_sdk(
        &self,
        ap: &AccessPolicy,
        base: Option<&sdk::AccessPolicy>,
        dependencies: &ResolvedDependencies,
    ) -> Result<sdk::AccessPolicy, ConversionError> {
        access_policy_to_sdk(ap, base, dependencies)
    }

    async fn create_resource(
        &self,
        ap: &sdk::AccessPolicy,
        opc_retry_token: &str,
    ) -> Result<sdk::AccessPolicy, OciError> {
        self.client.create_access_policy(ap, opc_retry_token).await
    }

    async fn update_resource(&self, ap: &sdk::AccessPolicy) -> Result<(), OciError> {
        self.client.update_access_policy(ap).await
    }

    async fn change_compartment(&self, id: &str, compartment_id: &str) -> Result<(), OciError> {
        self.client
            .change_access_policy_compartment(id, compartment_id)
            .await
    }

    async fn delete_resource(&self, id: &str) -> Result<(), OciError> {
        self.client.delete_access_policy(id).await
    }

    fn update_status(
        &self,
        status: &mut ResourceStatus,
        ap: &sdk::AccessPolicy,
        _dependencies: &ResolvedDependencies,
    ) {
        status.mesh_id = Some(ap.mesh_id.clone());
    }
}
