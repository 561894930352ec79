//! VirtualDeployment handler
//!
//! A virtual deployment cannot be deleted while a VirtualDeploymentBinding
//! or a VirtualServiceRouteTable destination still points at it. The remote
//! API does not enforce this, so the finalizer does. A blocked deletion is
//! requeued: dependents that name the deployment by OCID are not mapped
//! back to it by the secondary watches.

use std::sync::Arc;

use crds::{
    ManagedResource, ResourceStatus, SERVICE_MESH_FINALIZER, VirtualDeployment,
    VirtualDeploymentBinding, VirtualServiceRouteTable,
};
use kube::ResourceExt;
use kube_runtime::reflector::ObjectRef;
use oci_client::models::servicemesh as sdk;
use oci_client::{OciError, ServiceMeshClient};

use crate::conversions::virtual_deployment_to_sdk;
use crate::error::{ConversionError, ServiceManagerError};
use crate::manager::{CustomResourceHandler, ResolvedDependencies};
use crate::resolver::Resolver;

pub struct VirtualDeploymentHandler {
    client: Arc<dyn ServiceMeshClient>,
    resolver: Arc<dyn Resolver>,
}

impl VirtualDeploymentHandler {
    pub fn new(client: Arc<dyn ServiceMeshClient>, resolver: Arc<dyn Resolver>) -> Self {
        Self { client, resolver }
    }
}

fn binding_namespace(binding: &VirtualDeploymentBinding) -> String {
    binding.namespace().unwrap_or_else(|| "default".to_string())
}

/// Virtual deployment a binding points at, when it is referenced in-cluster
pub fn bound_virtual_deployment(binding: &VirtualDeploymentBinding) -> Option<ObjectRef<VirtualDeployment>> {
    let namespace = binding_namespace(binding);
    binding
        .spec
        .virtual_deployment
        .as_ref_parts()
        .map(|r| ObjectRef::new(&r.name).within(r.namespace_or(&namespace)))
}

/// In-cluster virtual deployments a route table sends traffic to
pub fn routed_virtual_deployments(route_table: &VirtualServiceRouteTable) -> Vec<ObjectRef<VirtualDeployment>> {
    let namespace = route_table.namespace_or_default();
    route_table
        .spec
        .route_rules
        .iter()
        .flat_map(|rule| rule.destinations())
        .filter_map(|d| d.virtual_deployment.as_ref_parts())
        .map(|r| ObjectRef::new(&r.name).within(r.namespace_or(&namespace)))
        .collect()
}

#[async_trait::async_trait]
impl CustomResourceHandler for VirtualDeploymentHandler {
    type Resource = VirtualDeployment;
    type Sdk = sdk::VirtualDeployment;

    const KIND: &'static str = "VirtualDeployment";

    fn finalizer(&self) -> &'static str {
        SERVICE_MESH_FINALIZER
    }

    async fn resolve_dependencies(
        &self,
        vd: &VirtualDeployment,
    ) -> Result<ResolvedDependencies, ServiceManagerError> {
        let vs = self
            .resolver
            .resolve_virtual_service(&vd.spec.virtual_service, &vd.namespace_or_default())
            .await?;
        Ok(ResolvedDependencies::with_parent(vs))
    }

    async fn get_resource(&self, id: &str) -> Result<sdk::VirtualDeployment, OciError> {
        self.client.get_virtual_deployment(id).await
    }

    fn build_sdk(
        &self,
        vd: &VirtualDeployment,
        base: Option<&sdk::VirtualDeployment>,
        dependencies: &ResolvedDependencies,
    ) -> Result<sdk::VirtualDeployment, ConversionError> {
        virtual_deployment_to_sdk(vd, base, dependencies)
    }

    async fn create_resource(
        &self,
        vd: &sdk::VirtualDeployment,
        opc_retry_token: &str,
    ) -> Result<sdk::VirtualDeployment, OciError> {
        self.client.create_virtual_deployment(vd, opc_retry_token).await
    }

    async fn update_resource(&self, vd: &sdk::VirtualDeployment) -> Result<(), OciError> {
        self.client.update_virtual_deployment(vd).await
    }

    async fn change_compartment(&self, id: &str, compartment_id: &str) -> Result<(), OciError> {
        self.client
            .change_virtual_deployment_compartment(id, compartment_id)
            .await
    }

    async fn delete_resource(&self, id: &str) -> Result<(), OciError> {
        self.client.delete_virtual_deployment(id).await
    }

    fn update_status(
        &self,
        status: &mut ResourceStatus,
        vd: &sdk::VirtualDeployment,
        dependencies: &ResolvedDependencies,
    ) {
        status.virtual_service_id = Some(vd.virtual_service_id.clone());
        if let Some(parent) = &dependencies.parent {
            status.virtual_service_name = parent.name.clone();
            status.mesh_id = parent.parent_id.clone();
        }
    }

    async fn finalize(&self, vd: &VirtualDeployment) -> Result<(), ServiceManagerError> {
        let key = vd.object_key();
        let namespace = vd.namespace_or_default();
        let name = vd.name_any();
        let id = vd.remote_id();

        let bindings = self.resolver.list_virtual_deployment_bindings().await?;
        if let Some(binding) = bindings.iter().find(|b| {
            b.spec
                .virtual_deployment
                .points_at(&binding_namespace(b), &namespace, &name, id)
        }) {
            return Err(ServiceManagerError::requeue(format!(
                "VirtualDeployment {key} is referenced by VirtualDeploymentBinding {}/{}",
                binding_namespace(binding),
                binding.name_any()
            )));
        }

        let route_tables = self.resolver.list_virtual_service_route_tables().await?;
        if let Some(route_table) = route_tables.iter().find(|rt| {
            let rt_namespace = rt.namespace_or_default();
            rt.spec
                .route_rules
                .iter()
                .flat_map(|rule| rule.destinations())
                .any(|d| d.virtual_deployment.points_at(&rt_namespace, &namespace, &name, id))
        }) {
            return Err(ServiceManagerError::requeue(format!(
                "VirtualDeployment {key} is referenced by VirtualServiceRouteTable {}",
                route_table.object_key()
            )));
        }

        Ok(())
    }
}
