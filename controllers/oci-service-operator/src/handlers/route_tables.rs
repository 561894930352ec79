//! Route table handlers
//!
//! Destinations must live under the table's own parent: virtual deployments
//! of the routed virtual service, virtual services of the gateway's mesh.

use std::sync::Arc;

use crds::{
    IngressGatewayRouteTable, ManagedResource, ResourceStatus, SERVICE_MESH_FINALIZER,
    VirtualServiceRouteTable,
};
use oci_client::models::servicemesh as sdk;
use oci_client::{OciError, ServiceMeshClient};

use crate::conversions::{ingress_gateway_route_table_to_sdk, virtual_service_route_table_to_sdk};
use crate::error::{ConversionError, ServiceManagerError};
use crate::manager::{CustomResourceHandler, ResolvedDependencies, ResolvedRef};
use crate::resolver::Resolver;

/// A destination whose parent is known must share the table's parent
fn check_same_parent(
    kind: &str,
    key: &str,
    destination: &ResolvedRef,
    parent_kind: &str,
    expected: Option<&str>,
) -> Result<(), ServiceManagerError> {
    match (destination.parent_id.as_deref(), expected) {
        (Some(actual), Some(expected)) if actual != expected => {
            Err(ServiceManagerError::terminal(format!(
                "{kind} {key} routes to {} outside {parent_kind} {expected}",
                destination.id
            )))
        }
        _ => Ok(()),
    }
}

pub struct VirtualServiceRouteTableHandler {
    client: Arc<dyn ServiceMeshClient>,
    resolver: Arc<dyn Resolver>,
}

impl VirtualServiceRouteTableHandler {
    pub fn new(client: Arc<dyn ServiceMeshClient>, resolver: Arc<dyn Resolver>) -> Self {
        Self { client, resolver }
    }
}

#[async_trait::async_trait]
impl CustomResourceHandler for VirtualServiceRouteTableHandler {
    type Resource = VirtualServiceRouteTable;
    type Sdk = sdk::VirtualServiceRouteTable;

    const KIND: &'static str = "VirtualServiceRouteTable";

    fn finalizer(&self) -> &'static str {
        SERVICE_MESH_FINALIZER
    }

    async fn resolve_dependencies(
        &self,
        vsrt: &VirtualServiceRouteTable,
    ) -> Result<ResolvedDependencies, ServiceManagerError> {
        let namespace = vsrt.namespace_or_default();
        let key = vsrt.object_key();
        let vs = self
            .resolver
            .resolve_virtual_service(&vsrt.spec.virtual_service, &namespace)
            .await?;
        let mut dependencies = ResolvedDependencies::with_parent(vs.clone());

        for destination in vsrt.spec.route_rules.iter().flat_map(|r| r.destinations()) {
            let vd = self
                .resolver
                .resolve_virtual_deployment(&destination.virtual_deployment, &namespace)
                .await?;
            check_same_parent(Self::KIND, &key, &vd, "virtual service", Some(&vs.id))?;
            dependencies.insert_reference(&destination.virtual_deployment, &namespace, vd);
        }
        Ok(dependencies)
    }

    async fn get_resource(&self, id: &str) -> Result<sdk::VirtualServiceRouteTable, OciError> {
        self.client.get_virtual_service_route_table(id).await
    }

    fn build_sdk(
        &self,
        vsrt: &VirtualServiceRouteTable,
        base: Option<&sdk::VirtualServiceRouteTable>,
        dependencies: &ResolvedDependencies,
    ) -> Result<sdk::VirtualServiceRouteTable, ConversionError> {
        virtual_service_route_table_to_sdk(vsrt, base, dependencies)
    }

    async fn create_resource(
        &self,
        vsrt: &sdk::VirtualServiceRouteTable,
        opc_retry_token: &str,
    ) -> Result<sdk::VirtualServiceRouteTable, OciError> {
        self.client
            .create_virtual_service_route_table(vsrt, opc_retry_token)
            .await
    }

    async fn update_resource(&self, vsrt: &sdk::VirtualServiceRouteTable) -> Result<(), OciError> {
        self.client.update_virtual_service_route_table(vsrt).await
    }

    async fn change_compartment(&self, id: &str, compartment_id: &str) -> Result<(), OciError> {
        self.client
            .change_virtual_service_route_table_compartment(id, compartment_id)
            .await
    }

    async fn delete_resource(&self, id: &str) -> Result<(), OciError> {
        self.client.delete_virtual_service_route_table(id).await
    }

    fn update_status(
        &self,
        status: &mut ResourceStatus,
        vsrt: &sdk::VirtualServiceRouteTable,
        dependencies: &ResolvedDependencies,
    ) {
        status.virtual_service_id = Some(vsrt.virtual_service_id.clone());
        if let Some(parent) = &dependencies.parent {
            status.virtual_service_name = parent.name.clone();
            status.mesh_id = parent.parent_id.clone();
        }
    }
}

pub struct IngressGatewayRouteTableHandler {
    client: Arc<dyn ServiceMeshClient>,
    resolver: Arc<dyn Resolver>,
}

impl IngressGatewayRouteTableHandler {
    pub fn new(client: Arc<dyn ServiceMeshClient>, resolver: Arc<dyn Resolver>) -> Self {
        Self { client, resolver }
    }
}

#[async_trait::async_trait]
impl CustomResourceHandler for IngressGatewayRouteTableHandler {
    type Resource = IngressGatewayRouteTable;
    type Sdk = sdk::IngressGatewayRouteTable;

    const KIND: &'static str = "IngressGatewayRouteTable";

    fn finalizer(&self) -> &'static str {
        SERVICE_MESH_FINALIZER
    }

    async fn resolve_dependencies(
        &self,
        igrt: &IngressGatewayRouteTable,
    ) -> Result<ResolvedDependencies, ServiceManagerError> {
        let namespace = igrt.namespace_or_default();
        let key = igrt.object_key();
        let ig = self
            .resolver
            .resolve_ingress_gateway(&igrt.spec.ingress_gateway, &namespace)
            .await?;
        let mesh_id = ig.parent_id.clone();
        let mut dependencies = ResolvedDependencies::with_parent(ig);

        for destination in igrt.spec.route_rules.iter().flat_map(|r| r.destinations()) {
            let vs = self
                .resolver
                .resolve_virtual_service(&destination.virtual_service, &namespace)
                .await?;
            check_same_parent(Self::KIND, &key, &vs, "mesh", mesh_id.as_deref())?;
            dependencies.insert_reference(&destination.virtual_service, &namespace, vs);
        }
        Ok(dependencies)
    }

    async fn get_resource(&self, id: &str) -> Result<sdk::IngressGatewayRouteTable, OciError> {
        self.client.get_ingress_gateway_route_table(id).await
    }

    fn build_sdk(
        &self,
        igrt: &IngressGatewayRouteTable,
        base: Option<&sdk::IngressGatewayRouteTable>,
        dependencies: &ResolvedDependencies,
    ) -> Result<sdk::IngressGatewayRouteTable, ConversionError> {
        ingress_gateway_route_table_to_sdk(igrt, base, dependencies)
    }

    async fn create_resource(
        &self,
        igrt: &sdk::IngressGatewayRouteTable,
        opc_retry_token: &str,
    ) -> Result<sdk::IngressGatewayRouteTable, OciError> {
        self.client
            .create_ingress_gateway_route_table(igrt, opc_retry_token)
            .await
    }

    async fn update_resource(&self, igrt: &sdk::IngressGatewayRouteTable) -> Result<(), OciError> {
        self.client.update_ingress_gateway_route_table(igrt).await
    }

    async fn change_compartment(&self, id: &str, compartment_id: &str) -> Result<(), OciError> {
        self.client
            .change_ingress_gateway_route_table_compartment(id, compartment_id)
            .await
    }

    async fn delete_resource(&self, id: &str) -> Result<(), OciError> {
        self.client.delete_ingress_gateway_route_table(id).await
    }

    fn update_status(
        &self,
        status: &mut ResourceStatus,
        igrt: &sdk::IngressGatewayRouteTable,
        dependencies: &ResolvedDependencies,
    ) {
        status.ingress_gateway_id = Some(igrt.ingress_gateway_id.clone());
        if let Some(parent) = &dependencies.parent {
            status.ingress_gateway_name = parent.name.clone();
            status.mesh_id = parent.parent_id.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crds::{
        RefOrId, TcpVirtualServiceTrafficRouteRule, VirtualDeploymentTrafficRuleTarget,
        VirtualServiceTrafficRouteRule,
    };
    use oci_client::MockServiceMeshClient;

    use crate::test_utils::{virtual_service_route_table, MockResolver};

    fn rule(target: &str) -> VirtualServiceTrafficRouteRule {
        VirtualServiceTrafficRouteRule::TcpRoute(TcpVirtualServiceTrafficRouteRule {
            destinations: vec![VirtualDeploymentTrafficRuleTarget {
                virtual_deployment: RefOrId::from_ref(target),
                weight: 100,
                port: None,
            }],
        })
    }

    fn resolver() -> MockResolver {
        let resolver = MockResolver::default();
        resolver.insert(
            "apps/reviews",
            ResolvedRef {
                id: "ocid1.vs.reviews".to_string(),
                name: Some("apps/reviews".to_string()),
                parent_id: Some("ocid1.mesh".to_string()),
            },
        );
        resolver.insert(
            "apps/reviews-v1",
            ResolvedRef {
                id: "ocid1.vd.v1".to_string(),
                name: None,
                parent_id: Some("ocid1.vs.reviews".to_string()),
            },
        );
        resolver.insert(
            "apps/ratings-v1",
            ResolvedRef {
                id: "ocid1.vd.ratings".to_string(),
                name: None,
                parent_id: Some("ocid1.vs.ratings".to_string()),
            },
        );
        resolver
    }

    fn handler(resolver: MockResolver) -> VirtualServiceRouteTableHandler {
        VirtualServiceRouteTableHandler::new(Arc::new(MockServiceMeshClient::new()), Arc::new(resolver))
    }

    #[tokio::test]
    async fn test_destinations_are_resolved() {
        let vsrt = virtual_service_route_table("apps", "rt", RefOrId::from_ref("reviews"), vec![rule("reviews-v1")]);
        let deps = handler(resolver()).resolve_dependencies(&vsrt).await.unwrap();
        assert_eq!(deps.parent_id().unwrap(), "ocid1.vs.reviews");
        assert_eq!(
            deps.lookup_id(&RefOrId::from_ref("reviews-v1"), "apps").unwrap(),
            "ocid1.vd.v1"
        );
    }

    #[tokio::test]
    async fn test_destination_of_another_service_is_rejected() {
        let vsrt = virtual_service_route_table("apps", "rt", RefOrId::from_ref("reviews"), vec![rule("ratings-v1")]);
        let err = handler(resolver()).resolve_dependencies(&vsrt).await.unwrap_err();
        assert!(!err.is_retryable());
        assert_eq!(
            err.to_string(),
            "VirtualServiceRouteTable apps/rt routes to ocid1.vd.ratings outside virtual service ocid1.vs.reviews"
        );
    }

    #[tokio::test]
    async fn test_unresolved_destination_requeues() {
        let vsrt = virtual_service_route_table("apps", "rt", RefOrId::from_ref("reviews"), vec![rule("reviews-v9")]);
        let err = handler(resolver()).resolve_dependencies(&vsrt).await.unwrap_err();
        assert!(err.is_retryable());
    }

    #[test]
    fn test_update_status_copies_parents() {
        let handler = handler(MockResolver::default());
        let deps = ResolvedDependencies::with_parent(ResolvedRef {
            id: "ocid1.vs".to_string(),
            name: Some("apps/reviews".to_string()),
            parent_id: Some("ocid1.mesh".to_string()),
        });
        let remote = sdk::VirtualServiceRouteTable {
            virtual_service_id: "ocid1.vs".to_string(),
            ..Default::default()
        };
        let mut status = ResourceStatus::default();
        handler.update_status(&mut status, &remote, &deps);
        assert_eq!(status.virtual_service_id.as_deref(), Some("ocid1.vs"));
        assert_eq!(status.virtual_service_name.as_deref(), Some("apps/reviews"));
        assert_eq!(status.mesh_id.as_deref(), Some("ocid1.mesh"));
    }
}
