//! Service mesh operations for the mock client

use super::{mock_record, MockBackend, Table};
use crate::error::OciError;
use crate::models::servicemesh::*;
use crate::oci_trait::ServiceMeshClient;

mock_record!(Mesh, ServiceMeshLifecycleState, "mesh");
mock_record!(VirtualService, ServiceMeshLifecycleState, "meshvirtualservice");
mock_record!(VirtualDeployment, ServiceMeshLifecycleState, "meshvirtualdeployment");
mock_record!(VirtualServiceRouteTable, ServiceMeshLifecycleState, "meshvirtualserviceroutetable");
mock_record!(IngressGateway, ServiceMeshLifecycleState, "meshingressgateway");
mock_record!(IngressGatewayRouteTable, ServiceMeshLifecycleState, "meshingressgatewayroutetable");
mock_record!(AccessPolicy, ServiceMeshLifecycleState, "meshaccesspolicy");

/// Mock service mesh client
#[derive(Clone, Default)]
pub struct MockServiceMeshClient {
    pub backend: MockBackend,
    pub meshes: Table<Mesh>,
    pub virtual_services: Table<VirtualService>,
    pub virtual_deployments: Table<VirtualDeployment>,
    pub virtual_service_route_tables: Table<VirtualServiceRouteTable>,
    pub ingress_gateways: Table<IngressGateway>,
    pub ingress_gateway_route_tables: Table<IngressGatewayRouteTable>,
    pub access_policies: Table<AccessPolicy>,
}

impl MockServiceMeshClient {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl ServiceMeshClient for MockServiceMeshClient {
    async fn get_mesh(&self, id: &str) -> Result<Mesh, OciError> {
        self.meshes.fetch(&self.backend, "get_mesh", id)
    }

    async fn create_mesh(&self, mesh: &Mesh, opc_retry_token: &str) -> Result<Mesh, OciError> {
        self.meshes.create(&self.backend, "create_mesh", mesh, opc_retry_token)
    }

    async fn update_mesh(&self, mesh: &Mesh) -> Result<(), OciError> {
        self.meshes.update(&self.backend, "update_mesh", mesh)
    }

    async fn delete_mesh(&self, id: &str) -> Result<(), OciError> {
        self.meshes.delete(&self.backend, "delete_mesh", id)
    }

    async fn change_mesh_compartment(&self, id: &str, compartment_id: &str) -> Result<(), OciError> {
        self.meshes
            .change_compartment(&self.backend, "change_mesh_compartment", id, compartment_id)
    }

    async fn get_virtual_service(&self, id: &str) -> Result<VirtualService, OciError> {
        self.virtual_services.fetch(&self.backend, "get_virtual_service", id)
    }

    async fn create_virtual_service(&self, vs: &VirtualService, opc_retry_token: &str) -> Result<VirtualService, OciError> {
        self.virtual_services
            .create(&self.backend, "create_virtual_service", vs, opc_retry_token)
    }

    async fn update_virtual_service(&self, vs: &VirtualService) -> Result<(), OciError> {
        self.virtual_services.update(&self.backend, "update_virtual_service", vs)
    }

    async fn delete_virtual_service(&self, id: &str) -> Result<(), OciError> {
        self.virtual_services.delete(&self.backend, "delete_virtual_service", id)
    }

    async fn change_virtual_service_compartment(&self, id: &str, compartment_id: &str) -> Result<(), OciError> {
        self.virtual_services.change_compartment(
            &self.backend,
            "change_virtual_service_compartment",
            id,
            compartment_id,
        )
    }

    async fn get_virtual_deployment(&self, id: &str) -> Result<VirtualDeployment, OciError> {
        self.virtual_deployments.fetch(&self.backend, "get_virtual_deployment", id)
    }

    async fn create_virtual_deployment(&self, vd: &VirtualDeployment, opc_retry_token: &str) -> Result<VirtualDeployment, OciError> {
        self.virtual_deployments
            .create(&self.backend, "create_virtual_deployment", vd, opc_retry_token)
    }

    async fn update_virtual_deployment(&self, vd: &VirtualDeployment) -> Result<(), OciError> {
        self.virtual_deployments.update(&self.backend, "update_virtual_deployment", vd)
    }

    async fn delete_virtual_deployment(&self, id: &str) -> Result<(), OciError> {
        self.virtual_deployments.delete(&self.backend, "delete_virtual_deployment", id)
    }

    async fn change_virtual_deployment_compartment(&self, id: &str, compartment_id: &str) -> Result<(), OciError> {
        self.virtual_deployments.change_compartment(
            &self.backend,
            "change_virtual_deployment_compartment",
            id,
            compartment_id,
        )
    }

    async fn get_virtual_service_route_table(&self, id: &str) -> Result<VirtualServiceRouteTable, OciError> {
        self.virtual_service_route_tables
            .fetch(&self.backend, "get_virtual_service_route_table", id)
    }

    async fn create_virtual_service_route_table(&self, vsrt: &VirtualServiceRouteTable, opc_retry_token: &str) -> Result<VirtualServiceRouteTable, OciError> {
        self.virtual_service_route_tables.create(
            &self.backend,
            "create_virtual_service_route_table",
            vsrt,
            opc_retry_token,
        )
    }

    async fn update_virtual_service_route_table(&self, vsrt: &VirtualServiceRouteTable) -> Result<(), OciError> {
        self.virtual_service_route_tables
            .update(&self.backend, "update_virtual_service_route_table", vsrt)
    }

    async fn delete_virtual_service_route_table(&self, id: &str) -> Result<(), OciError> {
        self.virtual_service_route_tables
            .delete(&self.backend, "delete_virtual_service_route_table", id)
    }

    async fn change_virtual_service_route_table_compartment(&self, id: &str, compartment_id: &str) -> Result<(), OciError> {
        self.virtual_service_route_tables.change_compartment(
            &self.backend,
            "change_virtual_service_route_table_compartment",
            id,
            compartment_id,
        )
    }

    async fn get_ingress_gateway(&self, id: &str) -> Result<IngressGateway, OciError> {
        self.ingress_gateways.fetch(&self.backend, "get_ingress_gateway", id)
    }

    async fn create_ingress_gateway(&self, ig: &IngressGateway, opc_retry_token: &str) -> Result<IngressGateway, OciError> {
        self.ingress_gateways
            .create(&self.backend, "create_ingress_gateway", ig, opc_retry_token)
    }

    async fn update_ingress_gateway(&self, ig: &IngressGateway) -> Result<(), OciError> {
        self.ingress_gateways.update(&self.backend, "update_ingress_gateway", ig)
    }

    async fn delete_ingress_gateway(&self, id: &str) -> Result<(), OciError> {
        self.ingress_gateways.delete(&self.backend, "delete_ingress_gateway", id)
    }

    async fn change_ingress_gateway_compartment(&self, id: &str, compartment_id: &str) -> Result<(), OciError> {
        self.ingress_gateways.change_compartment(
            &self.backend,
            "change_ingress_gateway_compartment",
            id,
            compartment_id,
        )
    }

    async fn get_ingress_gateway_route_table(&self, id: &str) -> Result<IngressGatewayRouteTable, OciError> {
        self.ingress_gateway_route_tables
            .fetch(&self.backend, "get_ingress_gateway_route_table", id)
    }

    async fn create_ingress_gateway_route_table(&self, igrt: &IngressGatewayRouteTable, opc_retry_token: &str) -> Result<IngressGatewayRouteTable, OciError> {
        self.ingress_gateway_route_tables.create(
            &self.backend,
            "create_ingress_gateway_route_table",
            igrt,
            opc_retry_token,
        )
    }

    async fn update_ingress_gateway_route_table(&self, igrt: &IngressGatewayRouteTable) -> Result<(), OciError> {
        self.ingress_gateway_route_tables
            .update(&self.backend, "update_ingress_gateway_route_table", igrt)
    }

    async fn delete_ingress_gateway_route_table(&self, id: &str) -> Result<(), OciError> {
        self.ingress_gateway_route_tables
            .delete(&self.backend, "delete_ingress_gateway_route_table", id)
    }

    async fn change_ingress_gateway_route_table_compartment(&self, id: &str, compartment_id: &str) -> Result<(), OciError> {
        self.ingress_gateway_route_tables.change_compartment(
            &self.backend,
            "change_ingress_gateway_route_table_compartment",
            id,
            compartment_id,
        )
    }

    async fn get_access_policy(&self, id: &str) -> Result<AccessPolicy, OciError> {
        self.access_policies.fetch(&self.backend, "get_access_policy", id)
    }

    async fn create_access_policy(&self, ap: &AccessPolicy, opc_retry_token: &str) -> Result<AccessPolicy, OciError> {
        self.access_policies
            .create(&self.backend, "create_access_policy", ap, opc_retry_token)
    }

    async fn update_access_policy(&self, ap: &AccessPolicy) -> Result<(), OciError> {
        self.access_policies.update(&self.backend, "update_access_policy", ap)
    }

    async fn delete_access_policy(&self, id: &str) -> Result<(), OciError> {
        self.access_policies.delete(&self.backend, "delete_access_policy", id)
    }

    async fn change_access_policy_compartment(&self, id: &str, compartment_id: &str) -> Result<(), OciError> {
        self.access_policies.change_compartment(
            &self.backend,
            "change_access_policy_compartment",
            id,
            compartment_id,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::InjectedError;
    use crate::models::{LifecyclePhase, RemoteResource};

    fn mesh_request() -> Mesh {
        Mesh {
            compartment_id: "ocid1.compartment.a".into(),
            display_name: "ns/mesh".into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_is_deduplicated_by_retry_token() {
        let client = MockServiceMeshClient::new();
        let first = client.create_mesh(&mesh_request(), "token-1").await.unwrap();
        let second = client.create_mesh(&mesh_request(), "token-1").await.unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(client.meshes.len(), 1);
        assert_eq!(client.backend.calls("create_mesh"), 2);

        let third = client.create_mesh(&mesh_request(), "token-2").await.unwrap();
        assert_ne!(first.id, third.id);
        assert!(third.id.starts_with("ocid1.mesh.oc1.."));
    }

    #[tokio::test]
    async fn test_create_phase_is_configurable() {
        let client = MockServiceMeshClient::new();
        client.backend.set_create_phase(LifecyclePhase::Transitional);
        let mesh = client.create_mesh(&mesh_request(), "t").await.unwrap();
        assert_eq!(mesh.lifecycle_state, ServiceMeshLifecycleState::Creating);
        assert!(mesh.time_updated().is_some());
    }

    #[tokio::test]
    async fn test_injected_error_fires_once() {
        let client = MockServiceMeshClient::new();
        client
            .backend
            .fail_next("get_mesh", InjectedError::new(500, "InternalError", "boom"));
        let err = client.get_mesh("ocid1.mesh.x").await.unwrap_err();
        assert_eq!(err.status_code(), Some(500));
        let err = client.get_mesh("ocid1.mesh.x").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_delete_and_change_compartment() {
        let client = MockServiceMeshClient::new();
        let mesh = client.create_mesh(&mesh_request(), "t").await.unwrap();
        client
            .change_mesh_compartment(&mesh.id, "ocid1.compartment.b")
            .await
            .unwrap();
        assert_eq!(
            client.get_mesh(&mesh.id).await.unwrap().compartment_id,
            "ocid1.compartment.b"
        );
        client.delete_mesh(&mesh.id).await.unwrap();
        assert_eq!(
            client.meshes.get(&mesh.id).unwrap().lifecycle_phase(),
            LifecyclePhase::Deleted
        );
        assert!(client.delete_mesh("ocid1.mesh.missing").await.unwrap_err().is_not_found());
    }
}
