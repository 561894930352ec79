//! OCI service client traits
//!
//! One trait per OCI service. The HTTP clients implement them for production
//! and the mocks (feature `test-util`) implement them for unit tests.
//! All async methods must be `Send` to work with Tokio's work-stealing runtime.
//!
//! Every resource follows the same contract: `get` by OCID, `create` with a
//! caller-supplied retry token that must be passed unchanged on every retry of
//! the same logical create, `update` with the desired model (only mutable
//! fields are sent), `delete` by OCID, and `change_*_compartment`.

use crate::error::OciError;
use crate::models::database::AutonomousDatabase;
use crate::models::mysql::DbSystem;
use crate::models::servicemesh::{
    AccessPolicy, IngressGateway, IngressGatewayRouteTable, Mesh, VirtualDeployment,
    VirtualService, VirtualServiceRouteTable,
};
use crate::models::streaming::Stream;

#[async_trait::async_trait]
pub trait ServiceMeshClient: Send + Sync {
    async fn get_mesh(&self, id: &str) -> Result<Mesh, OciError>;
    async fn create_mesh(&self, mesh: &Mesh, opc_retry_token: &str) -> Result<Mesh, OciError>;
    async fn update_mesh(&self, mesh: &Mesh) -> Result<(), OciError>;
    async fn delete_mesh(&self, id: &str) -> Result<(), OciError>;
    async fn change_mesh_compartment(&self, id: &str, compartment_id: &str) -> Result<(), OciError>;

    async fn get_virtual_service(&self, id: &str) -> Result<VirtualService, OciError>;
    async fn create_virtual_service(&self, vs: &VirtualService, opc_retry_token: &str) -> Result<VirtualService, OciError>;
    async fn update_virtual_service(&self, vs: &VirtualService) -> Result<(), OciError>;
    async fn delete_virtual_service(&self, id: &str) -> Result<(), OciError>;
    async fn change_virtual_service_compartment(&self, id: &str, compartment_id: &str) -> Result<(), OciError>;

    async fn get_virtual_deployment(&self, id: &str) -> Result<VirtualDeployment, OciError>;
    async fn create_virtual_deployment(&self, vd: &VirtualDeployment, opc_retry_token: &str) -> Result<VirtualDeployment, OciError>;
    async fn update_virtual_deployment(&self, vd: &VirtualDeployment) -> Result<(), OciError>;
    async fn delete_virtual_deployment(&self, id: &str) -> Result<(), OciError>;
    async fn change_virtual_deployment_compartment(&self, id: &str, compartment_id: &str) -> Result<(), OciError>;

    async fn get_virtual_service_route_table(&self, id: &str) -> Result<VirtualServiceRouteTable, OciError>;
    async fn create_virtual_service_route_table(&self, vsrt: &VirtualServiceRouteTable, opc_retry_token: &str) -> Result<VirtualServiceRouteTable, OciError>;
    async fn update_virtual_service_route_table(&self, vsrt: &VirtualServiceRouteTable) -> Result<(), OciError>;
    async fn delete_virtual_service_route_table(&self, id: &str) -> Result<(), OciError>;
    async fn change_virtual_service_route_table_compartment(&self, id: &str, compartment_id: &str) -> Result<(), OciError>;

    async fn get_ingress_gateway(&self, id: &str) -> Result<IngressGateway, OciError>;
    async fn create_ingress_gateway(&self, ig: &IngressGateway, opc_retry_token: &str) -> Result<IngressGateway, OciError>;
    async fn update_ingress_gateway(&self, ig: &IngressGateway) -> Result<(), OciError>;
    async fn delete_ingress_gateway(&self, id: &str) -> Result<(), OciError>;
    async fn change_ingress_gateway_compartment(&self, id: &str, compartment_id: &str) -> Result<(), OciError>;

    async fn get_ingress_gateway_route_table(&self, id: &str) -> Result<IngressGatewayRouteTable, OciError>;
    async fn create_ingress_gateway_route_table(&self, igrt: &IngressGatewayRouteTable, opc_retry_token: &str) -> Result<IngressGatewayRouteTable, OciError>;
    async fn update_ingress_gateway_route_table(&self, igrt: &IngressGatewayRouteTable) -> Result<(), OciError>;
    async fn delete_ingress_gateway_route_table(&self, id: &str) -> Result<(), OciError>;
    async fn change_ingress_gateway_route_table_compartment(&self, id: &str, compartment_id: &str) -> Result<(), OciError>;

    async fn get_access_policy(&self, id: &str) -> Result<AccessPolicy, OciError>;
    async fn create_access_policy(&self, ap: &AccessPolicy, opc_retry_token: &str) -> Result<AccessPolicy, OciError>;
    async fn update_access_policy(&self, ap: &AccessPolicy) -> Result<(), OciError>;
    async fn delete_access_policy(&self, id: &str) -> Result<(), OciError>;
    async fn change_access_policy_compartment(&self, id: &str, compartment_id: &str) -> Result<(), OciError>;
}

#[async_trait::async_trait]
pub trait DatabaseClient: Send + Sync {
    async fn get_autonomous_database(&self, id: &str) -> Result<AutonomousDatabase, OciError>;
    async fn create_autonomous_database(&self, adb: &AutonomousDatabase, opc_retry_token: &str) -> Result<AutonomousDatabase, OciError>;
    async fn update_autonomous_database(&self, adb: &AutonomousDatabase) -> Result<(), OciError>;
    async fn delete_autonomous_database(&self, id: &str) -> Result<(), OciError>;
    async fn change_autonomous_database_compartment(&self, id: &str, compartment_id: &str) -> Result<(), OciError>;
}

#[async_trait::async_trait]
pub trait MySqlClient: Send + Sync {
    async fn get_db_system(&self, id: &str) -> Result<DbSystem, OciError>;
    async fn create_db_system(&self, db_system: &DbSystem, opc_retry_token: &str) -> Result<DbSystem, OciError>;
    async fn update_db_system(&self, db_system: &DbSystem) -> Result<(), OciError>;
    async fn delete_db_system(&self, id: &str) -> Result<(), OciError>;
    async fn change_db_system_compartment(&self, id: &str, compartment_id: &str) -> Result<(), OciError>;
}

#[async_trait::async_trait]
pub trait StreamAdminClient: Send + Sync {
    async fn get_stream(&self, id: &str) -> Result<Stream, OciError>;
    async fn create_stream(&self, stream: &Stream, opc_retry_token: &str) -> Result<Stream, OciError>;
    async fn update_stream(&self, stream: &Stream) -> Result<(), OciError>;
    async fn delete_stream(&self, id: &str) -> Result<(), OciError>;
    async fn change_stream_compartment(&self, id: &str, compartment_id: &str) -> Result<(), OciError>;
}
