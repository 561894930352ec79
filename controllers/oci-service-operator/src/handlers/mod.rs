//! Per-kind adapters plugged into the generic service manager

pub mod access_policy;
pub mod database;
pub mod ingress_gateway;
pub mod mesh;
pub mod route_tables;
pub mod stream;
pub mod virtual_deployment;
pub mod virtual_service;

pub use access_policy::AccessPolicyHandler;
pub use database::{AutonomousDatabaseHandler, MySqlDbSystemHandler};
pub use ingress_gateway::IngressGatewayHandler;
pub use mesh::MeshHandler;
pub use route_tables::{IngressGatewayRouteTableHandler, VirtualServiceRouteTableHandler};
pub use stream::StreamHandler;
pub use virtual_deployment::VirtualDeploymentHandler;
pub use virtual_service::VirtualServiceHandler;
