//! Service mesh CRDs (`servicemesh.oci.oracle.com/v1beta1`)

pub mod access_policy;
pub mod ingress_gateway;
pub mod ingress_gateway_route_table;
pub mod mesh;
pub mod virtual_deployment;
pub mod virtual_deployment_binding;
pub mod virtual_service;
pub mod virtual_service_route_table;

pub use access_policy::*;
pub use ingress_gateway::*;
pub use ingress_gateway_route_table::*;
pub use mesh::*;
pub use virtual_deployment::*;
pub use virtual_deployment_binding::*;
pub use virtual_service::*;
pub use virtual_service_route_table::*;

pub const SERVICE_MESH_GROUP: &str = "servicemesh.oci.oracle.com";

/// Finalizer placed on every service mesh resource
pub const SERVICE_MESH_FINALIZER: &str = "servicemesh.oci.oracle.com/finalizer";
