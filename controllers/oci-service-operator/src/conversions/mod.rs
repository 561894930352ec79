//! Spec to remote model conversions.
//!
//! Every `*_to_sdk` function is pure: it takes the custom resource, the
//! remote object as last fetched (if any) and the resolved dependencies, and
//! returns the remote object the spec asks for. Starting from the fetched
//! object keeps server-assigned and create-only fields intact, so an
//! unchanged spec converts to exactly the current remote object.
//!
//! The `*_from_sdk` functions map remote values back to spec form; they fail
//! on variants the operator does not know about.

pub mod access_policy;
pub mod common;
pub mod database;
pub mod ingress_gateway;
pub mod mesh;
pub mod route_tables;
pub mod streaming;
pub mod virtual_deployment;
pub mod virtual_service;

pub use access_policy::access_policy_to_sdk;
pub use database::{autonomous_database_to_sdk, mysql_db_system_to_sdk};
pub use ingress_gateway::ingress_gateway_to_sdk;
pub use mesh::mesh_to_sdk;
pub use route_tables::{ingress_gateway_route_table_to_sdk, virtual_service_route_table_to_sdk};
pub use streaming::stream_to_sdk;
pub use virtual_deployment::virtual_deployment_to_sdk;
pub use virtual_service::virtual_service_to_sdk;
