//! HTTP implementations of the OCI service client traits

pub mod database;
pub mod mysql;
pub mod servicemesh;
pub mod streaming;

pub use database::DatabaseHttpClient;
pub use mysql::MySqlHttpClient;
pub use servicemesh::ServiceMeshHttpClient;
pub use streaming::StreamAdminHttpClient;
