//! OCI Control-Plane REST Client
//!
//! A Rust client library for the OCI control-plane APIs managed by the
//! service operator: Service Mesh, Autonomous Database, MySQL and Streaming.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use oci_client::{BearerTokenSigner, HttpClient, ServiceMeshClient, ServiceMeshHttpClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let signer = Arc::new(BearerTokenSigner::new("token")?);
//! let http = HttpClient::with_endpoint(
//!     "https://service-mesh.us-ashburn-1.oci.oraclecloud.com/20220615",
//!     signer,
//! )?;
//! let client = ServiceMeshHttpClient::new(http);
//!
//! let mesh = client.get_mesh("ocid1.mesh.oc1..example").await?;
//! println!("{} is {:?}", mesh.display_name, mesh.lifecycle_state);
//! # Ok(())
//! # }
//! ```
//!
//! # Features
//!
//! - **Idempotent creates**: every create carries a caller-supplied `opc-retry-token`
//! - **Typed errors**: service errors keep status, code, message and `opc-request-id`
//! - **Mocks**: in-memory clients behind the `test-util` feature

pub mod client;
pub mod common;
pub mod error;
pub mod models;
#[path = "trait.rs"]
pub mod oci_trait;
#[cfg(feature = "test-util")]
pub mod mock;

pub use client::{DatabaseHttpClient, MySqlHttpClient, ServiceMeshHttpClient, StreamAdminHttpClient};
pub use common::{BearerTokenSigner, HttpClient, RequestSigner};
pub use error::OciError;
pub use models::{LifecyclePhase, RemoteResource};
pub use oci_trait::{DatabaseClient, MySqlClient, ServiceMeshClient, StreamAdminClient};
#[cfg(feature = "test-util")]
pub use mock::{
    InjectedError, MockDatabaseClient, MockMySqlClient, MockServiceMeshClient,
    MockStreamAdminClient,
};
