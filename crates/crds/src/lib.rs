//! OCI Service Operator CRD Definitions
//!
//! Kubernetes Custom Resource Definitions for the OCI service operator.

pub mod common;
pub mod database;
pub mod references;
pub mod registry;
pub mod servicemesh;
pub mod status;
pub mod streaming;

pub use common::*;
pub use database::*;
pub use references::*;
pub use registry::*;
pub use servicemesh::*;
pub use status::*;
pub use streaming::*;

/// Finalizer placed on resources of the `oci.oracle.com` group
pub const OCI_FINALIZER: &str = "finalizers.oci.oracle.com";
