//! Mesh Custom Resource Definition

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::common::{DefinedTags, FreeformTags, MutualTransportLayerSecurityMode};
use crate::status::ResourceStatus;

/// MeshSpec defines the desired state of a service mesh
#[derive(CustomResource, Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[kube(
    group = "servicemesh.oci.oracle.com",
    version = "v1beta1",
    kind = "Mesh",
    namespaced,
    status = "ResourceStatus",
    printcolumn = r#"{"name":"Active","type":"string","jsonPath":".status.conditions[?(@.type==\"Active\")].status"}"#,
    printcolumn = r#"{"name":"Age","type":"date","jsonPath":".metadata.creationTimestamp"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct MeshSpec {
    /// Display name (defaults to `namespace/name`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub compartment_id: String,

    /// Certificate authorities used to issue mesh certificates (create-only)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub certificate_authorities: Vec<CertificateAuthority>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mtls: Option<MeshMutualTransportLayerSecurity>,

    #[serde(default, skip_serializing_if = "FreeformTags::is_empty")]
    pub freeform_tags: FreeformTags,

    #[serde(default, skip_serializing_if = "DefinedTags::is_empty")]
    pub defined_tags: DefinedTags,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CertificateAuthority {
    /// OCID of the certificate authority
    pub id: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MeshMutualTransportLayerSecurity {
    /// Lowest MTLS mode any virtual service in the mesh may use
    pub minimum: MutualTransportLayerSecurityMode,
}

crate::managed_resource!(Mesh, name = display_name);
