//! AccessPolicy Custom Resource Definition

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::common::{DefinedTags, FreeformTags, Port};
use crate::references::RefOrId;
use crate::status::ResourceStatus;

/// AccessPolicySpec lists the traffic allowed between mesh endpoints
#[derive(CustomResource, Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[kube(
    group = "servicemesh.oci.oracle.com",
    version = "v1beta1",
    kind = "AccessPolicy",
    namespaced,
    status = "ResourceStatus",
    printcolumn = r#"{"name":"Active","type":"string","jsonPath":".status.conditions[?(@.type==\"Active\")].status"}"#,
    printcolumn = r#"{"name":"Age","type":"date","jsonPath":".metadata.creationTimestamp"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct AccessPolicySpec {
    /// Name of the access policy (defaults to `namespace/name`, immutable)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub compartment_id: String,

    /// Mesh the policy applies to (immutable)
    pub mesh: RefOrId,

    pub rules: Vec<AccessPolicyRule>,

    #[serde(default, skip_serializing_if = "FreeformTags::is_empty")]
    pub freeform_tags: FreeformTags,

    #[serde(default, skip_serializing_if = "DefinedTags::is_empty")]
    pub defined_tags: DefinedTags,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccessPolicyAction {
    Allow,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AccessPolicyRule {
    pub action: AccessPolicyAction,
    pub source: TrafficTarget,
    pub destination: TrafficTarget,
}

/// Endpoint of an access rule; exactly one variant is present
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum TrafficTarget {
    AllVirtualServices(AllVirtualServices),
    VirtualService(RefOrId),
    IngressGateway(RefOrId),
    ExternalService(ExternalService),
}

/// Matches every virtual service in the mesh
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AllVirtualServices {}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExternalServiceProtocol {
    Http,
    Https,
    Tcp,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExternalService {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hostnames: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ip_addresses: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ports: Vec<Port>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<ExternalServiceProtocol>,
}

crate::managed_resource!(AccessPolicy, name = name);
