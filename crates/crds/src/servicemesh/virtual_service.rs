//! VirtualService Custom Resource Definition

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::common::{DefinedTags, FreeformTags, MutualTransportLayerSecurityMode};
use crate::references::RefOrId;
use crate::status::ResourceStatus;

/// VirtualServiceSpec defines the desired state of a virtual service inside a mesh
#[derive(CustomResource, Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[kube(
    group = "servicemesh.oci.oracle.com",
    version = "v1beta1",
    kind = "VirtualService",
    namespaced,
    status = "ResourceStatus",
    printcolumn = r#"{"name":"Active","type":"string","jsonPath":".status.conditions[?(@.type==\"Active\")].status"}"#,
    printcolumn = r#"{"name":"Age","type":"date","jsonPath":".metadata.creationTimestamp"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct VirtualServiceSpec {
    /// Name of the virtual service (defaults to `namespace/name`, immutable)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub compartment_id: String,

    /// Parent mesh (immutable)
    pub mesh: RefOrId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_routing_policy: Option<DefaultRoutingPolicy>,

    /// Hostnames the virtual service answers for
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hosts: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mtls: Option<VirtualServiceMutualTransportLayerSecurity>,

    #[serde(default, skip_serializing_if = "FreeformTags::is_empty")]
    pub freeform_tags: FreeformTags,

    #[serde(default, skip_serializing_if = "DefinedTags::is_empty")]
    pub defined_tags: DefinedTags,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoutingPolicyType {
    Uniform,
    Deny,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DefaultRoutingPolicy {
    #[serde(rename = "type")]
    pub policy_type: RoutingPolicyType,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VirtualServiceMutualTransportLayerSecurity {
    pub mode: MutualTransportLayerSecurityMode,

    /// Maximum certificate validity in days
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum_validity: Option<i32>,
}

crate::managed_resource!(VirtualService, name = name);
