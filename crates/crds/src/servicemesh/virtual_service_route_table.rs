//! VirtualServiceRouteTable Custom Resource Definition

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::common::{DefinedTags, FreeformTags, Port};
use crate::references::RefOrId;
use crate::status::ResourceStatus;

/// VirtualServiceRouteTableSpec splits a virtual service's traffic across its deployments
#[derive(CustomResource, Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[kube(
    group = "servicemesh.oci.oracle.com",
    version = "v1beta1",
    kind = "VirtualServiceRouteTable",
    namespaced,
    status = "ResourceStatus",
    printcolumn = r#"{"name":"Active","type":"string","jsonPath":".status.conditions[?(@.type==\"Active\")].status"}"#,
    printcolumn = r#"{"name":"Age","type":"date","jsonPath":".metadata.creationTimestamp"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct VirtualServiceRouteTableSpec {
    /// Name of the route table (defaults to `namespace/name`, immutable)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub compartment_id: String,

    /// Virtual service whose traffic is routed (immutable)
    pub virtual_service: RefOrId,

    /// Lower values take precedence
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,

    pub route_rules: Vec<VirtualServiceTrafficRouteRule>,

    #[serde(default, skip_serializing_if = "FreeformTags::is_empty")]
    pub freeform_tags: FreeformTags,

    #[serde(default, skip_serializing_if = "DefinedTags::is_empty")]
    pub defined_tags: DefinedTags,
}

/// A single rule; exactly one protocol variant is present
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum VirtualServiceTrafficRouteRule {
    HttpRoute(HttpVirtualServiceTrafficRouteRule),
    TcpRoute(TcpVirtualServiceTrafficRouteRule),
    TlsPassthroughRoute(TlsPassthroughVirtualServiceTrafficRouteRule),
}

impl VirtualServiceTrafficRouteRule {
    pub fn destinations(&self) -> &[VirtualDeploymentTrafficRuleTarget] {
        match self {
            VirtualServiceTrafficRouteRule::HttpRoute(rule) => &rule.destinations,
            VirtualServiceTrafficRouteRule::TcpRoute(rule) => &rule.destinations,
            VirtualServiceTrafficRouteRule::TlsPassthroughRoute(rule) => &rule.destinations,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PathMatchType {
    Prefix,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HttpVirtualServiceTrafficRouteRule {
    pub destinations: Vec<VirtualDeploymentTrafficRuleTarget>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path_type: Option<PathMatchType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_grpc: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_in_ms: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TcpVirtualServiceTrafficRouteRule {
    pub destinations: Vec<VirtualDeploymentTrafficRuleTarget>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TlsPassthroughVirtualServiceTrafficRouteRule {
    pub destinations: Vec<VirtualDeploymentTrafficRuleTarget>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VirtualDeploymentTrafficRuleTarget {
    pub virtual_deployment: RefOrId,

    /// Share of traffic, 0-100
    pub weight: i32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<Port>,
}

crate::managed_resource!(VirtualServiceRouteTable, name = name);
