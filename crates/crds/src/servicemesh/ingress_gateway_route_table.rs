//! IngressGatewayRouteTable Custom Resource Definition

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::common::{DefinedTags, FreeformTags, Port};
use crate::references::RefOrId;
use crate::servicemesh::virtual_service_route_table::PathMatchType;
use crate::status::ResourceStatus;

/// IngressGatewayRouteTableSpec routes ingress traffic to virtual services
#[derive(CustomResource, Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[kube(
    group = "servicemesh.oci.oracle.com",
    version = "v1beta1",
    kind = "IngressGatewayRouteTable",
    namespaced,
    status = "ResourceStatus",
    printcolumn = r#"{"name":"Active","type":"string","jsonPath":".status.conditions[?(@.type==\"Active\")].status"}"#,
    printcolumn = r#"{"name":"Age","type":"date","jsonPath":".metadata.creationTimestamp"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct IngressGatewayRouteTableSpec {
    /// Name of the route table (defaults to `namespace/name`, immutable)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub compartment_id: String,

    /// Ingress gateway this table belongs to (immutable)
    pub ingress_gateway: RefOrId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,

    pub route_rules: Vec<IngressGatewayTrafficRouteRule>,

    #[serde(default, skip_serializing_if = "FreeformTags::is_empty")]
    pub freeform_tags: FreeformTags,

    #[serde(default, skip_serializing_if = "DefinedTags::is_empty")]
    pub defined_tags: DefinedTags,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum IngressGatewayTrafficRouteRule {
    HttpRoute(HttpIngressGatewayTrafficRouteRule),
    TcpRoute(TcpIngressGatewayTrafficRouteRule),
    TlsPassthroughRoute(TlsPassthroughIngressGatewayTrafficRouteRule),
}

impl IngressGatewayTrafficRouteRule {
    pub fn destinations(&self) -> &[VirtualServiceTrafficRuleTarget] {
        match self {
            IngressGatewayTrafficRouteRule::HttpRoute(rule) => &rule.destinations,
            IngressGatewayTrafficRouteRule::TcpRoute(rule) => &rule.destinations,
            IngressGatewayTrafficRouteRule::TlsPassthroughRoute(rule) => &rule.destinations,
        }
    }
}

/// Host (and optionally port) of the parent gateway that the rule applies to
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct IngressGatewayHostRef {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<Port>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HttpIngressGatewayTrafficRouteRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingress_gateway_host: Option<IngressGatewayHostRef>,

    pub destinations: Vec<VirtualServiceTrafficRuleTarget>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path_type: Option<PathMatchType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_grpc: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_host_rewrite_enabled: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_path_rewrite_enabled: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_in_ms: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TcpIngressGatewayTrafficRouteRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingress_gateway_host: Option<IngressGatewayHostRef>,

    pub destinations: Vec<VirtualServiceTrafficRuleTarget>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TlsPassthroughIngressGatewayTrafficRouteRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingress_gateway_host: Option<IngressGatewayHostRef>,

    pub destinations: Vec<VirtualServiceTrafficRuleTarget>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VirtualServiceTrafficRuleTarget {
    pub virtual_service: RefOrId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<Port>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<i32>,
}

crate::managed_resource!(IngressGatewayRouteTable, name = name);
