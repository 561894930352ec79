//! Service mesh API models (`/20220615`)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{remote_resource, DefinedTags, FreeformTags, LifecyclePhase};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceMeshLifecycleState {
    #[default]
    Creating,
    Updating,
    Active,
    Deleting,
    Deleted,
    Failed,
    #[serde(other)]
    Unknown,
}

impl ServiceMeshLifecycleState {
    pub fn phase(self) -> LifecyclePhase {
        match self {
            ServiceMeshLifecycleState::Active => LifecyclePhase::Active,
            ServiceMeshLifecycleState::Deleted => LifecyclePhase::Deleted,
            ServiceMeshLifecycleState::Failed => LifecyclePhase::Failed,
            ServiceMeshLifecycleState::Creating
            | ServiceMeshLifecycleState::Updating
            | ServiceMeshLifecycleState::Deleting
            | ServiceMeshLifecycleState::Unknown => LifecyclePhase::Transitional,
        }
    }

    pub fn from_phase(phase: LifecyclePhase) -> Self {
        match phase {
            LifecyclePhase::Active => ServiceMeshLifecycleState::Active,
            LifecyclePhase::Transitional => ServiceMeshLifecycleState::Creating,
            LifecyclePhase::Deleted => ServiceMeshLifecycleState::Deleted,
            // mesh resources cannot be stopped
            LifecyclePhase::Stopped | LifecyclePhase::Failed => ServiceMeshLifecycleState::Failed,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MutualTransportLayerSecurityMode {
    Disabled,
    Permissive,
    Strict,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AccessLoggingConfiguration {
    pub is_enabled: bool,
}

// Mesh

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Mesh {
    #[serde(default)]
    pub id: String,
    pub compartment_id: String,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub certificate_authorities: Vec<CertificateAuthority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mtls: Option<MeshMutualTransportLayerSecurity>,
    #[serde(default)]
    pub lifecycle_state: ServiceMeshLifecycleState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lifecycle_details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_created: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_updated: Option<DateTime<Utc>>,
    #[serde(default)]
    pub freeform_tags: FreeformTags,
    #[serde(default)]
    pub defined_tags: DefinedTags,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CertificateAuthority {
    pub id: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MeshMutualTransportLayerSecurity {
    pub minimum: MutualTransportLayerSecurityMode,
}

// VirtualService

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VirtualService {
    #[serde(default)]
    pub id: String,
    pub compartment_id: String,
    pub mesh_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_routing_policy: Option<DefaultVirtualServiceRoutingPolicy>,
    #[serde(default)]
    pub hosts: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mtls: Option<MutualTransportLayerSecurity>,
    #[serde(default)]
    pub lifecycle_state: ServiceMeshLifecycleState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lifecycle_details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_created: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_updated: Option<DateTime<Utc>>,
    #[serde(default)]
    pub freeform_tags: FreeformTags,
    #[serde(default)]
    pub defined_tags: DefinedTags,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoutingPolicyType {
    Uniform,
    Deny,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DefaultVirtualServiceRoutingPolicy {
    #[serde(rename = "type")]
    pub policy_type: RoutingPolicyType,
}

/// MTLS settings of a virtual service; `certificate_id` is assigned by the service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MutualTransportLayerSecurity {
    pub mode: MutualTransportLayerSecurityMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum_validity: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate_id: Option<String>,
}

// VirtualDeployment

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VirtualDeployment {
    #[serde(default)]
    pub id: String,
    pub compartment_id: String,
    pub virtual_service_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_discovery: Option<ServiceDiscoveryConfiguration>,
    #[serde(default)]
    pub listeners: Vec<VirtualDeploymentListener>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_logging: Option<AccessLoggingConfiguration>,
    #[serde(default)]
    pub lifecycle_state: ServiceMeshLifecycleState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lifecycle_details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_created: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_updated: Option<DateTime<Utc>>,
    #[serde(default)]
    pub freeform_tags: FreeformTags,
    #[serde(default)]
    pub defined_tags: DefinedTags,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceDiscoveryConfiguration {
    Dns { hostname: String },
    Disabled,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ListenerProtocol {
    Http,
    Http2,
    Grpc,
    Tcp,
    TlsPassthrough,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VirtualDeploymentListener {
    pub protocol: ListenerProtocol,
    pub port: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_in_ms: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idle_timeout_in_ms: Option<i64>,
}

// Route rules shared by both route table kinds

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PathType {
    Prefix,
    #[serde(other)]
    Unknown,
}

// VirtualServiceRouteTable

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VirtualServiceRouteTable {
    #[serde(default)]
    pub id: String,
    pub compartment_id: String,
    pub virtual_service_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
    #[serde(default)]
    pub route_rules: Vec<VirtualServiceTrafficRouteRule>,
    #[serde(default)]
    pub lifecycle_state: ServiceMeshLifecycleState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lifecycle_details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_created: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_updated: Option<DateTime<Utc>>,
    #[serde(default)]
    pub freeform_tags: FreeformTags,
    #[serde(default)]
    pub defined_tags: DefinedTags,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum VirtualServiceTrafficRouteRule {
    #[serde(rename = "HTTP")]
    Http(HttpVirtualServiceTrafficRouteRule),
    #[serde(rename = "TCP")]
    Tcp(TcpVirtualServiceTrafficRouteRule),
    #[serde(rename = "TLS_PASSTHROUGH")]
    TlsPassthrough(TlsPassthroughVirtualServiceTrafficRouteRule),
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HttpVirtualServiceTrafficRouteRule {
    pub destinations: Vec<VirtualDeploymentTrafficRuleTarget>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path_type: Option<PathType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_grpc: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_in_ms: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TcpVirtualServiceTrafficRouteRule {
    pub destinations: Vec<VirtualDeploymentTrafficRuleTarget>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TlsPassthroughVirtualServiceTrafficRouteRule {
    pub destinations: Vec<VirtualDeploymentTrafficRuleTarget>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VirtualDeploymentTrafficRuleTarget {
    pub virtual_deployment_id: String,
    pub weight: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<i32>,
}

// IngressGateway

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IngressGateway {
    #[serde(default)]
    pub id: String,
    pub compartment_id: String,
    pub mesh_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub hosts: Vec<IngressGatewayHost>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_logging: Option<AccessLoggingConfiguration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mtls: Option<IngressGatewayMutualTransportLayerSecurity>,
    #[serde(default)]
    pub lifecycle_state: ServiceMeshLifecycleState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lifecycle_details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_created: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_updated: Option<DateTime<Utc>>,
    #[serde(default)]
    pub freeform_tags: FreeformTags,
    #[serde(default)]
    pub defined_tags: DefinedTags,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct IngressGatewayHost {
    pub name: String,
    #[serde(default)]
    pub hostnames: Vec<String>,
    pub listeners: Vec<IngressGatewayListener>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IngressGatewayListenerProtocol {
    Http,
    TlsPassthrough,
    Tcp,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct IngressGatewayListener {
    pub protocol: IngressGatewayListenerProtocol,
    pub port: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls: Option<IngressListenerTlsConfig>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IngressListenerTlsMode {
    Disabled,
    Permissive,
    Tls,
    MutualTls,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct IngressListenerTlsConfig {
    pub mode: IngressListenerTlsMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_certificate: Option<TlsCertificate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_validation: Option<IngressListenerClientValidationConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum TlsCertificate {
    #[serde(rename = "OCI_CERTIFICATE")]
    OciCertificate(OciTlsCertificate),
    #[serde(rename = "LOCAL_FILE")]
    LocalFile(LocalFileSource),
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OciTlsCertificate {
    pub certificate_id: String,
}

/// Certificate material mounted from a Kubernetes secret on the gateway pods
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LocalFileSource {
    pub secret_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct IngressListenerClientValidationConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trusted_ca_bundle: Option<CaBundle>,
    #[serde(default)]
    pub subject_alternate_names: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum CaBundle {
    #[serde(rename = "OCI_CA_BUNDLE")]
    OciCaBundle(OciCaBundle),
    #[serde(rename = "LOCAL_FILE")]
    LocalFile(LocalFileSource),
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OciCaBundle {
    pub ca_bundle_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct IngressGatewayMutualTransportLayerSecurity {
    pub maximum_validity: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate_id: Option<String>,
}

// IngressGatewayRouteTable

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IngressGatewayRouteTable {
    #[serde(default)]
    pub id: String,
    pub compartment_id: String,
    pub ingress_gateway_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
    #[serde(default)]
    pub route_rules: Vec<IngressGatewayTrafficRouteRule>,
    #[serde(default)]
    pub lifecycle_state: ServiceMeshLifecycleState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lifecycle_details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_created: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_updated: Option<DateTime<Utc>>,
    #[serde(default)]
    pub freeform_tags: FreeformTags,
    #[serde(default)]
    pub defined_tags: DefinedTags,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum IngressGatewayTrafficRouteRule {
    #[serde(rename = "HTTP")]
    Http(HttpIngressGatewayTrafficRouteRule),
    #[serde(rename = "TCP")]
    Tcp(TcpIngressGatewayTrafficRouteRule),
    #[serde(rename = "TLS_PASSTHROUGH")]
    TlsPassthrough(TlsPassthroughIngressGatewayTrafficRouteRule),
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct IngressGatewayHostRef {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HttpIngressGatewayTrafficRouteRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingress_gateway_host: Option<IngressGatewayHostRef>,
    pub destinations: Vec<VirtualServiceTrafficRuleTarget>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path_type: Option<PathType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_grpc: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_host_rewrite_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_path_rewrite_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_in_ms: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TcpIngressGatewayTrafficRouteRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingress_gateway_host: Option<IngressGatewayHostRef>,
    pub destinations: Vec<VirtualServiceTrafficRuleTarget>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TlsPassthroughIngressGatewayTrafficRouteRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingress_gateway_host: Option<IngressGatewayHostRef>,
    pub destinations: Vec<VirtualServiceTrafficRuleTarget>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VirtualServiceTrafficRuleTarget {
    pub virtual_service_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<i32>,
}

// AccessPolicy

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AccessPolicy {
    #[serde(default)]
    pub id: String,
    pub compartment_id: String,
    pub mesh_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub rules: Vec<AccessPolicyRule>,
    #[serde(default)]
    pub lifecycle_state: ServiceMeshLifecycleState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lifecycle_details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_created: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_updated: Option<DateTime<Utc>>,
    #[serde(default)]
    pub freeform_tags: FreeformTags,
    #[serde(default)]
    pub defined_tags: DefinedTags,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccessPolicyAction {
    Allow,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AccessPolicyRule {
    pub action: AccessPolicyAction,
    pub source: AccessPolicyTarget,
    pub destination: AccessPolicyTarget,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum AccessPolicyTarget {
    #[serde(rename = "ALL_VIRTUAL_SERVICES")]
    AllVirtualServices,
    #[serde(rename = "VIRTUAL_SERVICE")]
    VirtualService(VirtualServiceAccessPolicyTarget),
    #[serde(rename = "INGRESS_GATEWAY")]
    IngressGateway(IngressGatewayAccessPolicyTarget),
    #[serde(rename = "EXTERNAL_SERVICE")]
    ExternalService(ExternalServiceAccessPolicyTarget),
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VirtualServiceAccessPolicyTarget {
    pub virtual_service_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct IngressGatewayAccessPolicyTarget {
    pub ingress_gateway_id: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExternalServiceProtocol {
    Http,
    Https,
    Tcp,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExternalServiceAccessPolicyTarget {
    #[serde(default)]
    pub hostnames: Vec<String>,
    #[serde(default)]
    pub ip_addresses: Vec<String>,
    #[serde(default)]
    pub ports: Vec<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<ExternalServiceProtocol>,
}

remote_resource!(Mesh, ServiceMeshLifecycleState);
remote_resource!(VirtualService, ServiceMeshLifecycleState);
remote_resource!(VirtualDeployment, ServiceMeshLifecycleState);
remote_resource!(VirtualServiceRouteTable, ServiceMeshLifecycleState);
remote_resource!(IngressGateway, ServiceMeshLifecycleState);
remote_resource!(IngressGatewayRouteTable, ServiceMeshLifecycleState);
remote_resource!(AccessPolicy, ServiceMeshLifecycleState);
