//! IngressGateway Custom Resource Definition

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::common::{AccessLogging, DefinedTags, FreeformTags, Port};
use crate::references::RefOrId;
use crate::status::ResourceStatus;

/// IngressGatewaySpec defines the desired state of a mesh ingress gateway
#[derive(CustomResource, Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[kube(
    group = "servicemesh.oci.oracle.com",
    version = "v1beta1",
    kind = "IngressGateway",
    namespaced,
    status = "ResourceStatus",
    printcolumn = r#"{"name":"Active","type":"string","jsonPath":".status.conditions[?(@.type==\"Active\")].status"}"#,
    printcolumn = r#"{"name":"Age","type":"date","jsonPath":".metadata.creationTimestamp"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct IngressGatewaySpec {
    /// Name of the ingress gateway (defaults to `namespace/name`, immutable)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub compartment_id: String,

    /// Parent mesh (immutable)
    pub mesh: RefOrId,

    pub hosts: Vec<IngressGatewayHost>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_logging: Option<AccessLogging>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mtls: Option<IngressGatewayMutualTransportLayerSecurity>,

    #[serde(default, skip_serializing_if = "FreeformTags::is_empty")]
    pub freeform_tags: FreeformTags,

    #[serde(default, skip_serializing_if = "DefinedTags::is_empty")]
    pub defined_tags: DefinedTags,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct IngressGatewayHost {
    /// Host name referenced by route tables
    pub name: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hostnames: Vec<String>,

    pub listeners: Vec<IngressGatewayListener>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IngressGatewayListenerProtocol {
    Http,
    TlsPassthrough,
    Tcp,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct IngressGatewayListener {
    pub protocol: IngressGatewayListenerProtocol,

    pub port: Port,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls: Option<IngressListenerTlsConfig>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IngressListenerTlsMode {
    Disabled,
    Permissive,
    Tls,
    MutualTls,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct IngressListenerTlsConfig {
    pub mode: IngressListenerTlsMode,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_certificate: Option<TlsCertificate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_validation: Option<IngressListenerClientValidationConfig>,
}

/// Source of a listener's server certificate
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum TlsCertificate {
    OciTlsCertificate(OciTlsCertificate),
    KubeSecretTlsCertificate(KubeSecretSource),
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OciTlsCertificate {
    pub certificate_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct KubeSecretSource {
    pub secret_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct IngressListenerClientValidationConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trusted_ca_bundle: Option<CaBundle>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subject_alternate_names: Vec<String>,
}

/// Source of the CA bundle used to validate client certificates
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum CaBundle {
    OciCaBundle(OciCaBundle),
    KubeSecretCaBundle(KubeSecretSource),
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OciCaBundle {
    pub ca_bundle_id: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct IngressGatewayMutualTransportLayerSecurity {
    /// Maximum certificate validity in days
    pub maximum_validity: i32,
}

crate::managed_resource!(IngressGateway, name = name);
