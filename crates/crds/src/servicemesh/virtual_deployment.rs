//! VirtualDeployment Custom Resource Definition

use std::borrow::Cow;

use kube::CustomResource;
use schemars::{JsonSchema, Schema, SchemaGenerator};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::common::{AccessLogging, DefinedTags, FreeformTags, Port};
use crate::references::RefOrId;
use crate::status::ResourceStatus;

/// VirtualDeploymentSpec defines one version of a virtual service's workload
#[derive(CustomResource, Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[kube(
    group = "servicemesh.oci.oracle.com",
    version = "v1beta1",
    kind = "VirtualDeployment",
    namespaced,
    status = "ResourceStatus",
    printcolumn = r#"{"name":"Active","type":"string","jsonPath":".status.conditions[?(@.type==\"Active\")].status"}"#,
    printcolumn = r#"{"name":"Age","type":"date","jsonPath":".metadata.creationTimestamp"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct VirtualDeploymentSpec {
    /// Name of the virtual deployment (defaults to `namespace/name`, immutable)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub compartment_id: String,

    /// Parent virtual service (immutable)
    pub virtual_service: RefOrId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_discovery: Option<ServiceDiscovery>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub listener: Vec<VirtualDeploymentListener>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_logging: Option<AccessLogging>,

    #[serde(default, skip_serializing_if = "FreeformTags::is_empty")]
    pub freeform_tags: FreeformTags,

    #[serde(default, skip_serializing_if = "DefinedTags::is_empty")]
    pub defined_tags: DefinedTags,
}

/// How the mesh finds instances of the deployment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ServiceDiscoveryFields", into = "ServiceDiscoveryFields")]
pub enum ServiceDiscovery {
    Dns { hostname: String },
    Disabled,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceDiscoveryType {
    Dns,
    Disabled,
}

/// Raw wire shape of [`ServiceDiscovery`]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDiscoveryFields {
    #[serde(rename = "type")]
    pub discovery_type: ServiceDiscoveryType,

    /// Required for `DNS`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("DNS service discovery requires a hostname")]
pub struct MissingHostname;

impl TryFrom<ServiceDiscoveryFields> for ServiceDiscovery {
    type Error = MissingHostname;

    fn try_from(fields: ServiceDiscoveryFields) -> Result<Self, Self::Error> {
        match fields.discovery_type {
            ServiceDiscoveryType::Dns => match fields.hostname {
                Some(hostname) if !hostname.is_empty() => Ok(ServiceDiscovery::Dns { hostname }),
                _ => Err(MissingHostname),
            },
            ServiceDiscoveryType::Disabled => Ok(ServiceDiscovery::Disabled),
        }
    }
}

impl From<ServiceDiscovery> for ServiceDiscoveryFields {
    fn from(value: ServiceDiscovery) -> Self {
        match value {
            ServiceDiscovery::Dns { hostname } => ServiceDiscoveryFields {
                discovery_type: ServiceDiscoveryType::Dns,
                hostname: Some(hostname),
            },
            ServiceDiscovery::Disabled => ServiceDiscoveryFields {
                discovery_type: ServiceDiscoveryType::Disabled,
                hostname: None,
            },
        }
    }
}

impl JsonSchema for ServiceDiscovery {
    fn schema_name() -> Cow<'static, str> {
        "ServiceDiscovery".into()
    }

    fn json_schema(generator: &mut SchemaGenerator) -> Schema {
        <ServiceDiscoveryFields as JsonSchema>::json_schema(generator)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ListenerProtocol {
    Http,
    Http2,
    Grpc,
    Tcp,
    TlsPassthrough,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VirtualDeploymentListener {
    pub protocol: ListenerProtocol,

    pub port: Port,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_in_ms: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idle_timeout_in_ms: Option<i64>,
}

crate::managed_resource!(VirtualDeployment, name = name);
