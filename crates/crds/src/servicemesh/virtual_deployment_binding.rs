//! VirtualDeploymentBinding Custom Resource Definition
//!
//! Binds a Kubernetes service's pods to a virtual deployment. The binding has
//! no remote counterpart; the operator only reads it to decide whether a
//! virtual deployment is still in use.

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::references::{RefOrId, ResourceRef};
use crate::status::ResourceStatus;

#[derive(CustomResource, Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[kube(
    group = "servicemesh.oci.oracle.com",
    version = "v1beta1",
    kind = "VirtualDeploymentBinding",
    namespaced,
    status = "ResourceStatus"
)]
#[serde(rename_all = "camelCase")]
pub struct VirtualDeploymentBindingSpec {
    pub virtual_deployment: RefOrId,

    pub target: BindingTarget,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BindingTarget {
    pub service: BindingService,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BindingService {
    #[serde(rename = "ref")]
    pub service_ref: ResourceRef,
}
