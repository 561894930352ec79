//! Stream Custom Resource Definition

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::common::{DefinedTags, FreeformTags};
use crate::status::ResourceStatus;

/// StreamSpec defines an OCI stream to create, or an existing one to bind
#[derive(CustomResource, Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[kube(
    group = "oci.oracle.com",
    version = "v1beta1",
    kind = "Stream",
    namespaced,
    status = "ResourceStatus",
    printcolumn = r#"{"name":"Partitions","type":"integer","jsonPath":".spec.partitions"}"#,
    printcolumn = r#"{"name":"Active","type":"string","jsonPath":".status.conditions[?(@.type==\"Active\")].status"}"#,
    printcolumn = r#"{"name":"Age","type":"date","jsonPath":".metadata.creationTimestamp"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct StreamSpec {
    /// OCID of an existing stream to bind instead of creating one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Stream name (defaults to `namespace/name`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    pub compartment_id: String,

    /// Number of partitions (create-only)
    pub partitions: i32,

    /// Retention period in hours (create-only, defaults to 24 remotely)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retention_in_hours: Option<i32>,

    /// Stream pool to place the stream in; the compartment's default pool when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream_pool_id: Option<String>,

    #[serde(default, skip_serializing_if = "FreeformTags::is_empty")]
    pub freeform_tags: FreeformTags,

    #[serde(default, skip_serializing_if = "DefinedTags::is_empty")]
    pub defined_tags: DefinedTags,
}

crate::managed_resource!(Stream, name = name, bound = id);
