//! MySqlDbSystem Custom Resource Definition

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::common::{DefinedTags, FreeformTags, Port, SecretSource};
use crate::status::ResourceStatus;

/// MySqlDbSystemSpec defines a MySQL DB system to create, or an existing one to bind
#[derive(CustomResource, Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[kube(
    group = "oci.oracle.com",
    version = "v1beta1",
    kind = "MySqlDbSystem",
    namespaced,
    status = "ResourceStatus",
    shortname = "mysqldbsystem",
    printcolumn = r#"{"name":"Active","type":"string","jsonPath":".status.conditions[?(@.type==\"Active\")].status"}"#,
    printcolumn = r#"{"name":"Age","type":"date","jsonPath":".metadata.creationTimestamp"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct MySqlDbSystemSpec {
    /// OCID of an existing DB system to bind instead of creating one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub compartment_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub shape_name: String,

    pub subnet_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability_domain: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fault_domain: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configuration_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mysql_version: Option<String>,

    /// Secret whose `username` key holds the admin user name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_username: Option<SecretSource>,

    /// Secret whose `password` key holds the admin password
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_password: Option<SecretSource>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_storage_size_in_gbs: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname_label: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<Port>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port_x: Option<Port>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_highly_available: Option<bool>,

    #[serde(default, skip_serializing_if = "FreeformTags::is_empty")]
    pub freeform_tags: FreeformTags,

    #[serde(default, skip_serializing_if = "DefinedTags::is_empty")]
    pub defined_tags: DefinedTags,
}

crate::managed_resource!(MySqlDbSystem, name = display_name, bound = id);
