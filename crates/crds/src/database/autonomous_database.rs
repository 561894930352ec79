//! AutonomousDatabases Custom Resource Definition

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::common::{DefinedTags, FreeformTags, SecretSource};
use crate::status::ResourceStatus;

/// AutonomousDatabasesSpec defines an Autonomous Database to create, or an existing one to bind
#[derive(CustomResource, Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[kube(
    group = "oci.oracle.com",
    version = "v1beta1",
    kind = "AutonomousDatabases",
    plural = "autonomousdatabases",
    namespaced,
    status = "ResourceStatus",
    shortname = "adb",
    printcolumn = r#"{"name":"DbName","type":"string","jsonPath":".spec.dbName"}"#,
    printcolumn = r#"{"name":"Active","type":"string","jsonPath":".status.conditions[?(@.type==\"Active\")].status"}"#,
    printcolumn = r#"{"name":"Age","type":"date","jsonPath":".metadata.creationTimestamp"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct AutonomousDatabasesSpec {
    /// OCID of an existing database to bind instead of creating one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub compartment_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    /// Database name (create-only)
    pub db_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub db_workload: Option<DbWorkload>,

    #[serde(default)]
    pub is_dedicated: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub db_version: Option<String>,

    pub data_storage_size_in_tbs: i32,

    pub cpu_core_count: i32,

    /// Secret whose `password` key holds the ADMIN password
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_password: Option<SecretSource>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_auto_scaling_enabled: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_free_tier: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license_model: Option<LicenseModel>,

    #[serde(default, skip_serializing_if = "FreeformTags::is_empty")]
    pub freeform_tags: FreeformTags,

    #[serde(default, skip_serializing_if = "DefinedTags::is_empty")]
    pub defined_tags: DefinedTags,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DbWorkload {
    Oltp,
    Dw,
    Ajd,
    Apex,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LicenseModel {
    LicenseIncluded,
    BringYourOwnLicense,
}

crate::managed_resource!(AutonomousDatabases, name = display_name, bound = id);
