//! MySQL Database Service API models (`/20190415`)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{remote_resource, DefinedTags, FreeformTags, LifecyclePhase};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DbSystemLifecycleState {
    #[default]
    Creating,
    Active,
    Inactive,
    Updating,
    Deleting,
    Deleted,
    Failed,
    #[serde(other)]
    Unknown,
}

impl DbSystemLifecycleState {
    pub fn phase(self) -> LifecyclePhase {
        match self {
            DbSystemLifecycleState::Active => LifecyclePhase::Active,
            DbSystemLifecycleState::Inactive => LifecyclePhase::Stopped,
            DbSystemLifecycleState::Deleted => LifecyclePhase::Deleted,
            DbSystemLifecycleState::Failed => LifecyclePhase::Failed,
            _ => LifecyclePhase::Transitional,
        }
    }

    pub fn from_phase(phase: LifecyclePhase) -> Self {
        match phase {
            LifecyclePhase::Active => DbSystemLifecycleState::Active,
            LifecyclePhase::Transitional => DbSystemLifecycleState::Creating,
            LifecyclePhase::Stopped => DbSystemLifecycleState::Inactive,
            LifecyclePhase::Deleted => DbSystemLifecycleState::Deleted,
            LifecyclePhase::Failed => DbSystemLifecycleState::Failed,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DbSystem {
    #[serde(default)]
    pub id: String,
    pub compartment_id: String,
    #[serde(default)]
    pub display_name: String,
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
    /// Write-only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_username: Option<String>,
    /// Write-only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_storage_size_in_gbs: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port_x: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_highly_available: Option<bool>,
    #[serde(default)]
    pub lifecycle_state: DbSystemLifecycleState,
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

remote_resource!(DbSystem, DbSystemLifecycleState);
