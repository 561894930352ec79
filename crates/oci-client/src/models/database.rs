//! Autonomous Database API models (`/20160918`)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{remote_resource, DefinedTags, FreeformTags, LifecyclePhase};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AutonomousDatabaseLifecycleState {
    #[default]
    Provisioning,
    Available,
    Stopping,
    Stopped,
    Starting,
    Terminating,
    Terminated,
    Unavailable,
    RestoreInProgress,
    RestoreFailed,
    BackupInProgress,
    ScaleInProgress,
    AvailableNeedsAttention,
    Updating,
    #[serde(other)]
    Unknown,
}

impl AutonomousDatabaseLifecycleState {
    pub fn phase(self) -> LifecyclePhase {
        match self {
            AutonomousDatabaseLifecycleState::Available
            | AutonomousDatabaseLifecycleState::AvailableNeedsAttention => LifecyclePhase::Active,
            AutonomousDatabaseLifecycleState::Stopped => LifecyclePhase::Stopped,
            AutonomousDatabaseLifecycleState::Terminated => LifecyclePhase::Deleted,
            AutonomousDatabaseLifecycleState::Unavailable
            | AutonomousDatabaseLifecycleState::RestoreFailed => LifecyclePhase::Failed,
            _ => LifecyclePhase::Transitional,
        }
    }

    pub fn from_phase(phase: LifecyclePhase) -> Self {
        match phase {
            LifecyclePhase::Active => AutonomousDatabaseLifecycleState::Available,
            LifecyclePhase::Transitional => AutonomousDatabaseLifecycleState::Provisioning,
            LifecyclePhase::Stopped => AutonomousDatabaseLifecycleState::Stopped,
            LifecyclePhase::Deleted => AutonomousDatabaseLifecycleState::Terminated,
            LifecyclePhase::Failed => AutonomousDatabaseLifecycleState::Unavailable,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DbWorkload {
    Oltp,
    Dw,
    Ajd,
    Apex,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LicenseModel {
    LicenseIncluded,
    BringYourOwnLicense,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AutonomousDatabase {
    #[serde(default)]
    pub id: String,
    pub compartment_id: String,
    #[serde(default)]
    pub display_name: String,
    pub db_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub db_workload: Option<DbWorkload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_dedicated: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub db_version: Option<String>,
    #[serde(default)]
    pub data_storage_size_in_tbs: i32,
    #[serde(default)]
    pub cpu_core_count: i32,
    /// Write-only; never returned by the service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_auto_scaling_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_free_tier: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license_model: Option<LicenseModel>,
    #[serde(default)]
    pub lifecycle_state: AutonomousDatabaseLifecycleState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lifecycle_details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub freeform_tags: FreeformTags,
    #[serde(default)]
    pub defined_tags: DefinedTags,
}

remote_resource!(AutonomousDatabase, AutonomousDatabaseLifecycleState, no_time_updated);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RemoteResource;

    #[test]
    fn test_phase_mapping() {
        assert_eq!(
            AutonomousDatabaseLifecycleState::Available.phase(),
            LifecyclePhase::Active
        );
        assert_eq!(
            AutonomousDatabaseLifecycleState::Terminated.phase(),
            LifecyclePhase::Deleted
        );
        assert_eq!(
            AutonomousDatabaseLifecycleState::RestoreFailed.phase(),
            LifecyclePhase::Failed
        );
        assert_eq!(
            AutonomousDatabaseLifecycleState::ScaleInProgress.phase(),
            LifecyclePhase::Transitional
        );
        assert_eq!(
            AutonomousDatabaseLifecycleState::Stopped.phase(),
            LifecyclePhase::Stopped
        );
        assert_eq!(
            AutonomousDatabaseLifecycleState::Starting.phase(),
            LifecyclePhase::Transitional
        );
    }

    #[test]
    fn test_password_not_serialized_when_absent() {
        let adb = AutonomousDatabase {
            id: "ocid1.adb".into(),
            compartment_id: "ocid1.compartment".into(),
            db_name: "orders".into(),
            ..Default::default()
        };
        let value = serde_json::to_value(&adb).unwrap();
        assert!(value.get("adminPassword").is_none());
        assert_eq!(adb.time_updated(), None);
        assert_eq!(adb.lifecycle_state_name(), "PROVISIONING");
    }
}
