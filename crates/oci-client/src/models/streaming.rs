//! Streaming admin API models (`/20180418`)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{remote_resource, DefinedTags, FreeformTags, LifecyclePhase};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StreamLifecycleState {
    #[default]
    Creating,
    Active,
    Updating,
    Deleting,
    Deleted,
    Failed,
    #[serde(other)]
    Unknown,
}

impl StreamLifecycleState {
    pub fn phase(self) -> LifecyclePhase {
        match self {
            StreamLifecycleState::Active => LifecyclePhase::Active,
            StreamLifecycleState::Deleted => LifecyclePhase::Deleted,
            StreamLifecycleState::Failed => LifecyclePhase::Failed,
            _ => LifecyclePhase::Transitional,
        }
    }

    pub fn from_phase(phase: LifecyclePhase) -> Self {
        match phase {
            LifecyclePhase::Active => StreamLifecycleState::Active,
            LifecyclePhase::Transitional => StreamLifecycleState::Creating,
            LifecyclePhase::Deleted => StreamLifecycleState::Deleted,
            // streams cannot be stopped
            LifecyclePhase::Stopped | LifecyclePhase::Failed => StreamLifecycleState::Failed,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Stream {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub compartment_id: String,
    pub partitions: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retention_in_hours: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream_pool_id: Option<String>,
    /// Endpoint for producing and consuming messages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub messages_endpoint: Option<String>,
    #[serde(default)]
    pub lifecycle_state: StreamLifecycleState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lifecycle_state_details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub freeform_tags: FreeformTags,
    #[serde(default)]
    pub defined_tags: DefinedTags,
}

remote_resource!(Stream, StreamLifecycleState, no_time_updated);
