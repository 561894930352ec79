//! Status shared by every managed OCI custom resource

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Condition types reported on managed resources
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Hash)]
pub enum ConditionType {
    /// Every resource this one depends on is Active
    DependenciesActive,
    /// The remote resource is ACTIVE
    Active,
    /// The last reconcile pass pushed the desired state to the remote API
    Configured,
}

impl ConditionType {
    pub const ALL: [ConditionType; 3] = [
        ConditionType::DependenciesActive,
        ConditionType::Active,
        ConditionType::Configured,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ConditionType::DependenciesActive => "DependenciesActive",
            ConditionType::Active => "Active",
            ConditionType::Configured => "Configured",
        }
    }
}

impl std::fmt::Display for ConditionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Hash)]
pub enum ConditionStatus {
    True,
    False,
    #[default]
    Unknown,
}

/// A single status condition
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ResourceCondition {
    #[serde(rename = "type")]
    pub condition_type: ConditionType,

    pub status: ConditionStatus,

    /// Generation of the spec this condition was computed from
    #[serde(default)]
    pub observed_generation: i64,

    #[serde(default)]
    pub reason: String,

    #[serde(default)]
    pub message: String,

    /// Last time `status` changed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_transition_time: Option<DateTime<Utc>>,
}

/// Status reported on every managed OCI resource
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ResourceStatus {
    /// OCID of the remote resource once created or bound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mesh_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub virtual_service_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub virtual_service_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingress_gateway_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingress_gateway_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub virtual_deployment_id: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<ResourceCondition>,

    /// `time_updated` of the remote resource as last observed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated_time: Option<DateTime<Utc>>,

    /// Idempotency token of an in-flight create
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opc_retry_token: Option<String>,
}

impl ResourceStatus {
    pub fn condition(&self, condition_type: ConditionType) -> Option<&ResourceCondition> {
        self.conditions
            .iter()
            .find(|c| c.condition_type == condition_type)
    }

    /// True when the condition of the given type is present with status True
    pub fn is_condition_true(&self, condition_type: ConditionType) -> bool {
        self.condition(condition_type)
            .is_some_and(|c| c.status == ConditionStatus::True)
    }

    pub fn remote_id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }
}
