//! OCI control-plane models
//!
//! Mirrors of the remote API objects. Enum fields carry an `Unknown`
//! catch-all so that values added by the service later still decode.

pub mod database;
pub mod mysql;
pub mod servicemesh;
pub mod streaming;

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

pub type FreeformTags = BTreeMap<String, String>;

pub type DefinedTags = BTreeMap<String, BTreeMap<String, serde_json::Value>>;

/// Coarse classification of a remote lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecyclePhase {
    /// Usable
    Active,
    /// Creating, updating, deleting or any other in-between state
    Transitional,
    /// Stopped on purpose; stays that way until someone starts it
    Stopped,
    Deleted,
    Failed,
}

/// Common view over every remote resource
pub trait RemoteResource: Clone + Send + Sync + 'static {
    fn id(&self) -> &str;

    fn compartment_id(&self) -> &str;

    fn lifecycle_phase(&self) -> LifecyclePhase;

    /// Raw lifecycle state as reported by the service
    fn lifecycle_state_name(&self) -> String;

    fn time_updated(&self) -> Option<DateTime<Utc>>;
}

/// Implements [`RemoteResource`] for a model with `id`, `compartment_id`,
/// `lifecycle_state` and an optional `time_updated` field
macro_rules! remote_resource {
    (@impl $model:ty, $state:ty, $time:expr) => {
        impl $crate::models::RemoteResource for $model {
            fn id(&self) -> &str {
                &self.id
            }

            fn compartment_id(&self) -> &str {
                &self.compartment_id
            }

            fn lifecycle_phase(&self) -> $crate::models::LifecyclePhase {
                self.lifecycle_state.phase()
            }

            fn lifecycle_state_name(&self) -> String {
                serde_json::to_value(self.lifecycle_state)
                    .ok()
                    .and_then(|v| v.as_str().map(str::to_string))
                    .unwrap_or_else(|| format!("{:?}", self.lifecycle_state))
            }

            fn time_updated(&self) -> Option<chrono::DateTime<chrono::Utc>> {
                let time: fn(&$model) -> Option<chrono::DateTime<chrono::Utc>> = $time;
                time(self)
            }
        }
    };
    ($model:ty, $state:ty) => {
        remote_resource!(@impl $model, $state, |r: &$model| r.time_updated);
    };
    ($model:ty, $state:ty, no_time_updated) => {
        remote_resource!(@impl $model, $state, |_r: &$model| None);
    };
}

pub(crate) use remote_resource;
