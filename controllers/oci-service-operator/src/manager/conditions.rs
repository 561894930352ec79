//! Condition setters.
//!
//! Each reconcile step owns one condition type and reports its outcome
//! through [`set_condition`].

use chrono::Utc;
use crds::{ConditionStatus, ConditionType, ResourceCondition, ResourceStatus};

use crate::error::ServiceManagerError;

pub const REASON_SUCCESSFUL: &str = "Successful";
pub const REASON_REQUEUE_ON_ERROR: &str = "RequeueOnError";
pub const REASON_DO_NOT_REQUEUE: &str = "DoNotRequeue";

fn success_message(condition_type: ConditionType) -> &'static str {
    match condition_type {
        ConditionType::DependenciesActive => "DependenciesResolved",
        ConditionType::Active => "ResourceActive",
        ConditionType::Configured => "ResourceConfigured",
    }
}

/// `(status, reason, message)` for the outcome of a step
pub fn condition_outcome(
    condition_type: ConditionType,
    error: Option<&ServiceManagerError>,
) -> (ConditionStatus, String, String) {
    let Some(error) = error else {
        return (
            ConditionStatus::True,
            REASON_SUCCESSFUL.to_string(),
            success_message(condition_type).to_string(),
        );
    };

    let status = if error.is_retryable() {
        ConditionStatus::Unknown
    } else {
        ConditionStatus::False
    };

    if let ServiceManagerError::Remote(remote) = error {
        if let Some(reason) = remote.reason() {
            let message = remote
                .service_message()
                .unwrap_or_else(|| remote.to_string());
            return (status, reason, message);
        }
    }

    let reason = if error.is_retryable() {
        REASON_REQUEUE_ON_ERROR
    } else {
        REASON_DO_NOT_REQUEUE
    };
    (status, reason.to_string(), error.to_string())
}

/// Replace the condition of `condition_type` with the outcome of a step.
///
/// The transition time only moves when the condition status changes.
pub fn set_condition(
    status: &mut ResourceStatus,
    condition_type: ConditionType,
    error: Option<&ServiceManagerError>,
    generation: i64,
) {
    let (condition_status, reason, message) = condition_outcome(condition_type, error);

    match status
        .conditions
        .iter_mut()
        .find(|c| c.condition_type == condition_type)
    {
        Some(existing) => {
            if existing.status != condition_status || existing.last_transition_time.is_none() {
                existing.last_transition_time = Some(Utc::now());
            }
            existing.status = condition_status;
            existing.observed_generation = generation;
            existing.reason = reason;
            existing.message = message;
        }
        None => status.conditions.push(ResourceCondition {
            condition_type,
            status: condition_status,
            observed_generation: generation,
            reason,
            message,
            last_transition_time: Some(Utc::now()),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConversionError;
    use oci_client::OciError;

    #[test]
    fn test_success_sets_true() {
        let mut status = ResourceStatus::default();
        set_condition(&mut status, ConditionType::DependenciesActive, None, 3);

        let condition = status.condition(ConditionType::DependenciesActive).unwrap();
        assert_eq!(condition.status, ConditionStatus::True);
        assert_eq!(condition.reason, "Successful");
        assert_eq!(condition.message, "DependenciesResolved");
        assert_eq!(condition.observed_generation, 3);
        assert!(condition.last_transition_time.is_some());
    }

    #[test]
    fn test_remote_error_uses_http_reason() {
        let err = ServiceManagerError::from(OciError::service(
            400,
            "InvalidParameter",
            "bad name",
            Some("req-1".to_string()),
        ));
        let (status, reason, message) = condition_outcome(ConditionType::Configured, Some(&err));
        assert_eq!(status, ConditionStatus::False);
        assert_eq!(reason, "BadRequest");
        assert_eq!(message, "bad name (opc-request-id: req-1)");

        let err = ServiceManagerError::from(OciError::service(429, "TooManyRequests", "slow", None));
        let (status, reason, _) = condition_outcome(ConditionType::Configured, Some(&err));
        assert_eq!(status, ConditionStatus::Unknown);
        assert_eq!(reason, "TooManyRequests");
    }

    #[test]
    fn test_local_errors() {
        let err = ServiceManagerError::requeue("Mesh ns/m dependencies not yet satisfied");
        let (status, reason, message) =
            condition_outcome(ConditionType::DependenciesActive, Some(&err));
        assert_eq!(status, ConditionStatus::Unknown);
        assert_eq!(reason, "RequeueOnError");
        assert_eq!(message, "Mesh ns/m dependencies not yet satisfied");

        let err = ServiceManagerError::from(ConversionError::UnknownMtlsMode);
        let (status, reason, message) = condition_outcome(ConditionType::Configured, Some(&err));
        assert_eq!(status, ConditionStatus::False);
        assert_eq!(reason, "DoNotRequeue");
        assert_eq!(message, "unknown mtls mode");
    }

    #[test]
    fn test_replace_keeps_one_condition_per_type() {
        let mut status = ResourceStatus::default();
        for condition_type in ConditionType::ALL {
            set_condition(&mut status, condition_type, None, 1);
        }
        let err = ServiceManagerError::requeue("not yet");
        set_condition(&mut status, ConditionType::Active, Some(&err), 2);

        assert_eq!(status.conditions.len(), 3);
        let active = status.condition(ConditionType::Active).unwrap();
        assert_eq!(active.status, ConditionStatus::Unknown);
        assert_eq!(active.observed_generation, 2);
        // the other conditions keep the generation they were computed from
        let configured = status.condition(ConditionType::Configured).unwrap();
        assert_eq!(configured.observed_generation, 1);
    }

    #[test]
    fn test_transition_time_only_moves_on_status_change() {
        let mut status = ResourceStatus::default();
        set_condition(&mut status, ConditionType::Active, None, 1);
        let first = status.condition(ConditionType::Active).unwrap().last_transition_time;

        set_condition(&mut status, ConditionType::Active, None, 2);
        let second = status.condition(ConditionType::Active).unwrap().last_transition_time;
        assert_eq!(first, second);

        let err = ServiceManagerError::terminal("failed");
        set_condition(&mut status, ConditionType::Active, Some(&err), 3);
        let third = status.condition(ConditionType::Active).unwrap();
        assert_eq!(third.status, ConditionStatus::False);
        assert!(third.last_transition_time >= first);
    }
}
