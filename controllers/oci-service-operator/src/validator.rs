//! Readiness checks used by the service manager and the resolver.
//!
//! `validate_k8s` decides whether a local custom resource can be depended
//! upon. `validate_cp` maps a remote lifecycle state onto the
//! retryable/terminal split.

use crds::{ConditionStatus, ConditionType, ResourceStatus};
use oci_client::{LifecyclePhase, RemoteResource};

use crate::error::ServiceManagerError;

/// A resource is ready to be depended upon when it carries all three
/// conditions and every one of them is `True`.
///
/// A resource that has not been reconciled yet gets a generic message; one
/// with a full condition set gets a message naming the failing condition.
pub fn validate_k8s(
    kind: &str,
    key: &str,
    status: Option<&ResourceStatus>,
) -> Result<(), ServiceManagerError> {
    let conditions = status.map(|s| s.conditions.as_slice()).unwrap_or_default();

    if conditions.len() != ConditionType::ALL.len() {
        return Err(ServiceManagerError::requeue(format!(
            "{kind} {key} dependencies not yet satisfied"
        )));
    }

    match conditions
        .iter()
        .find(|c| c.status != ConditionStatus::True)
    {
        Some(condition) => Err(ServiceManagerError::requeue(format!(
            "{kind} {key} is not ready: {} is {:?}",
            condition.condition_type, condition.status
        ))),
        None => Ok(()),
    }
}

/// `Active` passes, `Deleted`/`Failed`/`Stopped` are terminal, anything else is retried
pub fn validate_cp<S: RemoteResource>(kind: &str, sdk: &S) -> Result<(), ServiceManagerError> {
    match sdk.lifecycle_phase() {
        LifecyclePhase::Active => Ok(()),
        LifecyclePhase::Deleted | LifecyclePhase::Failed => {
            Err(ServiceManagerError::terminal(format!(
                "{kind} {} is in terminal state {}",
                sdk.id(),
                sdk.lifecycle_state_name()
            )))
        }
        LifecyclePhase::Stopped => Err(ServiceManagerError::terminal(format!(
            "{kind} {} is stopped ({}); start it to resume reconciliation",
            sdk.id(),
            sdk.lifecycle_state_name()
        ))),
        LifecyclePhase::Transitional => Err(ServiceManagerError::requeue(format!(
            "{kind} {} has unknown status {}",
            sdk.id(),
            sdk.lifecycle_state_name()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crds::ResourceCondition;
    use oci_client::models::database::{AutonomousDatabase, AutonomousDatabaseLifecycleState};
    use oci_client::models::servicemesh::{Mesh, ServiceMeshLifecycleState};

    fn condition(condition_type: ConditionType, status: ConditionStatus) -> ResourceCondition {
        ResourceCondition {
            condition_type,
            status,
            observed_generation: 1,
            reason: String::new(),
            message: String::new(),
            last_transition_time: None,
        }
    }

    fn status_with(conditions: Vec<ResourceCondition>) -> ResourceStatus {
        ResourceStatus {
            conditions,
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_status_is_generic() {
        let err = validate_k8s("Mesh", "ns/m", None).unwrap_err();
        assert_eq!(err.to_string(), "Mesh ns/m dependencies not yet satisfied");
        assert!(err.is_retryable());
    }

    #[test]
    fn test_partial_conditions_are_generic() {
        for count in 0..3 {
            let conditions = ConditionType::ALL
                .iter()
                .take(count)
                .map(|t| condition(*t, ConditionStatus::True))
                .collect();
            let status = status_with(conditions);
            let err = validate_k8s("VirtualService", "ns/vs", Some(&status)).unwrap_err();
            assert_eq!(
                err.to_string(),
                "VirtualService ns/vs dependencies not yet satisfied"
            );
        }
    }

    #[test]
    fn test_failing_condition_is_named() {
        let status = status_with(vec![
            condition(ConditionType::DependenciesActive, ConditionStatus::True),
            condition(ConditionType::Active, ConditionStatus::Unknown),
            condition(ConditionType::Configured, ConditionStatus::True),
        ]);
        let err = validate_k8s("Mesh", "ns/m", Some(&status)).unwrap_err();
        assert_eq!(err.to_string(), "Mesh ns/m is not ready: Active is Unknown");

        let status = status_with(vec![
            condition(ConditionType::DependenciesActive, ConditionStatus::True),
            condition(ConditionType::Active, ConditionStatus::True),
            condition(ConditionType::Configured, ConditionStatus::False),
        ]);
        let err = validate_k8s("Mesh", "ns/m", Some(&status)).unwrap_err();
        assert!(err.to_string().contains("Configured is False"));
    }

    #[test]
    fn test_all_true_is_ready() {
        let status = status_with(
            ConditionType::ALL
                .iter()
                .map(|t| condition(*t, ConditionStatus::True))
                .collect(),
        );
        assert!(validate_k8s("Mesh", "ns/m", Some(&status)).is_ok());
    }

    fn mesh_in(state: ServiceMeshLifecycleState) -> Mesh {
        Mesh {
            id: "ocid1.mesh.oc1..a".to_string(),
            lifecycle_state: state,
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_cp_active() {
        assert!(validate_cp("Mesh", &mesh_in(ServiceMeshLifecycleState::Active)).is_ok());
    }

    #[test]
    fn test_validate_cp_terminal_states() {
        for state in [
            ServiceMeshLifecycleState::Failed,
            ServiceMeshLifecycleState::Deleted,
        ] {
            let err = validate_cp("Mesh", &mesh_in(state)).unwrap_err();
            assert!(!err.is_retryable(), "{state:?} must not requeue");
        }
    }

    #[test]
    fn test_validate_cp_transitional_states() {
        for state in [
            ServiceMeshLifecycleState::Creating,
            ServiceMeshLifecycleState::Updating,
            ServiceMeshLifecycleState::Deleting,
            ServiceMeshLifecycleState::Unknown,
        ] {
            let err = validate_cp("Mesh", &mesh_in(state)).unwrap_err();
            assert!(err.is_retryable(), "{state:?} must requeue");
            assert!(err.to_string().contains("unknown status"));
        }
    }

    #[test]
    fn test_validate_cp_stopped_database_waits() {
        let adb = AutonomousDatabase {
            id: "ocid1.autonomousdatabase.oc1..a".to_string(),
            lifecycle_state: AutonomousDatabaseLifecycleState::Stopped,
            ..Default::default()
        };
        let err = validate_cp("AutonomousDatabases", &adb).unwrap_err();
        assert!(!err.is_retryable());
        assert_eq!(
            err.to_string(),
            "AutonomousDatabases ocid1.autonomousdatabase.oc1..a is stopped (STOPPED); start it to resume reconciliation"
        );

        let starting = AutonomousDatabase {
            lifecycle_state: AutonomousDatabaseLifecycleState::Starting,
            ..adb
        };
        assert!(validate_cp("AutonomousDatabases", &starting).unwrap_err().is_retryable());
    }
}
