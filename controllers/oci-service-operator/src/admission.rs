//! Admission checks.
//!
//! The entry points an admission webhook calls before an object is stored.
//! They work on the raw `spec` JSON so that malformed references can be
//! rejected with a precise message instead of a generic decode error.
//! Serving the webhook itself happens elsewhere.

use std::sync::Arc;

use crds::{RefOrId, RefOrIdFields, VirtualDeployment};
use oci_client::ServiceMeshClient;
use serde_json::Value;
use tracing::debug;

use crate::error::ServiceManagerError;
use crate::handlers::VirtualDeploymentHandler;
use crate::manager::{CustomResourceHandler, ResolvedRef};
use crate::resolver::Resolver;

/// Outcome of an admission check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdmissionResponse {
    pub allowed: bool,
    pub message: Option<String>,
}

impl AdmissionResponse {
    pub fn allow() -> Self {
        Self {
            allowed: true,
            message: None,
        }
    }

    pub fn deny(message: impl Into<String>) -> Self {
        Self {
            allowed: false,
            message: Some(message.into()),
        }
    }
}

/// Kinds a reference can point at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    Mesh,
    VirtualService,
    VirtualDeployment,
    IngressGateway,
}

impl ReferenceKind {
    /// Lower-case name used in admission messages
    pub fn label(self) -> &'static str {
        match self {
            ReferenceKind::Mesh => "mesh",
            ReferenceKind::VirtualService => "virtual service",
            ReferenceKind::VirtualDeployment => "virtual deployment",
            ReferenceKind::IngressGateway => "ingress gateway",
        }
    }
}

/// Reference-bearing fields of one kind. A `*` path segment matches every
/// array element or object value.
struct KindRules {
    parent: Option<(&'static str, ReferenceKind)>,
    /// Whether `spec.name` is fixed once set
    immutable_name: bool,
    references: &'static [&'static [&'static str]],
}

fn rules_for(kind: &str) -> Option<KindRules> {
    let rules = match kind {
        "Mesh" => KindRules {
            parent: None,
            immutable_name: false,
            references: &[],
        },
        "VirtualService" => KindRules {
            parent: Some(("mesh", ReferenceKind::Mesh)),
            immutable_name: true,
            references: &[],
        },
        "VirtualDeployment" => KindRules {
            parent: Some(("virtualService", ReferenceKind::VirtualService)),
            immutable_name: true,
            references: &[],
        },
        "VirtualServiceRouteTable" => KindRules {
            parent: Some(("virtualService", ReferenceKind::VirtualService)),
            immutable_name: true,
            references: &[&["routeRules", "*", "*", "destinations", "*", "virtualDeployment"]],
        },
        "IngressGateway" => KindRules {
            parent: Some(("mesh", ReferenceKind::Mesh)),
            immutable_name: true,
            references: &[],
        },
        "IngressGatewayRouteTable" => KindRules {
            parent: Some(("ingressGateway", ReferenceKind::IngressGateway)),
            immutable_name: true,
            references: &[&["routeRules", "*", "*", "destinations", "*", "virtualService"]],
        },
        "AccessPolicy" => KindRules {
            parent: Some(("mesh", ReferenceKind::Mesh)),
            immutable_name: true,
            references: &[
                &["rules", "*", "source", "virtualService"],
                &["rules", "*", "source", "ingressGateway"],
                &["rules", "*", "destination", "virtualService"],
                &["rules", "*", "destination", "ingressGateway"],
            ],
        },
        "VirtualDeploymentBinding" => KindRules {
            parent: None,
            immutable_name: false,
            references: &[&["virtualDeployment"]],
        },
        "Stream" => KindRules {
            parent: None,
            immutable_name: true,
            references: &[],
        },
        _ => return None,
    };
    Some(rules)
}

/// Every value found at `path` below `value`
fn select<'a>(value: &'a Value, path: &[&str]) -> Vec<&'a Value> {
    let Some((head, rest)) = path.split_first() else {
        return vec![value];
    };
    let children: Vec<&Value> = match (*head, value) {
        ("*", Value::Array(items)) => items.iter().collect(),
        ("*", Value::Object(fields)) => fields.values().collect(),
        (field, Value::Object(fields)) => fields.get(field).into_iter().collect(),
        _ => Vec::new(),
    };
    children
        .into_iter()
        .flat_map(|child| select(child, rest))
        .collect()
}

fn decode_reference(value: &Value) -> Result<RefOrId, String> {
    let fields: RefOrIdFields =
        serde_json::from_value(value.clone()).map_err(|e| format!("invalid reference: {e}"))?;
    RefOrId::try_from(fields).map_err(|e| e.to_string())
}

/// Whether two references name the same object once the default namespace is applied
fn same_target(old: &RefOrId, new: &RefOrId, namespace: &str) -> bool {
    match (old, new) {
        (RefOrId::Ref(old), RefOrId::Ref(new)) => old.key(namespace) == new.key(namespace),
        (RefOrId::Id(old), RefOrId::Id(new)) => old == new,
        _ => false,
    }
}

fn check_references(rules: &KindRules, spec: &Value) -> Result<(), String> {
    if let Some((field, _)) = rules.parent {
        match spec.get(field) {
            Some(value) => {
                decode_reference(value)?;
            }
            None => return Err(crds::RefOrIdError::NeitherSet.to_string()),
        }
    }
    for path in rules.references {
        for value in select(spec, path) {
            decode_reference(value)?;
        }
    }
    Ok(())
}

fn spec_name(spec: &Value) -> Option<&str> {
    spec.get("name")
        .and_then(Value::as_str)
        .filter(|name| !name.is_empty())
}

/// Validation entry points for admission webhooks
pub struct AdmissionValidator {
    resolver: Arc<dyn Resolver>,
    virtual_deployments: VirtualDeploymentHandler,
}

impl std::fmt::Debug for AdmissionValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdmissionValidator").finish_non_exhaustive()
    }
}

impl AdmissionValidator {
    pub fn new(service_mesh: Arc<dyn ServiceMeshClient>, resolver: Arc<dyn Resolver>) -> Self {
        Self {
            virtual_deployments: VirtualDeploymentHandler::new(service_mesh, Arc::clone(&resolver)),
            resolver,
        }
    }

    pub fn validate_on_create(&self, kind: &str, spec: &Value) -> AdmissionResponse {
        let Some(rules) = rules_for(kind) else {
            return AdmissionResponse::allow();
        };
        match check_references(&rules, spec) {
            Ok(()) => AdmissionResponse::allow(),
            Err(message) => {
                debug!("Rejecting {} create: {}", kind, message);
                AdmissionResponse::deny(message)
            }
        }
    }

    /// `namespace` is the namespace of the object being updated
    pub fn validate_on_update(
        &self,
        kind: &str,
        namespace: &str,
        old_spec: &Value,
        new_spec: &Value,
    ) -> AdmissionResponse {
        let Some(rules) = rules_for(kind) else {
            return AdmissionResponse::allow();
        };
        if let Err(message) = check_references(&rules, new_spec) {
            debug!("Rejecting {} update: {}", kind, message);
            return AdmissionResponse::deny(message);
        }

        if let Some((field, parent)) = rules.parent {
            let old = old_spec.get(field).map(decode_reference);
            let new = new_spec.get(field).map(decode_reference);
            if let (Some(Ok(old)), Some(Ok(new))) = (old, new) {
                if !same_target(&old, &new, namespace) {
                    return AdmissionResponse::deny(format!("{} reference is immutable", parent.label()));
                }
            }
        }

        if rules.immutable_name {
            if let Some(old_name) = spec_name(old_spec) {
                if spec_name(new_spec) != Some(old_name) {
                    return AdmissionResponse::deny("name is immutable");
                }
            }
        }

        AdmissionResponse::allow()
    }

    /// Deny deleting a virtual deployment that is still referenced
    pub async fn validate_on_delete(&self, vd: &VirtualDeployment) -> AdmissionResponse {
        match self.virtual_deployments.finalize(vd).await {
            Ok(()) => AdmissionResponse::allow(),
            Err(e) => AdmissionResponse::deny(e.to_string()),
        }
    }

    /// Resolve a reference the way the reconciler would
    pub async fn resolve_ref(
        &self,
        kind: ReferenceKind,
        reference: &crds::RefOrId,
        namespace: &str,
    ) -> Result<ResolvedRef, ServiceManagerError> {
        match kind {
            ReferenceKind::Mesh => self.resolver.resolve_mesh(reference, namespace).await,
            ReferenceKind::VirtualService => {
                self.resolver
                    .resolve_virtual_service(reference, namespace)
                    .await
            }
            ReferenceKind::VirtualDeployment => {
                self.resolver
                    .resolve_virtual_deployment(reference, namespace)
                    .await
            }
            ReferenceKind::IngressGateway => {
                self.resolver
                    .resolve_ingress_gateway(reference, namespace)
                    .await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oci_client::MockServiceMeshClient;
    use serde_json::json;

    use crate::test_utils::{virtual_deployment, virtual_deployment_binding, MockResolver};

    fn validator(resolver: MockResolver) -> AdmissionValidator {
        AdmissionValidator::new(Arc::new(MockServiceMeshClient::new()), Arc::new(resolver))
    }

    fn vs_spec(mesh: Value) -> Value {
        json!({"compartmentId": "ocid1.compartment.oc1..test", "mesh": mesh})
    }

    #[test]
    fn test_create_reference_messages() {
        let v = validator(MockResolver::default());
        let both = vs_spec(json!({"ref": {"name": "m"}, "id": "ocid1.mesh"}));
        assert_eq!(
            v.validate_on_create("VirtualService", &both),
            AdmissionResponse::deny("spec contains both ref and id")
        );
        assert_eq!(
            v.validate_on_create("VirtualService", &vs_spec(json!({}))),
            AdmissionResponse::deny("spec has neither ref nor id")
        );
        assert!(v.validate_on_create("VirtualService", &vs_spec(json!({"id": "ocid1.mesh"}))).allowed);
    }

    #[test]
    fn test_nested_destinations_are_checked() {
        let v = validator(MockResolver::default());
        let spec = json!({
            "compartmentId": "c",
            "virtualService": {"ref": {"name": "reviews"}},
            "routeRules": [
                {"tcpRoute": {"destinations": [{"virtualDeployment": {"ref": {"name": "v1"}}, "weight": 50}]}},
                {"tcpRoute": {"destinations": [{"virtualDeployment": {}, "weight": 50}]}}
            ]
        });
        assert_eq!(
            v.validate_on_create("VirtualServiceRouteTable", &spec),
            AdmissionResponse::deny("spec has neither ref nor id")
        );
    }

    #[test]
    fn test_parent_reference_is_immutable() {
        let v = validator(MockResolver::default());
        let old = vs_spec(json!({"ref": {"name": "m"}}));
        let new = vs_spec(json!({"ref": {"name": "other"}}));
        assert_eq!(
            v.validate_on_update("VirtualService", "apps", &old, &new),
            AdmissionResponse::deny("mesh reference is immutable")
        );

        let old = json!({"compartmentId": "c", "ingressGateway": {"id": "ocid1.ig.a"}, "routeRules": []});
        let new = json!({"compartmentId": "c", "ingressGateway": {"id": "ocid1.ig.b"}, "routeRules": []});
        assert_eq!(
            v.validate_on_update("IngressGatewayRouteTable", "apps", &old, &new),
            AdmissionResponse::deny("ingress gateway reference is immutable")
        );
    }

    #[test]
    fn test_parent_reference_in_own_namespace_is_unchanged() {
        let v = validator(MockResolver::default());
        let old = vs_spec(json!({"ref": {"name": "m"}}));
        let new = vs_spec(json!({"ref": {"namespace": "apps", "name": "m"}}));
        assert!(v.validate_on_update("VirtualService", "apps", &old, &new).allowed);

        let moved = vs_spec(json!({"ref": {"namespace": "shared", "name": "m"}}));
        assert_eq!(
            v.validate_on_update("VirtualService", "apps", &old, &moved),
            AdmissionResponse::deny("mesh reference is immutable")
        );
    }

    #[test]
    fn test_name_is_immutable_once_set() {
        let v = validator(MockResolver::default());
        let mut old = vs_spec(json!({"ref": {"name": "m"}}));
        let mut new = old.clone();
        new["name"] = json!("late-name");
        // setting a name for the first time is fine
        assert!(v.validate_on_update("VirtualService", "apps", &old, &new).allowed);

        old["name"] = json!("reviews");
        assert_eq!(
            v.validate_on_update("VirtualService", "apps", &old, &new),
            AdmissionResponse::deny("name is immutable")
        );
        // mesh display names stay mutable
        let old = json!({"compartmentId": "c", "displayName": "a"});
        let new = json!({"compartmentId": "c", "displayName": "b"});
        assert!(v.validate_on_update("Mesh", "apps", &old, &new).allowed);
    }

    #[test]
    fn test_unknown_kind_is_allowed() {
        let v = validator(MockResolver::default());
        assert!(v.validate_on_create("ConfigMap", &json!({})).allowed);
    }

    #[tokio::test]
    async fn test_delete_of_bound_virtual_deployment_is_denied() {
        let resolver = MockResolver::default();
        resolver.add_binding(virtual_deployment_binding("apps", "b", RefOrId::from_ref("v1")));
        let v = validator(resolver);

        let vd = virtual_deployment("apps", "v1", RefOrId::from_ref("reviews"));
        assert_eq!(
            v.validate_on_delete(&vd).await,
            AdmissionResponse::deny(
                "VirtualDeployment apps/v1 is referenced by VirtualDeploymentBinding apps/b"
            )
        );
        let free = virtual_deployment("apps", "v2", RefOrId::from_ref("reviews"));
        assert!(v.validate_on_delete(&free).await.allowed);
    }

    #[tokio::test]
    async fn test_resolve_ref() {
        let resolver = MockResolver::default();
        resolver.insert("apps/m", ResolvedRef::from_id("ocid1.mesh"));
        let v = validator(resolver);

        let resolved = v
            .resolve_ref(ReferenceKind::Mesh, &RefOrId::from_ref("m"), "apps")
            .await
            .unwrap();
        assert_eq!(resolved.id, "ocid1.mesh");
        assert!(
            v.resolve_ref(ReferenceKind::IngressGateway, &RefOrId::from_ref("ig"), "apps")
                .await
                .is_err()
        );
    }
}
