//! VirtualService conversions

use crds::{
    DefaultRoutingPolicy, ManagedResource, RoutingPolicyType, VirtualService,
    VirtualServiceMutualTransportLayerSecurity,
};
use oci_client::models::servicemesh as sdk;

use super::common::{merge_defined_tags, merge_freeform_tags, mtls_mode_from_sdk, mtls_mode_to_sdk};
use crate::error::ConversionError;
use crate::manager::ResolvedDependencies;

pub fn virtual_service_to_sdk(
    vs: &VirtualService,
    base: Option<&sdk::VirtualService>,
    dependencies: &ResolvedDependencies,
) -> Result<sdk::VirtualService, ConversionError> {
    let spec = &vs.spec;
    let mut out = base.cloned().unwrap_or_default();

    out.compartment_id = spec.compartment_id.clone();
    if base.is_none() {
        out.name = vs.display_name();
        out.mesh_id = dependencies.parent_id()?.to_string();
    }
    out.description = spec.description.clone();
    if let Some(policy) = spec.default_routing_policy {
        out.default_routing_policy = Some(routing_policy_to_sdk(policy));
    }
    out.hosts = spec.hosts.clone();
    if let Some(mtls) = spec.mtls {
        // the certificate is assigned by the service
        let certificate_id = base
            .and_then(|b| b.mtls.as_ref())
            .and_then(|m| m.certificate_id.clone());
        out.mtls = Some(sdk::MutualTransportLayerSecurity {
            mode: mtls_mode_to_sdk(mtls.mode),
            maximum_validity: mtls.maximum_validity,
            certificate_id,
        });
    }
    out.freeform_tags = merge_freeform_tags(&spec.freeform_tags, base.map(|b| &b.freeform_tags));
    out.defined_tags = merge_defined_tags(&spec.defined_tags, base.map(|b| &b.defined_tags));
    Ok(out)
}

fn routing_policy_to_sdk(policy: DefaultRoutingPolicy) -> sdk::DefaultVirtualServiceRoutingPolicy {
    sdk::DefaultVirtualServiceRoutingPolicy {
        policy_type: match policy.policy_type {
            RoutingPolicyType::Uniform => sdk::RoutingPolicyType::Uniform,
            RoutingPolicyType::Deny => sdk::RoutingPolicyType::Deny,
        },
    }
}

pub fn routing_policy_from_sdk(
    policy: &sdk::DefaultVirtualServiceRoutingPolicy,
) -> Result<DefaultRoutingPolicy, ConversionError> {
    let policy_type = match policy.policy_type {
        sdk::RoutingPolicyType::Uniform => RoutingPolicyType::Uniform,
        sdk::RoutingPolicyType::Deny => RoutingPolicyType::Deny,
        sdk::RoutingPolicyType::Unknown => {
            return Err(ConversionError::UnknownVariant("routing policy type"));
        }
    };
    Ok(DefaultRoutingPolicy { policy_type })
}

pub fn virtual_service_mtls_from_sdk(
    mtls: &sdk::MutualTransportLayerSecurity,
) -> Result<VirtualServiceMutualTransportLayerSecurity, ConversionError> {
    Ok(VirtualServiceMutualTransportLayerSecurity {
        mode: mtls_mode_from_sdk(mtls.mode)?,
        maximum_validity: mtls.maximum_validity,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crds::{MutualTransportLayerSecurityMode, RefOrId};

    use crate::manager::ResolvedRef;
    use crate::test_utils::virtual_service;

    fn deps() -> ResolvedDependencies {
        ResolvedDependencies::with_parent(ResolvedRef::from_id("ocid1.mesh.oc1..m"))
    }

    #[test]
    fn test_create_request() {
        let mut vs = virtual_service("my-namespace", "my-vs", RefOrId::from_ref("my-mesh"));
        vs.spec.hosts = vec!["myhost.example.com".to_string()];
        vs.spec.default_routing_policy = Some(DefaultRoutingPolicy {
            policy_type: RoutingPolicyType::Uniform,
        });
        vs.spec.mtls = Some(VirtualServiceMutualTransportLayerSecurity {
            mode: MutualTransportLayerSecurityMode::Strict,
            maximum_validity: Some(30),
        });

        let out = virtual_service_to_sdk(&vs, None, &deps()).unwrap();
        assert_eq!(out.name, "my-namespace/my-vs");
        assert_eq!(out.mesh_id, "ocid1.mesh.oc1..m");
        assert_eq!(out.hosts, vec!["myhost.example.com".to_string()]);
        assert_eq!(
            out.default_routing_policy.map(|p| p.policy_type),
            Some(sdk::RoutingPolicyType::Uniform)
        );
        let mtls = out.mtls.unwrap();
        assert_eq!(mtls.mode, sdk::MutualTransportLayerSecurityMode::Strict);
        assert_eq!(mtls.maximum_validity, Some(30));
        assert_eq!(mtls.certificate_id, None);
    }

    #[test]
    fn test_missing_mesh_is_an_error() {
        let vs = virtual_service("ns", "vs", RefOrId::from_ref("m"));
        assert_eq!(
            virtual_service_to_sdk(&vs, None, &ResolvedDependencies::default()).unwrap_err(),
            ConversionError::MissingDependency("parent".to_string())
        );
    }

    #[test]
    fn test_update_preserves_certificate_and_name() {
        let mut vs = virtual_service("ns", "vs", RefOrId::from_ref("m"));
        vs.spec.mtls = Some(VirtualServiceMutualTransportLayerSecurity {
            mode: MutualTransportLayerSecurityMode::Permissive,
            maximum_validity: None,
        });
        let base = sdk::VirtualService {
            id: "ocid1.vs".to_string(),
            compartment_id: "ocid1.compartment.oc1..test".to_string(),
            mesh_id: "ocid1.mesh.oc1..m".to_string(),
            name: "ns/vs".to_string(),
            mtls: Some(sdk::MutualTransportLayerSecurity {
                mode: sdk::MutualTransportLayerSecurityMode::Strict,
                maximum_validity: None,
                certificate_id: Some("ocid1.cert".to_string()),
            }),
            ..Default::default()
        };

        let out = virtual_service_to_sdk(&vs, Some(&base), &deps()).unwrap();
        let mtls = out.mtls.unwrap();
        assert_eq!(mtls.mode, sdk::MutualTransportLayerSecurityMode::Permissive);
        assert_eq!(mtls.certificate_id.as_deref(), Some("ocid1.cert"));
        assert_eq!(out.name, "ns/vs");
    }

    #[test]
    fn test_round_trip_enums() {
        let policy = DefaultRoutingPolicy {
            policy_type: RoutingPolicyType::Deny,
        };
        let mtls = VirtualServiceMutualTransportLayerSecurity {
            mode: MutualTransportLayerSecurityMode::Disabled,
            maximum_validity: Some(45),
        };
        let mut vs = virtual_service("ns", "vs", RefOrId::from_id("ocid1.mesh.oc1..m"));
        vs.spec.default_routing_policy = Some(policy);
        vs.spec.mtls = Some(mtls);

        let out = virtual_service_to_sdk(&vs, None, &deps()).unwrap();
        assert_eq!(
            routing_policy_from_sdk(&out.default_routing_policy.unwrap()).unwrap(),
            policy
        );
        assert_eq!(
            virtual_service_mtls_from_sdk(&out.mtls.unwrap()).unwrap(),
            mtls
        );
    }

    #[test]
    fn test_unknown_mtls_mode_is_rejected() {
        let mtls = sdk::MutualTransportLayerSecurity {
            mode: sdk::MutualTransportLayerSecurityMode::Unknown,
            maximum_validity: None,
            certificate_id: None,
        };
        assert_eq!(
            virtual_service_mtls_from_sdk(&mtls).unwrap_err(),
            ConversionError::UnknownMtlsMode
        );
    }
}
