//! AccessPolicy conversions

use crds::{
    AccessPolicy, AccessPolicyAction, AccessPolicyRule, AllVirtualServices, ExternalService,
    ExternalServiceProtocol, ManagedResource, RefOrId, TrafficTarget,
};
use oci_client::models::servicemesh as sdk;

use super::common::{merge_defined_tags, merge_freeform_tags, port_from_sdk};
use crate::error::ConversionError;
use crate::manager::ResolvedDependencies;

pub fn access_policy_to_sdk(
    ap: &AccessPolicy,
    base: Option<&sdk::AccessPolicy>,
    dependencies: &ResolvedDependencies,
) -> Result<sdk::AccessPolicy, ConversionError> {
    let spec = &ap.spec;
    let namespace = ap.namespace_or_default();
    let mut out = base.cloned().unwrap_or_default();

    out.compartment_id = spec.compartment_id.clone();
    if base.is_none() {
        out.name = ap.display_name();
        out.mesh_id = dependencies.parent_id()?.to_string();
    }
    out.description = spec.description.clone();
    out.rules = spec
        .rules
        .iter()
        .map(|rule| {
            Ok(sdk::AccessPolicyRule {
                action: match rule.action {
                    AccessPolicyAction::Allow => sdk::AccessPolicyAction::Allow,
                },
                source: target_to_sdk(&rule.source, &namespace, dependencies)?,
                destination: target_to_sdk(&rule.destination, &namespace, dependencies)?,
            })
        })
        .collect::<Result<_, ConversionError>>()?;
    out.freeform_tags = merge_freeform_tags(&spec.freeform_tags, base.map(|b| &b.freeform_tags));
    out.defined_tags = merge_defined_tags(&spec.defined_tags, base.map(|b| &b.defined_tags));
    Ok(out)
}

fn target_to_sdk(
    target: &TrafficTarget,
    namespace: &str,
    dependencies: &ResolvedDependencies,
) -> Result<sdk::AccessPolicyTarget, ConversionError> {
    Ok(match target {
        TrafficTarget::AllVirtualServices(_) => sdk::AccessPolicyTarget::AllVirtualServices,
        TrafficTarget::VirtualService(vs) => {
            sdk::AccessPolicyTarget::VirtualService(sdk::VirtualServiceAccessPolicyTarget {
                virtual_service_id: dependencies.lookup_id(vs, namespace)?,
            })
        }
        TrafficTarget::IngressGateway(ig) => {
            sdk::AccessPolicyTarget::IngressGateway(sdk::IngressGatewayAccessPolicyTarget {
                ingress_gateway_id: dependencies.lookup_id(ig, namespace)?,
            })
        }
        TrafficTarget::ExternalService(external) => {
            sdk::AccessPolicyTarget::ExternalService(sdk::ExternalServiceAccessPolicyTarget {
                hostnames: external.hostnames.clone(),
                ip_addresses: external.ip_addresses.clone(),
                ports: external.ports.iter().map(|p| p.get()).collect(),
                protocol: external.protocol.map(|p| match p {
                    ExternalServiceProtocol::Http => sdk::ExternalServiceProtocol::Http,
                    ExternalServiceProtocol::Https => sdk::ExternalServiceProtocol::Https,
                    ExternalServiceProtocol::Tcp => sdk::ExternalServiceProtocol::Tcp,
                }),
            })
        }
    })
}

pub fn rule_from_sdk(rule: &sdk::AccessPolicyRule) -> Result<AccessPolicyRule, ConversionError> {
    let action = match rule.action {
        sdk::AccessPolicyAction::Allow => AccessPolicyAction::Allow,
        sdk::AccessPolicyAction::Unknown => {
            return Err(ConversionError::UnknownVariant("access policy action"));
        }
    };
    Ok(AccessPolicyRule {
        action,
        source: target_from_sdk(&rule.source)?,
        destination: target_from_sdk(&rule.destination)?,
    })
}

pub fn target_from_sdk(target: &sdk::AccessPolicyTarget) -> Result<TrafficTarget, ConversionError> {
    match target {
        sdk::AccessPolicyTarget::AllVirtualServices => {
            Ok(TrafficTarget::AllVirtualServices(AllVirtualServices {}))
        }
        sdk::AccessPolicyTarget::VirtualService(vs) => Ok(TrafficTarget::VirtualService(
            RefOrId::from_id(&vs.virtual_service_id),
        )),
        sdk::AccessPolicyTarget::IngressGateway(ig) => Ok(TrafficTarget::IngressGateway(
            RefOrId::from_id(&ig.ingress_gateway_id),
        )),
        sdk::AccessPolicyTarget::ExternalService(external) => {
            let protocol = external
                .protocol
                .map(|p| match p {
                    sdk::ExternalServiceProtocol::Http => Ok(ExternalServiceProtocol::Http),
                    sdk::ExternalServiceProtocol::Https => Ok(ExternalServiceProtocol::Https),
                    sdk::ExternalServiceProtocol::Tcp => Ok(ExternalServiceProtocol::Tcp),
                    sdk::ExternalServiceProtocol::Unknown => {
                        Err(ConversionError::UnknownVariant("external service protocol"))
                    }
                })
                .transpose()?;
            Ok(TrafficTarget::ExternalService(ExternalService {
                hostnames: external.hostnames.clone(),
                ip_addresses: external.ip_addresses.clone(),
                ports: external
                    .ports
                    .iter()
                    .map(|p| port_from_sdk(*p))
                    .collect::<Result<_, _>>()?,
                protocol,
            }))
        }
        sdk::AccessPolicyTarget::Unknown => Err(ConversionError::UnknownTarget("access policy")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crds::Port;

    use crate::manager::ResolvedRef;
    use crate::test_utils::access_policy;

    fn deps() -> ResolvedDependencies {
        let mut deps = ResolvedDependencies::with_parent(ResolvedRef::from_id("ocid1.mesh"));
        deps.insert_reference(&RefOrId::from_ref("frontend"), "ns", ResolvedRef::from_id("ocid1.vs.frontend"));
        deps.insert_reference(&RefOrId::from_ref("gateway"), "ns", ResolvedRef::from_id("ocid1.ig"));
        deps
    }

    #[test]
    fn test_rules_resolve_targets() {
        let rules = vec![
            AccessPolicyRule {
                action: AccessPolicyAction::Allow,
                source: TrafficTarget::IngressGateway(RefOrId::from_ref("gateway")),
                destination: TrafficTarget::VirtualService(RefOrId::from_ref("frontend")),
            },
            AccessPolicyRule {
                action: AccessPolicyAction::Allow,
                source: TrafficTarget::AllVirtualServices(AllVirtualServices {}),
                destination: TrafficTarget::ExternalService(ExternalService {
                    hostnames: vec!["api.example.com".to_string()],
                    ip_addresses: vec![],
                    ports: vec![Port::try_from(443).unwrap()],
                    protocol: Some(ExternalServiceProtocol::Https),
                }),
            },
        ];
        let ap = access_policy("ns", "ap", RefOrId::from_ref("mesh"), rules);

        let out = access_policy_to_sdk(&ap, None, &deps()).unwrap();
        assert_eq!(out.mesh_id, "ocid1.mesh");
        assert_eq!(
            out.rules[0].source,
            sdk::AccessPolicyTarget::IngressGateway(sdk::IngressGatewayAccessPolicyTarget {
                ingress_gateway_id: "ocid1.ig".to_string()
            })
        );
        assert_eq!(
            out.rules[0].destination,
            sdk::AccessPolicyTarget::VirtualService(sdk::VirtualServiceAccessPolicyTarget {
                virtual_service_id: "ocid1.vs.frontend".to_string()
            })
        );
        assert_eq!(out.rules[1].source, sdk::AccessPolicyTarget::AllVirtualServices);

        let back = rule_from_sdk(&out.rules[1]).unwrap();
        assert_eq!(back, ap.spec.rules[1]);
    }

    #[test]
    fn test_unknown_target_is_rejected() {
        assert_eq!(
            target_from_sdk(&sdk::AccessPolicyTarget::Unknown).unwrap_err(),
            ConversionError::UnknownTarget("access policy")
        );
        assert_eq!(
            ConversionError::UnknownTarget("access policy").to_string(),
            "unknown access policy target"
        );
    }

    #[test]
    fn test_unresolved_target_is_rejected() {
        let rules = vec![AccessPolicyRule {
            action: AccessPolicyAction::Allow,
            source: TrafficTarget::VirtualService(RefOrId::from_ref("missing")),
            destination: TrafficTarget::AllVirtualServices(AllVirtualServices {}),
        }];
        let ap = access_policy("ns", "ap", RefOrId::from_ref("mesh"), rules);
        assert_eq!(
            access_policy_to_sdk(&ap, None, &deps()).unwrap_err(),
            ConversionError::MissingDependency("ns/missing".to_string())
        );
    }
}
