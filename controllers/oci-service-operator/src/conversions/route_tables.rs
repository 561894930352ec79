//! Route table conversions (virtual service and ingress gateway)

use crds::{
    HttpIngressGatewayTrafficRouteRule, HttpVirtualServiceTrafficRouteRule, IngressGatewayHostRef,
    IngressGatewayRouteTable, IngressGatewayTrafficRouteRule, ManagedResource, RefOrId,
    TcpIngressGatewayTrafficRouteRule, TcpVirtualServiceTrafficRouteRule,
    TlsPassthroughIngressGatewayTrafficRouteRule, TlsPassthroughVirtualServiceTrafficRouteRule,
    VirtualDeploymentTrafficRuleTarget, VirtualServiceRouteTable, VirtualServiceTrafficRouteRule,
    VirtualServiceTrafficRuleTarget,
};
use oci_client::models::servicemesh as sdk;

use super::common::{
    merge_defined_tags, merge_freeform_tags, path_type_from_sdk, path_type_to_sdk, port_from_sdk,
};
use crate::error::ConversionError;
use crate::manager::ResolvedDependencies;

// Virtual service route tables

pub fn virtual_service_route_table_to_sdk(
    vsrt: &VirtualServiceRouteTable,
    base: Option<&sdk::VirtualServiceRouteTable>,
    dependencies: &ResolvedDependencies,
) -> Result<sdk::VirtualServiceRouteTable, ConversionError> {
    let spec = &vsrt.spec;
    let namespace = vsrt.namespace_or_default();
    let mut out = base.cloned().unwrap_or_default();

    out.compartment_id = spec.compartment_id.clone();
    if base.is_none() {
        out.name = vsrt.display_name();
        out.virtual_service_id = dependencies.parent_id()?.to_string();
    }
    out.description = spec.description.clone();
    out.priority = spec.priority;
    out.route_rules = spec
        .route_rules
        .iter()
        .map(|rule| vs_route_rule_to_sdk(rule, &namespace, dependencies))
        .collect::<Result<_, _>>()?;
    out.freeform_tags = merge_freeform_tags(&spec.freeform_tags, base.map(|b| &b.freeform_tags));
    out.defined_tags = merge_defined_tags(&spec.defined_tags, base.map(|b| &b.defined_tags));
    Ok(out)
}

fn vs_route_rule_to_sdk(
    rule: &VirtualServiceTrafficRouteRule,
    namespace: &str,
    dependencies: &ResolvedDependencies,
) -> Result<sdk::VirtualServiceTrafficRouteRule, ConversionError> {
    let destinations = rule
        .destinations()
        .iter()
        .map(|d| vd_target_to_sdk(d, namespace, dependencies))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(match rule {
        VirtualServiceTrafficRouteRule::HttpRoute(http) => {
            sdk::VirtualServiceTrafficRouteRule::Http(sdk::HttpVirtualServiceTrafficRouteRule {
                destinations,
                path: http.path.clone(),
                path_type: path_type_to_sdk(http.path_type),
                is_grpc: http.is_grpc,
                request_timeout_in_ms: http.request_timeout_in_ms,
            })
        }
        VirtualServiceTrafficRouteRule::TcpRoute(_) => {
            sdk::VirtualServiceTrafficRouteRule::Tcp(sdk::TcpVirtualServiceTrafficRouteRule {
                destinations,
            })
        }
        VirtualServiceTrafficRouteRule::TlsPassthroughRoute(_) => {
            sdk::VirtualServiceTrafficRouteRule::TlsPassthrough(
                sdk::TlsPassthroughVirtualServiceTrafficRouteRule { destinations },
            )
        }
    })
}

fn vd_target_to_sdk(
    target: &VirtualDeploymentTrafficRuleTarget,
    namespace: &str,
    dependencies: &ResolvedDependencies,
) -> Result<sdk::VirtualDeploymentTrafficRuleTarget, ConversionError> {
    Ok(sdk::VirtualDeploymentTrafficRuleTarget {
        virtual_deployment_id: dependencies.lookup_id(&target.virtual_deployment, namespace)?,
        weight: target.weight,
        port: target.port.map(|p| p.get()),
    })
}

/// Inverse of the rule conversion; destinations come back in id form
pub fn vs_route_rule_from_sdk(
    rule: &sdk::VirtualServiceTrafficRouteRule,
) -> Result<VirtualServiceTrafficRouteRule, ConversionError> {
    let targets = |destinations: &[sdk::VirtualDeploymentTrafficRuleTarget]| {
        destinations
            .iter()
            .map(|d| {
                Ok(VirtualDeploymentTrafficRuleTarget {
                    virtual_deployment: RefOrId::from_id(&d.virtual_deployment_id),
                    weight: d.weight,
                    port: d.port.map(port_from_sdk).transpose()?,
                })
            })
            .collect::<Result<Vec<_>, ConversionError>>()
    };

    match rule {
        sdk::VirtualServiceTrafficRouteRule::Http(http) => Ok(
            VirtualServiceTrafficRouteRule::HttpRoute(HttpVirtualServiceTrafficRouteRule {
                destinations: targets(&http.destinations)?,
                path: http.path.clone(),
                path_type: path_type_from_sdk(http.path_type)?,
                is_grpc: http.is_grpc,
                request_timeout_in_ms: http.request_timeout_in_ms,
            }),
        ),
        sdk::VirtualServiceTrafficRouteRule::Tcp(tcp) => Ok(VirtualServiceTrafficRouteRule::TcpRoute(
            TcpVirtualServiceTrafficRouteRule {
                destinations: targets(&tcp.destinations)?,
            },
        )),
        sdk::VirtualServiceTrafficRouteRule::TlsPassthrough(tls) => Ok(
            VirtualServiceTrafficRouteRule::TlsPassthroughRoute(
                TlsPassthroughVirtualServiceTrafficRouteRule {
                    destinations: targets(&tls.destinations)?,
                },
            ),
        ),
        sdk::VirtualServiceTrafficRouteRule::Unknown => {
            Err(ConversionError::UnknownVariant("virtual service route rule"))
        }
    }
}

// Ingress gateway route tables

pub fn ingress_gateway_route_table_to_sdk(
    igrt: &IngressGatewayRouteTable,
    base: Option<&sdk::IngressGatewayRouteTable>,
    dependencies: &ResolvedDependencies,
) -> Result<sdk::IngressGatewayRouteTable, ConversionError> {
    let spec = &igrt.spec;
    let namespace = igrt.namespace_or_default();
    let mut out = base.cloned().unwrap_or_default();

    out.compartment_id = spec.compartment_id.clone();
    if base.is_none() {
        out.name = igrt.display_name();
        out.ingress_gateway_id = dependencies.parent_id()?.to_string();
    }
    out.description = spec.description.clone();
    out.priority = spec.priority;
    out.route_rules = spec
        .route_rules
        .iter()
        .map(|rule| ig_route_rule_to_sdk(rule, &namespace, dependencies))
        .collect::<Result<_, _>>()?;
    out.freeform_tags = merge_freeform_tags(&spec.freeform_tags, base.map(|b| &b.freeform_tags));
    out.defined_tags = merge_defined_tags(&spec.defined_tags, base.map(|b| &b.defined_tags));
    Ok(out)
}

fn host_ref_to_sdk(host: Option<&IngressGatewayHostRef>) -> Option<sdk::IngressGatewayHostRef> {
    host.map(|h| sdk::IngressGatewayHostRef {
        name: h.name.clone(),
        port: h.port.map(|p| p.get()),
    })
}

fn host_ref_from_sdk(
    host: Option<&sdk::IngressGatewayHostRef>,
) -> Result<Option<IngressGatewayHostRef>, ConversionError> {
    host.map(|h| {
        Ok(IngressGatewayHostRef {
            name: h.name.clone(),
            port: h.port.map(port_from_sdk).transpose()?,
        })
    })
    .transpose()
}

fn ig_route_rule_to_sdk(
    rule: &IngressGatewayTrafficRouteRule,
    namespace: &str,
    dependencies: &ResolvedDependencies,
) -> Result<sdk::IngressGatewayTrafficRouteRule, ConversionError> {
    let destinations = rule
        .destinations()
        .iter()
        .map(|d| vs_target_to_sdk(d, namespace, dependencies))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(match rule {
        IngressGatewayTrafficRouteRule::HttpRoute(http) => {
            sdk::IngressGatewayTrafficRouteRule::Http(sdk::HttpIngressGatewayTrafficRouteRule {
                ingress_gateway_host: host_ref_to_sdk(http.ingress_gateway_host.as_ref()),
                destinations,
                path: http.path.clone(),
                path_type: path_type_to_sdk(http.path_type),
                is_grpc: http.is_grpc,
                is_host_rewrite_enabled: http.is_host_rewrite_enabled,
                is_path_rewrite_enabled: http.is_path_rewrite_enabled,
                request_timeout_in_ms: http.request_timeout_in_ms,
            })
        }
        IngressGatewayTrafficRouteRule::TcpRoute(tcp) => {
            sdk::IngressGatewayTrafficRouteRule::Tcp(sdk::TcpIngressGatewayTrafficRouteRule {
                ingress_gateway_host: host_ref_to_sdk(tcp.ingress_gateway_host.as_ref()),
                destinations,
            })
        }
        IngressGatewayTrafficRouteRule::TlsPassthroughRoute(tls) => {
            sdk::IngressGatewayTrafficRouteRule::TlsPassthrough(
                sdk::TlsPassthroughIngressGatewayTrafficRouteRule {
                    ingress_gateway_host: host_ref_to_sdk(tls.ingress_gateway_host.as_ref()),
                    destinations,
                },
            )
        }
    })
}

fn vs_target_to_sdk(
    target: &VirtualServiceTrafficRuleTarget,
    namespace: &str,
    dependencies: &ResolvedDependencies,
) -> Result<sdk::VirtualServiceTrafficRuleTarget, ConversionError> {
    Ok(sdk::VirtualServiceTrafficRuleTarget {
        virtual_service_id: dependencies.lookup_id(&target.virtual_service, namespace)?,
        port: target.port.map(|p| p.get()),
        weight: target.weight,
    })
}

pub fn ig_route_rule_from_sdk(
    rule: &sdk::IngressGatewayTrafficRouteRule,
) -> Result<IngressGatewayTrafficRouteRule, ConversionError> {
    let targets = |destinations: &[sdk::VirtualServiceTrafficRuleTarget]| {
        destinations
            .iter()
            .map(|d| {
                Ok(VirtualServiceTrafficRuleTarget {
                    virtual_service: RefOrId::from_id(&d.virtual_service_id),
                    port: d.port.map(port_from_sdk).transpose()?,
                    weight: d.weight,
                })
            })
            .collect::<Result<Vec<_>, ConversionError>>()
    };

    match rule {
        sdk::IngressGatewayTrafficRouteRule::Http(http) => Ok(
            IngressGatewayTrafficRouteRule::HttpRoute(HttpIngressGatewayTrafficRouteRule {
                ingress_gateway_host: host_ref_from_sdk(http.ingress_gateway_host.as_ref())?,
                destinations: targets(&http.destinations)?,
                path: http.path.clone(),
                path_type: path_type_from_sdk(http.path_type)?,
                is_grpc: http.is_grpc,
                is_host_rewrite_enabled: http.is_host_rewrite_enabled,
                is_path_rewrite_enabled: http.is_path_rewrite_enabled,
                request_timeout_in_ms: http.request_timeout_in_ms,
            }),
        ),
        sdk::IngressGatewayTrafficRouteRule::Tcp(tcp) => Ok(IngressGatewayTrafficRouteRule::TcpRoute(
            TcpIngressGatewayTrafficRouteRule {
                ingress_gateway_host: host_ref_from_sdk(tcp.ingress_gateway_host.as_ref())?,
                destinations: targets(&tcp.destinations)?,
            },
        )),
        sdk::IngressGatewayTrafficRouteRule::TlsPassthrough(tls) => Ok(
            IngressGatewayTrafficRouteRule::TlsPassthroughRoute(
                TlsPassthroughIngressGatewayTrafficRouteRule {
                    ingress_gateway_host: host_ref_from_sdk(tls.ingress_gateway_host.as_ref())?,
                    destinations: targets(&tls.destinations)?,
                },
            ),
        ),
        sdk::IngressGatewayTrafficRouteRule::Unknown => {
            Err(ConversionError::UnknownVariant("ingress gateway route rule"))
        }
    }
}
