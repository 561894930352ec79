//! VirtualDeployment conversions

use crds::{ListenerProtocol, ManagedResource, ServiceDiscovery, VirtualDeployment, VirtualDeploymentListener};
use oci_client::models::servicemesh as sdk;

use super::common::{access_logging_to_sdk, merge_defined_tags, merge_freeform_tags, port_from_sdk};
use crate::error::ConversionError;
use crate::manager::ResolvedDependencies;

pub fn virtual_deployment_to_sdk(
    vd: &VirtualDeployment,
    base: Option<&sdk::VirtualDeployment>,
    dependencies: &ResolvedDependencies,
) -> Result<sdk::VirtualDeployment, ConversionError> {
    let spec = &vd.spec;
    let mut out = base.cloned().unwrap_or_default();

    out.compartment_id = spec.compartment_id.clone();
    if base.is_none() {
        out.name = vd.display_name();
        out.virtual_service_id = dependencies.parent_id()?.to_string();
    }
    out.description = spec.description.clone();
    if let Some(discovery) = &spec.service_discovery {
        out.service_discovery = Some(service_discovery_to_sdk(discovery));
    }
    out.listeners = spec.listener.iter().map(listener_to_sdk).collect();
    out.access_logging = access_logging_to_sdk(spec.access_logging, base.and_then(|b| b.access_logging.as_ref()));
    out.freeform_tags = merge_freeform_tags(&spec.freeform_tags, base.map(|b| &b.freeform_tags));
    out.defined_tags = merge_defined_tags(&spec.defined_tags, base.map(|b| &b.defined_tags));
    Ok(out)
}

pub fn service_discovery_to_sdk(discovery: &ServiceDiscovery) -> sdk::ServiceDiscoveryConfiguration {
    match discovery {
        ServiceDiscovery::Dns { hostname } => sdk::ServiceDiscoveryConfiguration::Dns {
            hostname: hostname.clone(),
        },
        ServiceDiscovery::Disabled => sdk::ServiceDiscoveryConfiguration::Disabled,
    }
}

pub fn service_discovery_from_sdk(
    discovery: &sdk::ServiceDiscoveryConfiguration,
) -> Result<ServiceDiscovery, ConversionError> {
    match discovery {
        sdk::ServiceDiscoveryConfiguration::Dns { hostname } => Ok(ServiceDiscovery::Dns {
            hostname: hostname.clone(),
        }),
        sdk::ServiceDiscoveryConfiguration::Disabled => Ok(ServiceDiscovery::Disabled),
        sdk::ServiceDiscoveryConfiguration::Unknown => {
            Err(ConversionError::UnknownVariant("service discovery type"))
        }
    }
}

fn listener_to_sdk(listener: &VirtualDeploymentListener) -> sdk::VirtualDeploymentListener {
    sdk::VirtualDeploymentListener {
        protocol: match listener.protocol {
            ListenerProtocol::Http => sdk::ListenerProtocol::Http,
            ListenerProtocol::Http2 => sdk::ListenerProtocol::Http2,
            ListenerProtocol::Grpc => sdk::ListenerProtocol::Grpc,
            ListenerProtocol::Tcp => sdk::ListenerProtocol::Tcp,
            ListenerProtocol::TlsPassthrough => sdk::ListenerProtocol::TlsPassthrough,
        },
        port: listener.port.get(),
        request_timeout_in_ms: listener.request_timeout_in_ms,
        idle_timeout_in_ms: listener.idle_timeout_in_ms,
    }
}

pub fn listener_from_sdk(
    listener: &sdk::VirtualDeploymentListener,
) -> Result<VirtualDeploymentListener, ConversionError> {
    let protocol = match listener.protocol {
        sdk::ListenerProtocol::Http => ListenerProtocol::Http,
        sdk::ListenerProtocol::Http2 => ListenerProtocol::Http2,
        sdk::ListenerProtocol::Grpc => ListenerProtocol::Grpc,
        sdk::ListenerProtocol::Tcp => ListenerProtocol::Tcp,
        sdk::ListenerProtocol::TlsPassthrough => ListenerProtocol::TlsPassthrough,
        sdk::ListenerProtocol::Unknown => {
            return Err(ConversionError::UnknownVariant("listener protocol"));
        }
    };
    Ok(VirtualDeploymentListener {
        protocol,
        port: port_from_sdk(listener.port)?,
        request_timeout_in_ms: listener.request_timeout_in_ms,
        idle_timeout_in_ms: listener.idle_timeout_in_ms,
    })
}
