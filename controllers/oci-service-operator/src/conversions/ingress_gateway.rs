//! IngressGateway conversions

use crds::{
    CaBundle, IngressGateway, IngressGatewayHost, IngressGatewayListener,
    IngressGatewayListenerProtocol, IngressGatewayMutualTransportLayerSecurity,
    IngressListenerClientValidationConfig, IngressListenerTlsConfig, IngressListenerTlsMode,
    KubeSecretSource, ManagedResource, OciCaBundle, OciTlsCertificate, TlsCertificate,
};
use oci_client::models::servicemesh as sdk;

use super::common::{access_logging_to_sdk, merge_defined_tags, merge_freeform_tags, port_from_sdk};
use crate::error::ConversionError;
use crate::manager::ResolvedDependencies;

pub fn ingress_gateway_to_sdk(
    ig: &IngressGateway,
    base: Option<&sdk::IngressGateway>,
    dependencies: &ResolvedDependencies,
) -> Result<sdk::IngressGateway, ConversionError> {
    let spec = &ig.spec;
    let mut out = base.cloned().unwrap_or_default();

    out.compartment_id = spec.compartment_id.clone();
    if base.is_none() {
        out.name = ig.display_name();
        out.mesh_id = dependencies.parent_id()?.to_string();
    }
    out.description = spec.description.clone();
    out.hosts = spec.hosts.iter().map(host_to_sdk).collect();
    out.access_logging = access_logging_to_sdk(
        spec.access_logging,
        base.and_then(|b| b.access_logging.as_ref()),
    );
    if let Some(mtls) = spec.mtls {
        let certificate_id = base
            .and_then(|b| b.mtls.as_ref())
            .and_then(|m| m.certificate_id.clone());
        out.mtls = Some(sdk::IngressGatewayMutualTransportLayerSecurity {
            maximum_validity: mtls.maximum_validity,
            certificate_id,
        });
    }
    out.freeform_tags = merge_freeform_tags(&spec.freeform_tags, base.map(|b| &b.freeform_tags));
    out.defined_tags = merge_defined_tags(&spec.defined_tags, base.map(|b| &b.defined_tags));
    Ok(out)
}

fn host_to_sdk(host: &IngressGatewayHost) -> sdk::IngressGatewayHost {
    sdk::IngressGatewayHost {
        name: host.name.clone(),
        hostnames: host.hostnames.clone(),
        listeners: host.listeners.iter().map(listener_to_sdk).collect(),
    }
}

fn listener_to_sdk(listener: &IngressGatewayListener) -> sdk::IngressGatewayListener {
    sdk::IngressGatewayListener {
        protocol: match listener.protocol {
            IngressGatewayListenerProtocol::Http => sdk::IngressGatewayListenerProtocol::Http,
            IngressGatewayListenerProtocol::TlsPassthrough => {
                sdk::IngressGatewayListenerProtocol::TlsPassthrough
            }
            IngressGatewayListenerProtocol::Tcp => sdk::IngressGatewayListenerProtocol::Tcp,
        },
        port: listener.port.get(),
        tls: listener.tls.as_ref().map(tls_config_to_sdk),
    }
}

fn tls_config_to_sdk(tls: &IngressListenerTlsConfig) -> sdk::IngressListenerTlsConfig {
    sdk::IngressListenerTlsConfig {
        mode: match tls.mode {
            IngressListenerTlsMode::Disabled => sdk::IngressListenerTlsMode::Disabled,
            IngressListenerTlsMode::Permissive => sdk::IngressListenerTlsMode::Permissive,
            IngressListenerTlsMode::Tls => sdk::IngressListenerTlsMode::Tls,
            IngressListenerTlsMode::MutualTls => sdk::IngressListenerTlsMode::MutualTls,
        },
        server_certificate: tls.server_certificate.as_ref().map(certificate_to_sdk),
        client_validation: tls.client_validation.as_ref().map(|validation| {
            sdk::IngressListenerClientValidationConfig {
                trusted_ca_bundle: validation.trusted_ca_bundle.as_ref().map(ca_bundle_to_sdk),
                subject_alternate_names: validation.subject_alternate_names.clone(),
            }
        }),
    }
}

/// Secret-backed certificates are mounted on the gateway pods as local files
pub fn certificate_to_sdk(certificate: &TlsCertificate) -> sdk::TlsCertificate {
    match certificate {
        TlsCertificate::OciTlsCertificate(oci) => {
            sdk::TlsCertificate::OciCertificate(sdk::OciTlsCertificate {
                certificate_id: oci.certificate_id.clone(),
            })
        }
        TlsCertificate::KubeSecretTlsCertificate(secret) => {
            sdk::TlsCertificate::LocalFile(sdk::LocalFileSource {
                secret_name: secret.secret_name.clone(),
            })
        }
    }
}

pub fn certificate_from_sdk(certificate: &sdk::TlsCertificate) -> Result<TlsCertificate, ConversionError> {
    match certificate {
        sdk::TlsCertificate::OciCertificate(oci) => Ok(TlsCertificate::OciTlsCertificate(OciTlsCertificate {
            certificate_id: oci.certificate_id.clone(),
        })),
        sdk::TlsCertificate::LocalFile(file) => Ok(TlsCertificate::KubeSecretTlsCertificate(KubeSecretSource {
            secret_name: file.secret_name.clone(),
        })),
        sdk::TlsCertificate::Unknown => Err(ConversionError::UnknownVariant("tls certificate type")),
    }
}

pub fn ca_bundle_to_sdk(bundle: &CaBundle) -> sdk::CaBundle {
    match bundle {
        CaBundle::OciCaBundle(oci) => sdk::CaBundle::OciCaBundle(sdk::OciCaBundle {
            ca_bundle_id: oci.ca_bundle_id.clone(),
        }),
        CaBundle::KubeSecretCaBundle(secret) => sdk::CaBundle::LocalFile(sdk::LocalFileSource {
            secret_name: secret.secret_name.clone(),
        }),
    }
}

pub fn ca_bundle_from_sdk(bundle: &sdk::CaBundle) -> Result<CaBundle, ConversionError> {
    match bundle {
        sdk::CaBundle::OciCaBundle(oci) => Ok(CaBundle::OciCaBundle(OciCaBundle {
            ca_bundle_id: oci.ca_bundle_id.clone(),
        })),
        sdk::CaBundle::LocalFile(file) => Ok(CaBundle::KubeSecretCaBundle(KubeSecretSource {
            secret_name: file.secret_name.clone(),
        })),
        sdk::CaBundle::Unknown => Err(ConversionError::UnknownVariant("ca bundle type")),
    }
}

/// Hosts as reported by the service, back in spec form
pub fn hosts_from_sdk(hosts: &[sdk::IngressGatewayHost]) -> Result<Vec<IngressGatewayHost>, ConversionError> {
    hosts
        .iter()
        .map(|host| {
            Ok(IngressGatewayHost {
                name: host.name.clone(),
                hostnames: host.hostnames.clone(),
                listeners: host
                    .listeners
                    .iter()
                    .map(listener_from_sdk)
                    .collect::<Result<_, _>>()?,
            })
        })
        .collect()
}

fn listener_from_sdk(listener: &sdk::IngressGatewayListener) -> Result<IngressGatewayListener, ConversionError> {
    let protocol = match listener.protocol {
        sdk::IngressGatewayListenerProtocol::Http => IngressGatewayListenerProtocol::Http,
        sdk::IngressGatewayListenerProtocol::TlsPassthrough => {
            IngressGatewayListenerProtocol::TlsPassthrough
        }
        sdk::IngressGatewayListenerProtocol::Tcp => IngressGatewayListenerProtocol::Tcp,
        sdk::IngressGatewayListenerProtocol::Unknown => {
            return Err(ConversionError::UnknownVariant("ingress listener protocol"));
        }
    };
    let tls = listener
        .tls
        .as_ref()
        .map(|tls| -> Result<IngressListenerTlsConfig, ConversionError> {
            let mode = match tls.mode {
                sdk::IngressListenerTlsMode::Disabled => IngressListenerTlsMode::Disabled,
                sdk::IngressListenerTlsMode::Permissive => IngressListenerTlsMode::Permissive,
                sdk::IngressListenerTlsMode::Tls => IngressListenerTlsMode::Tls,
                sdk::IngressListenerTlsMode::MutualTls => IngressListenerTlsMode::MutualTls,
                sdk::IngressListenerTlsMode::Unknown => {
                    return Err(ConversionError::UnknownVariant("ingress listener tls mode"));
                }
            };
            let client_validation = tls
                .client_validation
                .as_ref()
                .map(|v| {
                    Ok::<_, ConversionError>(IngressListenerClientValidationConfig {
                        trusted_ca_bundle: v.trusted_ca_bundle.as_ref().map(ca_bundle_from_sdk).transpose()?,
                        subject_alternate_names: v.subject_alternate_names.clone(),
                    })
                })
                .transpose()?;
            Ok(IngressListenerTlsConfig {
                mode,
                server_certificate: tls.server_certificate.as_ref().map(certificate_from_sdk).transpose()?,
                client_validation,
            })
        })
        .transpose()?;

    Ok(IngressGatewayListener {
        protocol,
        port: port_from_sdk(listener.port)?,
        tls,
    })
}

pub fn ingress_gateway_mtls_from_sdk(
    mtls: &sdk::IngressGatewayMutualTransportLayerSecurity,
) -> IngressGatewayMutualTransportLayerSecurity {
    IngressGatewayMutualTransportLayerSecurity {
        maximum_validity: mtls.maximum_validity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crds::{Port, RefOrId};

    use crate::manager::ResolvedRef;
    use crate::test_utils::ingress_gateway;

    fn tls_host() -> IngressGatewayHost {
        IngressGatewayHost {
            name: "public".to_string(),
            hostnames: vec!["shop.example.com".to_string()],
            listeners: vec![IngressGatewayListener {
                protocol: IngressGatewayListenerProtocol::Http,
                port: Port::try_from(443).unwrap(),
                tls: Some(IngressListenerTlsConfig {
                    mode: IngressListenerTlsMode::MutualTls,
                    server_certificate: Some(TlsCertificate::KubeSecretTlsCertificate(KubeSecretSource {
                        secret_name: "shop-cert".to_string(),
                    })),
                    client_validation: Some(IngressListenerClientValidationConfig {
                        trusted_ca_bundle: Some(CaBundle::OciCaBundle(OciCaBundle {
                            ca_bundle_id: "ocid1.cabundle".to_string(),
                        })),
                        subject_alternate_names: vec!["client.example.com".to_string()],
                    }),
                }),
            }],
        }
    }

    #[test]
    fn test_create_request() {
        let mut ig = ingress_gateway("ns", "ig", RefOrId::from_ref("mesh"));
        ig.spec.hosts = vec![tls_host()];
        ig.spec.mtls = Some(IngressGatewayMutualTransportLayerSecurity { maximum_validity: 30 });
        let deps = ResolvedDependencies::with_parent(ResolvedRef::from_id("ocid1.mesh"));

        let out = ingress_gateway_to_sdk(&ig, None, &deps).unwrap();
        assert_eq!(out.mesh_id, "ocid1.mesh");
        assert_eq!(out.name, "ns/ig");
        let listener = &out.hosts[0].listeners[0];
        assert_eq!(listener.port, 443);
        let tls = listener.tls.as_ref().unwrap();
        assert_eq!(tls.mode, sdk::IngressListenerTlsMode::MutualTls);
        assert_eq!(
            tls.server_certificate,
            Some(sdk::TlsCertificate::LocalFile(sdk::LocalFileSource {
                secret_name: "shop-cert".to_string()
            }))
        );
        assert_eq!(out.mtls.unwrap().maximum_validity, 30);
    }

    #[test]
    fn test_hosts_round_trip() {
        let hosts = vec![tls_host()];
        let mut ig = ingress_gateway("ns", "ig", RefOrId::from_id("ocid1.mesh"));
        ig.spec.hosts = hosts.clone();
        let deps = ResolvedDependencies::with_parent(ResolvedRef::from_id("ocid1.mesh"));
        let out = ingress_gateway_to_sdk(&ig, None, &deps).unwrap();
        assert_eq!(hosts_from_sdk(&out.hosts).unwrap(), hosts);
    }

    #[test]
    fn test_update_keeps_assigned_certificate() {
        let mut ig = ingress_gateway("ns", "ig", RefOrId::from_ref("mesh"));
        ig.spec.mtls = Some(IngressGatewayMutualTransportLayerSecurity { maximum_validity: 60 });
        let base = sdk::IngressGateway {
            id: "ocid1.ig".to_string(),
            mesh_id: "ocid1.mesh".to_string(),
            name: "ns/ig".to_string(),
            mtls: Some(sdk::IngressGatewayMutualTransportLayerSecurity {
                maximum_validity: 45,
                certificate_id: Some("ocid1.cert".to_string()),
            }),
            ..Default::default()
        };
        let out = ingress_gateway_to_sdk(&ig, Some(&base), &ResolvedDependencies::default()).unwrap();
        let mtls = out.mtls.unwrap();
        assert_eq!(mtls.maximum_validity, 60);
        assert_eq!(mtls.certificate_id.as_deref(), Some("ocid1.cert"));
        assert_eq!(
            ingress_gateway_mtls_from_sdk(&mtls),
            IngressGatewayMutualTransportLayerSecurity { maximum_validity: 60 }
        );
    }

    #[test]
    fn test_unknown_certificate_sources_are_rejected() {
        assert_eq!(
            certificate_from_sdk(&sdk::TlsCertificate::Unknown).unwrap_err(),
            ConversionError::UnknownVariant("tls certificate type")
        );
        assert_eq!(
            ca_bundle_from_sdk(&sdk::CaBundle::Unknown).unwrap_err(),
            ConversionError::UnknownVariant("ca bundle type")
        );
        assert_eq!(
            ca_bundle_from_sdk(&sdk::CaBundle::LocalFile(sdk::LocalFileSource {
                secret_name: "ca".to_string()
            }))
            .unwrap(),
            CaBundle::KubeSecretCaBundle(KubeSecretSource {
                secret_name: "ca".to_string()
            })
        );
    }
}
