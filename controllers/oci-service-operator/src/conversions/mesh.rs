//! Mesh conversions

use crds::{ManagedResource, Mesh, MeshMutualTransportLayerSecurity};
use oci_client::models::servicemesh as sdk;

use super::common::{merge_defined_tags, merge_freeform_tags, mtls_mode_from_sdk, mtls_mode_to_sdk};
use crate::error::ConversionError;

/// Build the remote mesh. Certificate authorities are create-only.
pub fn mesh_to_sdk(mesh: &Mesh, base: Option<&sdk::Mesh>) -> Result<sdk::Mesh, ConversionError> {
    let spec = &mesh.spec;
    let mut out = base.cloned().unwrap_or_default();

    out.compartment_id = spec.compartment_id.clone();
    out.display_name = mesh.display_name();
    out.description = spec.description.clone();
    if base.is_none() {
        out.certificate_authorities = spec
            .certificate_authorities
            .iter()
            .map(|ca| sdk::CertificateAuthority { id: ca.id.clone() })
            .collect();
    }
    if let Some(mtls) = spec.mtls {
        out.mtls = Some(sdk::MeshMutualTransportLayerSecurity {
            minimum: mtls_mode_to_sdk(mtls.minimum),
        });
    }
    out.freeform_tags = merge_freeform_tags(&spec.freeform_tags, base.map(|b| &b.freeform_tags));
    out.defined_tags = merge_defined_tags(&spec.defined_tags, base.map(|b| &b.defined_tags));
    Ok(out)
}

pub fn mesh_mtls_from_sdk(
    mtls: &sdk::MeshMutualTransportLayerSecurity,
) -> Result<MeshMutualTransportLayerSecurity, ConversionError> {
    Ok(MeshMutualTransportLayerSecurity {
        minimum: mtls_mode_from_sdk(mtls.minimum)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crds::{CertificateAuthority, MutualTransportLayerSecurityMode};
    use std::collections::BTreeMap;

    use crate::test_utils::mesh;

    #[test]
    fn test_display_name_defaults_to_namespace_and_name() {
        let m = mesh("my-namespace", "my-mesh");
        let out = mesh_to_sdk(&m, None).unwrap();
        assert_eq!(out.display_name, "my-namespace/my-mesh");
    }

    #[test]
    fn test_display_name_from_spec() {
        let mut m = mesh("my-namespace", "my-mesh");
        m.spec.display_name = Some("my-sdk-mesh".to_string());
        let out = mesh_to_sdk(&m, None).unwrap();
        assert_eq!(out.display_name, "my-sdk-mesh");
    }

    #[test]
    fn test_create_request() {
        let mut m = mesh("ns", "m");
        m.spec.description = Some("mesh".to_string());
        m.spec.certificate_authorities = vec![CertificateAuthority {
            id: "ocid1.ca".to_string(),
        }];
        m.spec.mtls = Some(MeshMutualTransportLayerSecurity {
            minimum: MutualTransportLayerSecurityMode::Strict,
        });
        m.spec.freeform_tags = BTreeMap::from([("a".to_string(), "b".to_string())]);

        let out = mesh_to_sdk(&m, None).unwrap();
        assert_eq!(out.compartment_id, "ocid1.compartment.oc1..test");
        assert_eq!(out.description.as_deref(), Some("mesh"));
        assert_eq!(out.certificate_authorities[0].id, "ocid1.ca");
        assert_eq!(
            out.mtls.map(|m| m.minimum),
            Some(sdk::MutualTransportLayerSecurityMode::Strict)
        );
        assert_eq!(out.freeform_tags["a"], "b");
    }

    #[test]
    fn test_update_keeps_create_only_fields() {
        let mut m = mesh("ns", "m");
        m.spec.certificate_authorities = vec![CertificateAuthority {
            id: "ocid1.ca.new".to_string(),
        }];
        let base = sdk::Mesh {
            id: "ocid1.mesh".to_string(),
            compartment_id: "ocid1.compartment.oc1..test".to_string(),
            display_name: "ns/m".to_string(),
            certificate_authorities: vec![sdk::CertificateAuthority {
                id: "ocid1.ca.old".to_string(),
            }],
            mtls: Some(sdk::MeshMutualTransportLayerSecurity {
                minimum: sdk::MutualTransportLayerSecurityMode::Permissive,
            }),
            lifecycle_state: sdk::ServiceMeshLifecycleState::Active,
            ..Default::default()
        };

        let out = mesh_to_sdk(&m, Some(&base)).unwrap();
        assert_eq!(out.certificate_authorities[0].id, "ocid1.ca.old");
        // mtls omitted from the spec keeps the service default
        assert_eq!(out.mtls, base.mtls);
        assert_eq!(out, base);
    }

    #[test]
    fn test_mtls_round_trip() {
        let spec = MeshMutualTransportLayerSecurity {
            minimum: MutualTransportLayerSecurityMode::Permissive,
        };
        let mut m = mesh("ns", "m");
        m.spec.mtls = Some(spec);
        let out = mesh_to_sdk(&m, None).unwrap();
        assert_eq!(mesh_mtls_from_sdk(&out.mtls.unwrap()).unwrap(), spec);
    }
}
