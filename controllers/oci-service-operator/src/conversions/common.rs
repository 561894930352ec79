//! Conversions shared by several kinds

use crds::{AccessLogging, DefinedTags, FreeformTags, MutualTransportLayerSecurityMode, Port};
use oci_client::models::servicemesh as sdk;
use oci_client::models::{DefinedTags as SdkDefinedTags, FreeformTags as SdkFreeformTags};

use crate::error::ConversionError;

/// Remote tags overlaid with the spec tags; the spec wins on collision
pub fn merge_freeform_tags(spec: &FreeformTags, existing: Option<&SdkFreeformTags>) -> SdkFreeformTags {
    let mut merged = existing.cloned().unwrap_or_default();
    merged.extend(spec.iter().map(|(k, v)| (k.clone(), v.clone())));
    merged
}

/// Defined tags are merged per tag namespace, key by key
pub fn merge_defined_tags(spec: &DefinedTags, existing: Option<&SdkDefinedTags>) -> SdkDefinedTags {
    let mut merged = existing.cloned().unwrap_or_default();
    for (namespace, tags) in spec {
        let entry = merged.entry(namespace.clone()).or_default();
        for (key, value) in tags {
            entry.insert(key.clone(), serde_json::Value::String(value.clone()));
        }
    }
    merged
}

pub fn mtls_mode_to_sdk(mode: MutualTransportLayerSecurityMode) -> sdk::MutualTransportLayerSecurityMode {
    match mode {
        MutualTransportLayerSecurityMode::Disabled => sdk::MutualTransportLayerSecurityMode::Disabled,
        MutualTransportLayerSecurityMode::Permissive => {
            sdk::MutualTransportLayerSecurityMode::Permissive
        }
        MutualTransportLayerSecurityMode::Strict => sdk::MutualTransportLayerSecurityMode::Strict,
    }
}

pub fn mtls_mode_from_sdk(
    mode: sdk::MutualTransportLayerSecurityMode,
) -> Result<MutualTransportLayerSecurityMode, ConversionError> {
    match mode {
        sdk::MutualTransportLayerSecurityMode::Disabled => Ok(MutualTransportLayerSecurityMode::Disabled),
        sdk::MutualTransportLayerSecurityMode::Permissive => {
            Ok(MutualTransportLayerSecurityMode::Permissive)
        }
        sdk::MutualTransportLayerSecurityMode::Strict => Ok(MutualTransportLayerSecurityMode::Strict),
        sdk::MutualTransportLayerSecurityMode::Unknown => Err(ConversionError::UnknownMtlsMode),
    }
}

pub fn access_logging_to_sdk(
    spec: Option<AccessLogging>,
    existing: Option<&sdk::AccessLoggingConfiguration>,
) -> Option<sdk::AccessLoggingConfiguration> {
    match spec {
        Some(logging) => Some(sdk::AccessLoggingConfiguration {
            is_enabled: logging.is_enabled,
        }),
        None => existing.cloned(),
    }
}

pub fn port_from_sdk(port: i32) -> Result<Port, ConversionError> {
    Port::try_from(port).map_err(|_| ConversionError::InvalidPort(port))
}

pub fn path_type_to_sdk(path_type: Option<crds::PathMatchType>) -> Option<sdk::PathType> {
    path_type.map(|p| match p {
        crds::PathMatchType::Prefix => sdk::PathType::Prefix,
    })
}

pub fn path_type_from_sdk(
    path_type: Option<sdk::PathType>,
) -> Result<Option<crds::PathMatchType>, ConversionError> {
    match path_type {
        None => Ok(None),
        Some(sdk::PathType::Prefix) => Ok(Some(crds::PathMatchType::Prefix)),
        Some(sdk::PathType::Unknown) => Err(ConversionError::UnknownVariant("path type")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_patch_crd_tags_with_existing_sdk_tags() {
        let spec: FreeformTags = BTreeMap::from([("freeformTag1".to_string(), "value1".to_string())]);
        let existing: SdkFreeformTags =
            BTreeMap::from([("freeformTag2".to_string(), "value2".to_string())]);

        let merged = merge_freeform_tags(&spec, Some(&existing));
        assert_eq!(
            merged,
            BTreeMap::from([
                ("freeformTag1".to_string(), "value1".to_string()),
                ("freeformTag2".to_string(), "value2".to_string()),
            ])
        );
    }

    #[test]
    fn test_spec_tag_wins_on_collision() {
        let spec: FreeformTags = BTreeMap::from([("team".to_string(), "mesh".to_string())]);
        let existing: SdkFreeformTags = BTreeMap::from([("team".to_string(), "old".to_string())]);
        assert_eq!(merge_freeform_tags(&spec, Some(&existing))["team"], "mesh");
        assert_eq!(merge_freeform_tags(&spec, None)["team"], "mesh");
    }

    #[test]
    fn test_defined_tags_merge_per_namespace() {
        let spec: DefinedTags = BTreeMap::from([(
            "Operations".to_string(),
            BTreeMap::from([("CostCenter".to_string(), "42".to_string())]),
        )]);
        let existing: SdkDefinedTags = BTreeMap::from([(
            "Operations".to_string(),
            BTreeMap::from([
                ("CostCenter".to_string(), serde_json::json!("1")),
                ("Owner".to_string(), serde_json::json!("ops")),
            ]),
        )]);

        let merged = merge_defined_tags(&spec, Some(&existing));
        assert_eq!(merged["Operations"]["CostCenter"], serde_json::json!("42"));
        assert_eq!(merged["Operations"]["Owner"], serde_json::json!("ops"));
    }

    #[test]
    fn test_mtls_mode_is_bijective() {
        for mode in [
            MutualTransportLayerSecurityMode::Disabled,
            MutualTransportLayerSecurityMode::Permissive,
            MutualTransportLayerSecurityMode::Strict,
        ] {
            assert_eq!(mtls_mode_from_sdk(mtls_mode_to_sdk(mode)).unwrap(), mode);
        }
        assert_eq!(
            mtls_mode_from_sdk(sdk::MutualTransportLayerSecurityMode::Unknown).unwrap_err(),
            ConversionError::UnknownMtlsMode
        );
    }

    #[test]
    fn test_port_from_sdk_checks_range() {
        assert_eq!(port_from_sdk(8080).unwrap().get(), 8080);
        assert_eq!(port_from_sdk(0).unwrap_err(), ConversionError::InvalidPort(0));
        assert_eq!(
            port_from_sdk(70000).unwrap_err(),
            ConversionError::InvalidPort(70000)
        );
    }

    #[test]
    fn test_access_logging_keeps_remote_default() {
        let existing = sdk::AccessLoggingConfiguration { is_enabled: true };
        assert_eq!(access_logging_to_sdk(None, Some(&existing)), Some(existing.clone()));
        assert_eq!(
            access_logging_to_sdk(Some(AccessLogging { is_enabled: false }), Some(&existing)),
            Some(sdk::AccessLoggingConfiguration { is_enabled: false })
        );
    }
}
