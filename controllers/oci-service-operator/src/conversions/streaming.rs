//! Stream conversions

use crds::{ManagedResource, Stream};
use oci_client::models::streaming as sdk;

use super::common::{merge_defined_tags, merge_freeform_tags};
use crate::error::ConversionError;

/// Name, partitions and retention are fixed at create time
pub fn stream_to_sdk(stream: &Stream, base: Option<&sdk::Stream>) -> Result<sdk::Stream, ConversionError> {
    let spec = &stream.spec;
    let mut out = base.cloned().unwrap_or_default();

    out.compartment_id = spec.compartment_id.clone();
    if base.is_none() {
        out.name = stream.display_name();
        out.partitions = spec.partitions;
        out.retention_in_hours = spec.retention_in_hours;
    }
    if spec.stream_pool_id.is_some() {
        out.stream_pool_id = spec.stream_pool_id.clone();
    }
    out.freeform_tags = merge_freeform_tags(&spec.freeform_tags, base.map(|b| &b.freeform_tags));
    out.defined_tags = merge_defined_tags(&spec.defined_tags, base.map(|b| &b.defined_tags));
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    use crate::test_utils::stream;

    #[test]
    fn test_create_request() {
        let mut s = stream("ns", "events");
        s.spec.retention_in_hours = Some(48);
        let out = stream_to_sdk(&s, None).unwrap();
        assert_eq!(out.name, "ns/events");
        assert_eq!(out.partitions, 1);
        assert_eq!(out.retention_in_hours, Some(48));
        assert_eq!(out.stream_pool_id, None);
    }

    #[test]
    fn test_update_keeps_partitions_and_pool() {
        let mut s = stream("ns", "events");
        s.spec.partitions = 8;
        s.spec.freeform_tags = BTreeMap::from([("team".to_string(), "data".to_string())]);
        let base = sdk::Stream {
            id: "ocid1.stream".to_string(),
            name: "ns/events".to_string(),
            compartment_id: "ocid1.compartment.oc1..test".to_string(),
            partitions: 1,
            stream_pool_id: Some("ocid1.streampool.default".to_string()),
            messages_endpoint: Some("https://cell-1.streaming.example".to_string()),
            ..Default::default()
        };
        let out = stream_to_sdk(&s, Some(&base)).unwrap();
        assert_eq!(out.partitions, 1);
        assert_eq!(out.stream_pool_id.as_deref(), Some("ocid1.streampool.default"));
        assert_eq!(out.messages_endpoint, base.messages_endpoint);
        assert_eq!(out.freeform_tags["team"], "data");
    }
}
