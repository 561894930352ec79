//! Cross-resource references for OCI CRDs
//!
//! A parent resource can be named two ways: by a Kubernetes reference to a
//! sibling custom resource in the cluster, or by the OCID of a remote resource
//! that is not managed from this cluster. On the wire both are carried in the
//! same object (`{ref: {namespace, name}}` or `{id: "ocid1..."}`); in Rust the
//! choice is a two-variant enum so "both set" and "neither set" cannot be
//! represented once an object has been decoded.

use std::borrow::Cow;

use schemars::{JsonSchema, Schema, SchemaGenerator};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reference to a sibling custom resource by namespace and name
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "camelCase")]
pub struct ResourceRef {
    /// Namespace of the referenced resource (defaults to the namespace of the referencing resource)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    /// Name of the referenced resource
    pub name: String,
}

impl ResourceRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            namespace: None,
            name: name.into(),
        }
    }

    pub fn with_namespace(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: Some(namespace.into()),
            name: name.into(),
        }
    }

    /// Namespace to look the referenced resource up in
    pub fn namespace_or<'a>(&'a self, default_namespace: &'a str) -> &'a str {
        match self.namespace.as_deref() {
            Some(ns) if !ns.is_empty() => ns,
            _ => default_namespace,
        }
    }

    /// `namespace/name` key, filling in the default namespace
    pub fn key(&self, default_namespace: &str) -> String {
        format!("{}/{}", self.namespace_or(default_namespace), self.name)
    }
}

/// Errors raised when a reference object carries an invalid combination of fields
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RefOrIdError {
    #[error("spec contains both ref and id")]
    BothSet,

    #[error("spec has neither ref nor id")]
    NeitherSet,
}

/// Reference to a parent resource, either in-cluster or by OCID
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RefOrIdFields", into = "RefOrIdFields")]
pub enum RefOrId {
    /// Sibling custom resource in the cluster
    Ref(ResourceRef),
    /// OCID of an existing remote resource
    Id(String),
}

/// Raw wire shape of [`RefOrId`]
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RefOrIdFields {
    /// Reference to a custom resource in the cluster
    #[serde(default, rename = "ref", skip_serializing_if = "Option::is_none")]
    pub resource_ref: Option<ResourceRef>,

    /// OCID of the remote resource
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl RefOrIdFields {
    /// Check the exactly-one-of rule without consuming the fields
    pub fn validate(&self) -> Result<(), RefOrIdError> {
        let has_id = self.id.as_deref().is_some_and(|id| !id.is_empty());
        match (self.resource_ref.is_some(), has_id) {
            (true, true) => Err(RefOrIdError::BothSet),
            (false, false) => Err(RefOrIdError::NeitherSet),
            _ => Ok(()),
        }
    }
}

impl TryFrom<RefOrIdFields> for RefOrId {
    type Error = RefOrIdError;

    fn try_from(fields: RefOrIdFields) -> Result<Self, Self::Error> {
        fields.validate()?;
        match (fields.resource_ref, fields.id) {
            (Some(r), _) => Ok(RefOrId::Ref(r)),
            (None, Some(id)) => Ok(RefOrId::Id(id)),
            (None, None) => Err(RefOrIdError::NeitherSet),
        }
    }
}

impl From<RefOrId> for RefOrIdFields {
    fn from(value: RefOrId) -> Self {
        match value {
            RefOrId::Ref(r) => RefOrIdFields {
                resource_ref: Some(r),
                id: None,
            },
            RefOrId::Id(id) => RefOrIdFields {
                resource_ref: None,
                id: Some(id),
            },
        }
    }
}

impl JsonSchema for RefOrId {
    fn schema_name() -> Cow<'static, str> {
        "RefOrId".into()
    }

    fn json_schema(generator: &mut SchemaGenerator) -> Schema {
        <RefOrIdFields as JsonSchema>::json_schema(generator)
    }
}

impl RefOrId {
    pub fn from_ref(name: impl Into<String>) -> Self {
        RefOrId::Ref(ResourceRef::new(name))
    }

    pub fn from_id(id: impl Into<String>) -> Self {
        RefOrId::Id(id.into())
    }

    pub fn as_ref_parts(&self) -> Option<&ResourceRef> {
        match self {
            RefOrId::Ref(r) => Some(r),
            RefOrId::Id(_) => None,
        }
    }

    pub fn as_id(&self) -> Option<&str> {
        match self {
            RefOrId::Ref(_) => None,
            RefOrId::Id(id) => Some(id),
        }
    }

    /// Stable key: `namespace/name` for references, the OCID otherwise
    pub fn key(&self, default_namespace: &str) -> String {
        match self {
            RefOrId::Ref(r) => r.key(default_namespace),
            RefOrId::Id(id) => id.clone(),
        }
    }

    /// Whether this points at the in-cluster resource `namespace/name` or remote `id`
    pub fn points_at(
        &self,
        default_namespace: &str,
        namespace: &str,
        name: &str,
        id: Option<&str>,
    ) -> bool {
        match self {
            RefOrId::Ref(r) => r.namespace_or(default_namespace) == namespace && r.name == name,
            RefOrId::Id(ref_id) => id.is_some_and(|id| id == ref_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_ref_form() {
        let value: RefOrId =
            serde_json::from_value(json!({"ref": {"namespace": "mesh-ns", "name": "my-mesh"}}))
                .unwrap();
        assert_eq!(
            value,
            RefOrId::Ref(ResourceRef::with_namespace("mesh-ns", "my-mesh"))
        );
        assert_eq!(value.key("default"), "mesh-ns/my-mesh");
    }

    #[test]
    fn test_decode_id_form() {
        let value: RefOrId = serde_json::from_value(json!({"id": "ocid1.mesh.oc1..aaa"})).unwrap();
        assert_eq!(value.as_id(), Some("ocid1.mesh.oc1..aaa"));
        assert_eq!(value.key("default"), "ocid1.mesh.oc1..aaa");
    }

    #[test]
    fn test_both_set_is_rejected() {
        let err = serde_json::from_value::<RefOrId>(
            json!({"ref": {"name": "my-mesh"}, "id": "ocid1.mesh.oc1..aaa"}),
        )
        .unwrap_err();
        assert!(err.to_string().contains("spec contains both ref and id"));
    }

    #[test]
    fn test_neither_set_is_rejected() {
        let err = serde_json::from_value::<RefOrId>(json!({})).unwrap_err();
        assert!(err.to_string().contains("spec has neither ref nor id"));
    }

    #[test]
    fn test_ref_serializes_without_id() {
        let value = serde_json::to_value(RefOrId::from_ref("vs")).unwrap();
        assert_eq!(value, json!({"ref": {"name": "vs"}}));
    }

    #[test]
    fn test_namespace_defaults() {
        let r = ResourceRef::new("vd");
        assert_eq!(r.key("apps"), "apps/vd");
        let r = ResourceRef {
            namespace: Some(String::new()),
            name: "vd".to_string(),
        };
        assert_eq!(r.namespace_or("apps"), "apps");
    }

    #[test]
    fn test_points_at() {
        let by_ref = RefOrId::from_ref("vd");
        assert!(by_ref.points_at("apps", "apps", "vd", None));
        assert!(!by_ref.points_at("apps", "other", "vd", None));

        let by_id = RefOrId::from_id("ocid1.vd");
        assert!(by_id.points_at("apps", "apps", "whatever", Some("ocid1.vd")));
        assert!(!by_id.points_at("apps", "apps", "whatever", None));
    }
}
