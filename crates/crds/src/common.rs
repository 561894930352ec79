//! Types shared across OCI CRDs

use std::collections::BTreeMap;
use std::fmt::Debug;

use kube::{Resource, ResourceExt};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::status::ResourceStatus;

/// Simple key/value tags
pub type FreeformTags = BTreeMap<String, String>;

/// Tags grouped by tag namespace
pub type DefinedTags = BTreeMap<String, BTreeMap<String, String>>;

/// TCP port in the range 1..=65535
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(try_from = "i32", into = "i32")]
pub struct Port(#[schemars(range(min = 1, max = 65535))] i32);

impl Port {
    pub fn get(self) -> i32 {
        self.0
    }
}

impl TryFrom<i32> for Port {
    type Error = String;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        if (1..=65535).contains(&value) {
            Ok(Port(value))
        } else {
            Err(format!("port {value} is outside 1-65535"))
        }
    }
}

impl From<Port> for i32 {
    fn from(port: Port) -> Self {
        port.0
    }
}

/// Reference to a Kubernetes secret in the resource's namespace
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SecretRef {
    pub secret_name: String,
}

/// Wrapper matching `{secret: {secretName: ...}}`
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SecretSource {
    pub secret: SecretRef,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MutualTransportLayerSecurityMode {
    Disabled,
    Permissive,
    Strict,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AccessLogging {
    #[serde(default)]
    pub is_enabled: bool,
}

/// Custom resources whose lifecycle is driven by the service manager
pub trait ManagedResource:
    Resource<DynamicType = ()> + Clone + Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    fn resource_status(&self) -> Option<&ResourceStatus>;

    fn resource_status_mut(&mut self) -> &mut ResourceStatus;

    fn compartment_id(&self) -> &str;

    /// Display name from the spec, if any
    fn spec_name(&self) -> Option<&str>;

    /// OCID of a pre-existing remote resource to bind to, if the kind supports binding
    fn bound_id(&self) -> Option<&str> {
        None
    }

    /// `status.id`, or the bound id before the first status write
    fn remote_id(&self) -> Option<&str> {
        self.resource_status()
            .and_then(ResourceStatus::remote_id)
            .or_else(|| self.bound_id().filter(|id| !id.is_empty()))
    }

    fn namespace_or_default(&self) -> String {
        self.namespace().unwrap_or_else(|| "default".to_string())
    }

    /// `namespace/name`
    fn object_key(&self) -> String {
        format!("{}/{}", self.namespace_or_default(), self.name_any())
    }

    /// Display name sent to OCI: the spec name or `namespace/name`
    fn display_name(&self) -> String {
        match self.spec_name() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => self.object_key(),
        }
    }

    fn generation(&self) -> i64 {
        self.meta().generation.unwrap_or_default()
    }

    fn is_deleting(&self) -> bool {
        self.meta().deletion_timestamp.is_some()
    }
}

/// Implements [`ManagedResource`] for a kind whose spec has `compartment_id`
/// and a name field, and whose status is [`ResourceStatus`]
#[macro_export]
macro_rules! managed_resource {
    ($kind:ty, name = $name:ident $(, bound = $bound:ident)?) => {
        impl $crate::common::ManagedResource for $kind {
            fn resource_status(&self) -> Option<&$crate::status::ResourceStatus> {
                self.status.as_ref()
            }

            fn resource_status_mut(&mut self) -> &mut $crate::status::ResourceStatus {
                self.status.get_or_insert_with(Default::default)
            }

            fn compartment_id(&self) -> &str {
                &self.spec.compartment_id
            }

            fn spec_name(&self) -> Option<&str> {
                self.spec.$name.as_deref()
            }

            $(
                fn bound_id(&self) -> Option<&str> {
                    self.spec.$bound.as_deref()
                }
            )?
        }
    };
}
