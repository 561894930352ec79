//! The per-kind adapter interface of the service manager.

use std::collections::BTreeMap;
use std::fmt::Debug;

use crds::{ManagedResource, RefOrId, ResourceStatus};
use oci_client::{OciError, RemoteResource};

use crate::error::{ConversionError, ServiceManagerError};
use crate::validator;

/// A secret value read from the cluster. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretValue(String);

impl SecretValue {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl Debug for SecretValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SecretValue(<redacted>)")
    }
}

/// A reference resolved to its remote identity
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedRef {
    pub id: String,
    /// Remote name of the referenced resource, when known
    pub name: Option<String>,
    /// Id of the referenced resource's own parent, when known
    pub parent_id: Option<String>,
}

impl ResolvedRef {
    pub fn from_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }
}

/// Everything a kind's spec points at, resolved for one reconcile pass
#[derive(Debug, Clone, Default)]
pub struct ResolvedDependencies {
    /// The resource's direct parent (mesh, virtual service or ingress gateway)
    pub parent: Option<ResolvedRef>,
    /// Other references (route destinations, policy targets) keyed by `RefOrId::key`
    pub references: BTreeMap<String, ResolvedRef>,
    /// Secret values keyed by field name
    pub secrets: BTreeMap<String, SecretValue>,
}

impl ResolvedDependencies {
    pub fn with_parent(parent: ResolvedRef) -> Self {
        Self {
            parent: Some(parent),
            ..Default::default()
        }
    }

    pub fn insert_reference(&mut self, reference: &RefOrId, namespace: &str, resolved: ResolvedRef) {
        self.references.insert(reference.key(namespace), resolved);
    }

    pub fn insert_secret(&mut self, field: impl Into<String>, value: SecretValue) {
        self.secrets.insert(field.into(), value);
    }

    pub fn parent_id(&self) -> Result<&str, ConversionError> {
        self.parent
            .as_ref()
            .map(|p| p.id.as_str())
            .ok_or_else(|| ConversionError::MissingDependency("parent".to_string()))
    }

    /// Remote id for a reference: the id itself, or the resolved id of an in-cluster ref
    pub fn lookup_id(&self, reference: &RefOrId, namespace: &str) -> Result<String, ConversionError> {
        match reference {
            RefOrId::Id(id) => Ok(id.clone()),
            RefOrId::Ref(r) => {
                let key = r.key(namespace);
                self.references
                    .get(&key)
                    .map(|resolved| resolved.id.clone())
                    .ok_or(ConversionError::MissingDependency(key))
            }
        }
    }

    pub fn secret(&self, field: &str) -> Option<&SecretValue> {
        self.secrets.get(field)
    }
}

/// Scratch state of one reconcile pass. Each stage returns a new value.
#[derive(Debug, Clone)]
pub struct ResourceDetails<S> {
    pub dependencies: ResolvedDependencies,
    /// Remote object as last fetched
    pub current: Option<S>,
    /// Remote object built from the spec
    pub desired: Option<S>,
    pub opc_retry_token: Option<String>,
}

impl<S> ResourceDetails<S> {
    pub fn new(dependencies: ResolvedDependencies) -> Self {
        Self {
            dependencies,
            current: None,
            desired: None,
            opc_retry_token: None,
        }
    }

    #[must_use]
    pub fn with_current(self, current: Option<S>) -> Self {
        Self { current, ..self }
    }

    #[must_use]
    pub fn with_desired(self, desired: S) -> Self {
        Self {
            desired: Some(desired),
            ..self
        }
    }

    #[must_use]
    pub fn with_retry_token(self, token: Option<String>) -> Self {
        Self {
            opc_retry_token: token,
            ..self
        }
    }

    pub fn has_sdk(&self) -> bool {
        self.current.is_some()
    }
}

/// Plugs one custom resource kind into the generic service manager
#[async_trait::async_trait]
pub trait CustomResourceHandler: Send + Sync + 'static {
    type Resource: ManagedResource;
    type Sdk: RemoteResource + PartialEq + Debug;

    /// Kind name used in logs and messages
    const KIND: &'static str;

    fn finalizer(&self) -> &'static str;

    /// Resolve every reference and secret the spec needs
    async fn resolve_dependencies(
        &self,
        resource: &Self::Resource,
    ) -> Result<ResolvedDependencies, ServiceManagerError>;

    async fn get_resource(&self, id: &str) -> Result<Self::Sdk, OciError>;

    /// Build the desired remote object. `base` is the current remote object,
    /// `None` when building a create request.
    fn build_sdk(
        &self,
        resource: &Self::Resource,
        base: Option<&Self::Sdk>,
        dependencies: &ResolvedDependencies,
    ) -> Result<Self::Sdk, ConversionError>;

    async fn create_resource(
        &self,
        sdk: &Self::Sdk,
        opc_retry_token: &str,
    ) -> Result<Self::Sdk, OciError>;

    async fn update_resource(&self, sdk: &Self::Sdk) -> Result<(), OciError>;

    async fn change_compartment(&self, id: &str, compartment_id: &str) -> Result<(), OciError>;

    async fn delete_resource(&self, id: &str) -> Result<(), OciError>;

    fn verify_resource_status(&self, sdk: &Self::Sdk) -> Result<(), ServiceManagerError> {
        validator::validate_cp(Self::KIND, sdk)
    }

    /// Copy kind-specific parent fields into the status
    fn update_status(
        &self,
        _status: &mut ResourceStatus,
        _sdk: &Self::Sdk,
        _dependencies: &ResolvedDependencies,
    ) {
    }

    fn has_compartment_id_changed(&self, resource: &Self::Resource, sdk: &Self::Sdk) -> bool {
        resource.compartment_id() != sdk.compartment_id()
    }

    /// Checks that must pass before the remote object is deleted
    async fn finalize(&self, _resource: &Self::Resource) -> Result<(), ServiceManagerError> {
        Ok(())
    }
}
