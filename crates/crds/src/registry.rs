//! Registry of the CRDs served by the operator
//!
//! Built explicitly at startup (and by `crdgen`) instead of through global
//! registration side effects.

use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1::CustomResourceDefinition;
use kube::CustomResourceExt;

use crate::database::{AutonomousDatabases, MySqlDbSystem};
use crate::servicemesh::{
    AccessPolicy, IngressGateway, IngressGatewayRouteTable, Mesh, VirtualDeployment,
    VirtualDeploymentBinding, VirtualService, VirtualServiceRouteTable,
};
use crate::streaming::Stream;

/// CRD definition with its cluster-wide name
#[derive(Debug, Clone)]
pub struct CrdDef {
    pub name: &'static str,
    pub kind: String,
    pub crd: CustomResourceDefinition,
}

#[derive(Debug, Clone, Default)]
pub struct CrdRegistry {
    defs: Vec<CrdDef>,
}

impl CrdRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every kind this operator reconciles
    pub fn with_all_kinds() -> Self {
        let mut registry = Self::new();
        register_all(&mut registry);
        registry
    }

    pub fn register<K: CustomResourceExt>(&mut self) -> &mut Self {
        let name = K::crd_name();
        if !self.defs.iter().any(|d| d.name == name) {
            let crd = K::crd();
            self.defs.push(CrdDef {
                name,
                kind: crd.spec.names.kind.clone(),
                crd,
            });
        }
        self
    }

    pub fn definitions(&self) -> &[CrdDef] {
        &self.defs
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.defs.iter().map(|d| d.name)
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    /// Render every registered CRD as a multi-document YAML stream
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        let mut out = String::new();
        for def in &self.defs {
            out.push_str("---\n");
            out.push_str(&serde_yaml::to_string(&def.crd)?);
        }
        Ok(out)
    }
}

pub fn register_all(registry: &mut CrdRegistry) {
    registry
        .register::<Mesh>()
        .register::<VirtualService>()
        .register::<VirtualDeployment>()
        .register::<VirtualServiceRouteTable>()
        .register::<IngressGateway>()
        .register::<IngressGatewayRouteTable>()
        .register::<AccessPolicy>()
        .register::<VirtualDeploymentBinding>()
        .register::<AutonomousDatabases>()
        .register::<MySqlDbSystem>()
        .register::<Stream>();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_holds_every_kind_once() {
        let mut registry = CrdRegistry::with_all_kinds();
        assert_eq!(registry.len(), 11);
        registry.register::<Mesh>();
        assert_eq!(registry.len(), 11);
        assert!(registry.names().any(|n| n == "meshes.servicemesh.oci.oracle.com"));
        assert!(registry.names().any(|n| n == "streams.oci.oracle.com"));
    }

    #[test]
    fn test_kinds_resolved() {
        let registry = CrdRegistry::with_all_kinds();
        let kinds: Vec<&str> = registry.definitions().iter().map(|d| d.kind.as_str()).collect();
        assert!(kinds.contains(&"VirtualDeploymentBinding"));
        assert!(kinds.contains(&"AutonomousDatabases"));
    }

    #[test]
    fn test_yaml_has_one_document_per_crd() {
        let registry = CrdRegistry::with_all_kinds();
        let yaml = registry.to_yaml().unwrap();
        assert_eq!(yaml.matches("---\n").count(), registry.len());
        assert!(yaml.contains("kind: CustomResourceDefinition"));
    }
}
