//! Builders and in-memory fakes shared by unit tests

use std::collections::BTreeMap;
use std::sync::Mutex;

use crds::{
    AccessPolicy, AccessPolicyRule, AccessPolicySpec, AutonomousDatabases, AutonomousDatabasesSpec,
    BindingService, BindingTarget, IngressGateway, IngressGatewayRouteTable,
    IngressGatewayRouteTableSpec, IngressGatewaySpec, IngressGatewayTrafficRouteRule,
    ManagedResource, Mesh, MeshSpec, MySqlDbSystem, MySqlDbSystemSpec, RefOrId, ResourceRef,
    ResourceStatus, Stream, StreamSpec, VirtualDeployment, VirtualDeploymentBinding,
    VirtualDeploymentBindingSpec, VirtualDeploymentSpec, VirtualService, VirtualServiceRouteTable,
    VirtualServiceRouteTableSpec, VirtualServiceSpec, VirtualServiceTrafficRouteRule,
};
use kube::{Resource, ResourceExt};

use crate::error::ServiceManagerError;
use crate::manager::{ResolvedRef, SecretValue};
use crate::resolver::Resolver;
use crate::store::ObjectStore;

pub const COMPARTMENT: &str = "ocid1.compartment.oc1..test";

fn place<K: Resource>(mut resource: K, namespace: &str) -> K {
    let meta = resource.meta_mut();
    meta.namespace = Some(namespace.to_string());
    meta.generation = Some(1);
    resource
}

pub fn mesh(namespace: &str, name: &str) -> Mesh {
    place(
        Mesh::new(
            name,
            MeshSpec {
                display_name: None,
                description: None,
                compartment_id: COMPARTMENT.to_string(),
                certificate_authorities: vec![],
                mtls: None,
                freeform_tags: BTreeMap::new(),
                defined_tags: BTreeMap::new(),
            },
        ),
        namespace,
    )
}

pub fn virtual_service(namespace: &str, name: &str, mesh: RefOrId) -> VirtualService {
    place(
        VirtualService::new(
            name,
            VirtualServiceSpec {
                name: None,
                description: None,
                compartment_id: COMPARTMENT.to_string(),
                mesh,
                default_routing_policy: None,
                hosts: vec![],
                mtls: None,
                freeform_tags: BTreeMap::new(),
                defined_tags: BTreeMap::new(),
            },
        ),
        namespace,
    )
}

pub fn virtual_deployment(namespace: &str, name: &str, virtual_service: RefOrId) -> VirtualDeployment {
    place(
        VirtualDeployment::new(
            name,
            VirtualDeploymentSpec {
                name: None,
                description: None,
                compartment_id: COMPARTMENT.to_string(),
                virtual_service,
                service_discovery: None,
                listener: vec![],
                access_logging: None,
                freeform_tags: BTreeMap::new(),
                defined_tags: BTreeMap::new(),
            },
        ),
        namespace,
    )
}

pub fn virtual_service_route_table(
    namespace: &str,
    name: &str,
    virtual_service: RefOrId,
    route_rules: Vec<VirtualServiceTrafficRouteRule>,
) -> VirtualServiceRouteTable {
    place(
        VirtualServiceRouteTable::new(
            name,
            VirtualServiceRouteTableSpec {
                name: None,
                description: None,
                compartment_id: COMPARTMENT.to_string(),
                virtual_service,
                priority: None,
                route_rules,
                freeform_tags: BTreeMap::new(),
                defined_tags: BTreeMap::new(),
            },
        ),
        namespace,
    )
}

pub fn ingress_gateway(namespace: &str, name: &str, mesh: RefOrId) -> IngressGateway {
    place(
        IngressGateway::new(
            name,
            IngressGatewaySpec {
                name: None,
                description: None,
                compartment_id: COMPARTMENT.to_string(),
                mesh,
                hosts: vec![],
                access_logging: None,
                mtls: None,
                freeform_tags: BTreeMap::new(),
                defined_tags: BTreeMap::new(),
            },
        ),
        namespace,
    )
}

pub fn ingress_gateway_route_table(
    namespace: &str,
    name: &str,
    ingress_gateway: RefOrId,
    route_rules: Vec<IngressGatewayTrafficRouteRule>,
) -> IngressGatewayRouteTable {
    place(
        IngressGatewayRouteTable::new(
            name,
            IngressGatewayRouteTableSpec {
                name: None,
                description: None,
                compartment_id: COMPARTMENT.to_string(),
                ingress_gateway,
                priority: None,
                route_rules,
                freeform_tags: BTreeMap::new(),
                defined_tags: BTreeMap::new(),
            },
        ),
        namespace,
    )
}

pub fn access_policy(
    namespace: &str,
    name: &str,
    mesh: RefOrId,
    rules: Vec<AccessPolicyRule>,
) -> AccessPolicy {
    place(
        AccessPolicy::new(
            name,
            AccessPolicySpec {
                name: None,
                description: None,
                compartment_id: COMPARTMENT.to_string(),
                mesh,
                rules,
                freeform_tags: BTreeMap::new(),
                defined_tags: BTreeMap::new(),
            },
        ),
        namespace,
    )
}

pub fn virtual_deployment_binding(
    namespace: &str,
    name: &str,
    virtual_deployment: RefOrId,
) -> VirtualDeploymentBinding {
    place(
        VirtualDeploymentBinding::new(
            name,
            VirtualDeploymentBindingSpec {
                virtual_deployment,
                target: BindingTarget {
                    service: BindingService {
                        service_ref: ResourceRef::new(name),
                    },
                },
            },
        ),
        namespace,
    )
}

pub fn autonomous_database(namespace: &str, name: &str) -> AutonomousDatabases {
    place(
        AutonomousDatabases::new(
            name,
            AutonomousDatabasesSpec {
                id: None,
                compartment_id: COMPARTMENT.to_string(),
                display_name: None,
                db_name: name.to_string(),
                db_workload: None,
                is_dedicated: false,
                db_version: None,
                data_storage_size_in_tbs: 1,
                cpu_core_count: 1,
                admin_password: None,
                is_auto_scaling_enabled: None,
                is_free_tier: None,
                license_model: None,
                freeform_tags: BTreeMap::new(),
                defined_tags: BTreeMap::new(),
            },
        ),
        namespace,
    )
}

pub fn mysql_db_system(namespace: &str, name: &str) -> MySqlDbSystem {
    place(
        MySqlDbSystem::new(
            name,
            MySqlDbSystemSpec {
                id: None,
                compartment_id: COMPARTMENT.to_string(),
                display_name: None,
                description: None,
                shape_name: "MySQL.VM.Standard.E3.1.8GB".to_string(),
                subnet_id: "ocid1.subnet.oc1..test".to_string(),
                availability_domain: None,
                fault_domain: None,
                configuration_id: None,
                mysql_version: None,
                admin_username: None,
                admin_password: None,
                data_storage_size_in_gbs: None,
                hostname_label: None,
                ip_address: None,
                port: None,
                port_x: None,
                is_highly_available: None,
                freeform_tags: BTreeMap::new(),
                defined_tags: BTreeMap::new(),
            },
        ),
        namespace,
    )
}

pub fn stream(namespace: &str, name: &str) -> Stream {
    place(
        Stream::new(
            name,
            StreamSpec {
                id: None,
                name: None,
                compartment_id: COMPARTMENT.to_string(),
                partitions: 1,
                retention_in_hours: None,
                stream_pool_id: None,
                freeform_tags: BTreeMap::new(),
                defined_tags: BTreeMap::new(),
            },
        ),
        namespace,
    )
}

/// Resolver answering from maps filled by the test
///
/// References are looked up by `RefOrId::key`. An id reference with no entry
/// resolves to itself; a missing ref requeues like an absent sibling object.
#[derive(Debug, Default)]
pub struct MockResolver {
    resolved: Mutex<BTreeMap<String, ResolvedRef>>,
    secrets: Mutex<BTreeMap<String, String>>,
    bindings: Mutex<Vec<VirtualDeploymentBinding>>,
    route_tables: Mutex<Vec<VirtualServiceRouteTable>>,
}

impl MockResolver {
    pub fn insert(&self, key: &str, resolved: ResolvedRef) {
        self.resolved
            .lock()
            .unwrap()
            .insert(key.to_string(), resolved);
    }

    pub fn add_secret(&self, namespace: &str, name: &str, key: &str, value: &str) {
        self.secrets
            .lock()
            .unwrap()
            .insert(format!("{namespace}/{name}/{key}"), value.to_string());
    }

    pub fn add_binding(&self, binding: VirtualDeploymentBinding) {
        self.bindings.lock().unwrap().push(binding);
    }

    pub fn add_route_table(&self, route_table: VirtualServiceRouteTable) {
        self.route_tables.lock().unwrap().push(route_table);
    }

    /// Drop every binding and route table, as if the dependents were deleted
    pub fn clear_dependents(&self) {
        self.bindings.lock().unwrap().clear();
        self.route_tables.lock().unwrap().clear();
    }

    fn lookup(
        &self,
        kind: &str,
        reference: &RefOrId,
        namespace: &str,
    ) -> Result<ResolvedRef, ServiceManagerError> {
        let key = reference.key(namespace);
        if let Some(resolved) = self.resolved.lock().unwrap().get(&key) {
            return Ok(resolved.clone());
        }
        match reference.as_id() {
            Some(id) => Ok(ResolvedRef::from_id(id)),
            None => Err(ServiceManagerError::requeue(format!("{kind} {key} not found"))),
        }
    }
}

#[async_trait::async_trait]
impl Resolver for MockResolver {
    async fn resolve_mesh(
        &self,
        reference: &RefOrId,
        namespace: &str,
    ) -> Result<ResolvedRef, ServiceManagerError> {
        self.lookup("Mesh", reference, namespace)
    }

    async fn resolve_virtual_service(
        &self,
        reference: &RefOrId,
        namespace: &str,
    ) -> Result<ResolvedRef, ServiceManagerError> {
        self.lookup("VirtualService", reference, namespace)
    }

    async fn resolve_virtual_deployment(
        &self,
        reference: &RefOrId,
        namespace: &str,
    ) -> Result<ResolvedRef, ServiceManagerError> {
        self.lookup("VirtualDeployment", reference, namespace)
    }

    async fn resolve_ingress_gateway(
        &self,
        reference: &RefOrId,
        namespace: &str,
    ) -> Result<ResolvedRef, ServiceManagerError> {
        self.lookup("IngressGateway", reference, namespace)
    }

    async fn list_virtual_deployment_bindings(
        &self,
    ) -> Result<Vec<VirtualDeploymentBinding>, ServiceManagerError> {
        Ok(self.bindings.lock().unwrap().clone())
    }

    async fn list_virtual_service_route_tables(
        &self,
    ) -> Result<Vec<VirtualServiceRouteTable>, ServiceManagerError> {
        Ok(self.route_tables.lock().unwrap().clone())
    }

    async fn read_secret(
        &self,
        namespace: &str,
        name: &str,
        key: &str,
    ) -> Result<SecretValue, ServiceManagerError> {
        self.secrets
            .lock()
            .unwrap()
            .get(&format!("{namespace}/{name}/{key}"))
            .map(|value| SecretValue::new(value.as_str()))
            .ok_or_else(|| ServiceManagerError::requeue(format!("secret {namespace}/{name} not found")))
    }
}

/// [`ObjectStore`] recording every write
#[derive(Debug, Default)]
pub struct InMemoryObjectStore {
    statuses: Mutex<Vec<ResourceStatus>>,
    finalizers: Mutex<Vec<String>>,
    removed_finalizers: Mutex<Vec<String>>,
}

impl InMemoryObjectStore {
    pub fn status_writes(&self) -> usize {
        self.statuses.lock().unwrap().len()
    }

    pub fn last_status(&self) -> Option<ResourceStatus> {
        self.statuses.lock().unwrap().last().cloned()
    }

    /// Every status written, oldest first
    pub fn statuses(&self) -> Vec<ResourceStatus> {
        self.statuses.lock().unwrap().clone()
    }

    pub fn finalizers_added(&self) -> Vec<String> {
        self.finalizers.lock().unwrap().clone()
    }

    pub fn finalizers_removed(&self) -> Vec<String> {
        self.removed_finalizers.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl<K: ManagedResource> ObjectStore<K> for InMemoryObjectStore {
    async fn patch_status(&self, resource: &K) -> Result<(), kube::Error> {
        self.statuses
            .lock()
            .unwrap()
            .push(resource.resource_status().cloned().unwrap_or_default());
        Ok(())
    }

    async fn add_finalizer(&self, resource: &K, finalizer: &str) -> Result<(), kube::Error> {
        if !resource.finalizers().iter().any(|f| f == finalizer) {
            self.finalizers.lock().unwrap().push(finalizer.to_string());
        }
        Ok(())
    }

    async fn remove_finalizer(&self, _resource: &K, finalizer: &str) -> Result<(), kube::Error> {
        self.removed_finalizers
            .lock()
            .unwrap()
            .push(finalizer.to_string());
        Ok(())
    }
}
