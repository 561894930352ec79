//! Service mesh HTTP client
//!
//! Create bodies carry every create-time field; update bodies only the
//! fields the service lets callers change after creation.

use serde_json::{json, Value};

use crate::common::{strip_nulls, HttpClient};
use crate::error::OciError;
use crate::models::servicemesh::*;
use crate::oci_trait::ServiceMeshClient;

pub struct ServiceMeshHttpClient {
    http: HttpClient,
}

impl ServiceMeshHttpClient {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }
}

fn change_compartment_body(compartment_id: &str) -> Value {
    json!({ "compartmentId": compartment_id })
}

pub(crate) fn mesh_create_body(mesh: &Mesh) -> Value {
    strip_nulls(json!({
        "compartmentId": mesh.compartment_id,
        "displayName": mesh.display_name,
        "description": mesh.description,
        "certificateAuthorities": mesh.certificate_authorities,
        "mtls": mesh.mtls,
        "freeformTags": mesh.freeform_tags,
        "definedTags": mesh.defined_tags,
    }))
}

pub(crate) fn mesh_update_body(mesh: &Mesh) -> Value {
    strip_nulls(json!({
        "displayName": mesh.display_name,
        "description": mesh.description,
        "mtls": mesh.mtls,
        "freeformTags": mesh.freeform_tags,
        "definedTags": mesh.defined_tags,
    }))
}

pub(crate) fn virtual_service_create_body(vs: &VirtualService) -> Value {
    strip_nulls(json!({
        "compartmentId": vs.compartment_id,
        "meshId": vs.mesh_id,
        "name": vs.name,
        "description": vs.description,
        "defaultRoutingPolicy": vs.default_routing_policy,
        "hosts": vs.hosts,
        "mtls": mtls_details(vs.mtls.as_ref()),
        "freeformTags": vs.freeform_tags,
        "definedTags": vs.defined_tags,
    }))
}

pub(crate) fn virtual_service_update_body(vs: &VirtualService) -> Value {
    strip_nulls(json!({
        "description": vs.description,
        "defaultRoutingPolicy": vs.default_routing_policy,
        "hosts": vs.hosts,
        "mtls": mtls_details(vs.mtls.as_ref()),
        "freeformTags": vs.freeform_tags,
        "definedTags": vs.defined_tags,
    }))
}

// The service-assigned certificate id is never sent back.
fn mtls_details(mtls: Option<&MutualTransportLayerSecurity>) -> Value {
    match mtls {
        Some(m) => json!({ "mode": m.mode, "maximumValidity": m.maximum_validity }),
        None => Value::Null,
    }
}

pub(crate) fn virtual_deployment_create_body(vd: &VirtualDeployment) -> Value {
    strip_nulls(json!({
        "compartmentId": vd.compartment_id,
        "virtualServiceId": vd.virtual_service_id,
        "name": vd.name,
        "description": vd.description,
        "serviceDiscovery": vd.service_discovery,
        "listeners": vd.listeners,
        "accessLogging": vd.access_logging,
        "freeformTags": vd.freeform_tags,
        "definedTags": vd.defined_tags,
    }))
}

pub(crate) fn virtual_deployment_update_body(vd: &VirtualDeployment) -> Value {
    strip_nulls(json!({
        "description": vd.description,
        "serviceDiscovery": vd.service_discovery,
        "listeners": vd.listeners,
        "accessLogging": vd.access_logging,
        "freeformTags": vd.freeform_tags,
        "definedTags": vd.defined_tags,
    }))
}

pub(crate) fn virtual_service_route_table_create_body(vsrt: &VirtualServiceRouteTable) -> Value {
    strip_nulls(json!({
        "compartmentId": vsrt.compartment_id,
        "virtualServiceId": vsrt.virtual_service_id,
        "name": vsrt.name,
        "description": vsrt.description,
        "priority": vsrt.priority,
        "routeRules": vsrt.route_rules,
        "freeformTags": vsrt.freeform_tags,
        "definedTags": vsrt.defined_tags,
    }))
}

pub(crate) fn virtual_service_route_table_update_body(vsrt: &VirtualServiceRouteTable) -> Value {
    strip_nulls(json!({
        "description": vsrt.description,
        "priority": vsrt.priority,
        "routeRules": vsrt.route_rules,
        "freeformTags": vsrt.freeform_tags,
        "definedTags": vsrt.defined_tags,
    }))
}

pub(crate) fn ingress_gateway_create_body(ig: &IngressGateway) -> Value {
    strip_nulls(json!({
        "compartmentId": ig.compartment_id,
        "meshId": ig.mesh_id,
        "name": ig.name,
        "description": ig.description,
        "hosts": ig.hosts,
        "accessLogging": ig.access_logging,
        "mtls": ig.mtls.as_ref().map(|m| json!({ "maximumValidity": m.maximum_validity })),
        "freeformTags": ig.freeform_tags,
        "definedTags": ig.defined_tags,
    }))
}

pub(crate) fn ingress_gateway_update_body(ig: &IngressGateway) -> Value {
    strip_nulls(json!({
        "description": ig.description,
        "hosts": ig.hosts,
        "accessLogging": ig.access_logging,
        "mtls": ig.mtls.as_ref().map(|m| json!({ "maximumValidity": m.maximum_validity })),
        "freeformTags": ig.freeform_tags,
        "definedTags": ig.defined_tags,
    }))
}

pub(crate) fn ingress_gateway_route_table_create_body(igrt: &IngressGatewayRouteTable) -> Value {
    strip_nulls(json!({
        "compartmentId": igrt.compartment_id,
        "ingressGatewayId": igrt.ingress_gateway_id,
        "name": igrt.name,
        "description": igrt.description,
        "priority": igrt.priority,
        "routeRules": igrt.route_rules,
        "freeformTags": igrt.freeform_tags,
        "definedTags": igrt.defined_tags,
    }))
}

pub(crate) fn ingress_gateway_route_table_update_body(igrt: &IngressGatewayRouteTable) -> Value {
    strip_nulls(json!({
        "description": igrt.description,
        "priority": igrt.priority,
        "routeRules": igrt.route_rules,
        "freeformTags": igrt.freeform_tags,
        "definedTags": igrt.defined_tags,
    }))
}

pub(crate) fn access_policy_create_body(ap: &AccessPolicy) -> Value {
    strip_nulls(json!({
        "compartmentId": ap.compartment_id,
        "meshId": ap.mesh_id,
        "name": ap.name,
        "description": ap.description,
        "rules": ap.rules,
        "freeformTags": ap.freeform_tags,
        "definedTags": ap.defined_tags,
    }))
}

pub(crate) fn access_policy_update_body(ap: &AccessPolicy) -> Value {
    strip_nulls(json!({
        "description": ap.description,
        "rules": ap.rules,
        "freeformTags": ap.freeform_tags,
        "definedTags": ap.defined_tags,
    }))
}

#[async_trait::async_trait]
impl ServiceMeshClient for ServiceMeshHttpClient {
    async fn get_mesh(&self, id: &str) -> Result<Mesh, OciError> {
        self.http.get(&format!("/meshes/{}", id)).await
    }

    async fn create_mesh(&self, mesh: &Mesh, opc_retry_token: &str) -> Result<Mesh, OciError> {
        self.http.create("/meshes", &mesh_create_body(mesh), opc_retry_token).await
    }

    async fn update_mesh(&self, mesh: &Mesh) -> Result<(), OciError> {
        self.http.put(&format!("/meshes/{}", mesh.id), &mesh_update_body(mesh)).await
    }

    async fn delete_mesh(&self, id: &str) -> Result<(), OciError> {
        self.http.delete(&format!("/meshes/{}", id)).await
    }

    async fn change_mesh_compartment(&self, id: &str, compartment_id: &str) -> Result<(), OciError> {
        self.http
            .action(
                &format!("/meshes/{}/actions/changeCompartment", id),
                &change_compartment_body(compartment_id),
            )
            .await
    }

    async fn get_virtual_service(&self, id: &str) -> Result<VirtualService, OciError> {
        self.http.get(&format!("/virtualServices/{}", id)).await
    }

    async fn create_virtual_service(&self, vs: &VirtualService, opc_retry_token: &str) -> Result<VirtualService, OciError> {
        self.http
            .create("/virtualServices", &virtual_service_create_body(vs), opc_retry_token)
            .await
    }

    async fn update_virtual_service(&self, vs: &VirtualService) -> Result<(), OciError> {
        self.http
            .put(&format!("/virtualServices/{}", vs.id), &virtual_service_update_body(vs))
            .await
    }

    async fn delete_virtual_service(&self, id: &str) -> Result<(), OciError> {
        self.http.delete(&format!("/virtualServices/{}", id)).await
    }

    async fn change_virtual_service_compartment(&self, id: &str, compartment_id: &str) -> Result<(), OciError> {
        self.http
            .action(
                &format!("/virtualServices/{}/actions/changeCompartment", id),
                &change_compartment_body(compartment_id),
            )
            .await
    }

    async fn get_virtual_deployment(&self, id: &str) -> Result<VirtualDeployment, OciError> {
        self.http.get(&format!("/virtualDeployments/{}", id)).await
    }

    async fn create_virtual_deployment(&self, vd: &VirtualDeployment, opc_retry_token: &str) -> Result<VirtualDeployment, OciError> {
        self.http
            .create("/virtualDeployments", &virtual_deployment_create_body(vd), opc_retry_token)
            .await
    }

    async fn update_virtual_deployment(&self, vd: &VirtualDeployment) -> Result<(), OciError> {
        self.http
            .put(&format!("/virtualDeployments/{}", vd.id), &virtual_deployment_update_body(vd))
            .await
    }

    async fn delete_virtual_deployment(&self, id: &str) -> Result<(), OciError> {
        self.http.delete(&format!("/virtualDeployments/{}", id)).await
    }

    async fn change_virtual_deployment_compartment(&self, id: &str, compartment_id: &str) -> Result<(), OciError> {
        self.http
            .action(
                &format!("/virtualDeployments/{}/actions/changeCompartment", id),
                &change_compartment_body(compartment_id),
            )
            .await
    }

    async fn get_virtual_service_route_table(&self, id: &str) -> Result<VirtualServiceRouteTable, OciError> {
        self.http.get(&format!("/virtualServiceRouteTables/{}", id)).await
    }

    async fn create_virtual_service_route_table(&self, vsrt: &VirtualServiceRouteTable, opc_retry_token: &str) -> Result<VirtualServiceRouteTable, OciError> {
        self.http
            .create(
                "/virtualServiceRouteTables",
                &virtual_service_route_table_create_body(vsrt),
                opc_retry_token,
            )
            .await
    }

    async fn update_virtual_service_route_table(&self, vsrt: &VirtualServiceRouteTable) -> Result<(), OciError> {
        self.http
            .put(
                &format!("/virtualServiceRouteTables/{}", vsrt.id),
                &virtual_service_route_table_update_body(vsrt),
            )
            .await
    }

    async fn delete_virtual_service_route_table(&self, id: &str) -> Result<(), OciError> {
        self.http.delete(&format!("/virtualServiceRouteTables/{}", id)).await
    }

    async fn change_virtual_service_route_table_compartment(&self, id: &str, compartment_id: &str) -> Result<(), OciError> {
        self.http
            .action(
                &format!("/virtualServiceRouteTables/{}/actions/changeCompartment", id),
                &change_compartment_body(compartment_id),
            )
            .await
    }

    async fn get_ingress_gateway(&self, id: &str) -> Result<IngressGateway, OciError> {
        self.http.get(&format!("/ingressGateways/{}", id)).await
    }

    async fn create_ingress_gateway(&self, ig: &IngressGateway, opc_retry_token: &str) -> Result<IngressGateway, OciError> {
        self.http
            .create("/ingressGateways", &ingress_gateway_create_body(ig), opc_retry_token)
            .await
    }

    async fn update_ingress_gateway(&self, ig: &IngressGateway) -> Result<(), OciError> {
        self.http
            .put(&format!("/ingressGateways/{}", ig.id), &ingress_gateway_update_body(ig))
            .await
    }

    async fn delete_ingress_gateway(&self, id: &str) -> Result<(), OciError> {
        self.http.delete(&format!("/ingressGateways/{}", id)).await
    }

    async fn change_ingress_gateway_compartment(&self, id: &str, compartment_id: &str) -> Result<(), OciError> {
        self.http
            .action(
                &format!("/ingressGateways/{}/actions/changeCompartment", id),
                &change_compartment_body(compartment_id),
            )
            .await
    }

    async fn get_ingress_gateway_route_table(&self, id: &str) -> Result<IngressGatewayRouteTable, OciError> {
        self.http.get(&format!("/ingressGatewayRouteTables/{}", id)).await
    }

    async fn create_ingress_gateway_route_table(&self, igrt: &IngressGatewayRouteTable, opc_retry_token: &str) -> Result<IngressGatewayRouteTable, OciError> {
        self.http
            .create(
                "/ingressGatewayRouteTables",
                &ingress_gateway_route_table_create_body(igrt),
                opc_retry_token,
            )
            .await
    }

    async fn update_ingress_gateway_route_table(&self, igrt: &IngressGatewayRouteTable) -> Result<(), OciError> {
        self.http
            .put(
                &format!("/ingressGatewayRouteTables/{}", igrt.id),
                &ingress_gateway_route_table_update_body(igrt),
            )
            .await
    }

    async fn delete_ingress_gateway_route_table(&self, id: &str) -> Result<(), OciError> {
        self.http.delete(&format!("/ingressGatewayRouteTables/{}", id)).await
    }

    async fn change_ingress_gateway_route_table_compartment(&self, id: &str, compartment_id: &str) -> Result<(), OciError> {
        self.http
            .action(
                &format!("/ingressGatewayRouteTables/{}/actions/changeCompartment", id),
                &change_compartment_body(compartment_id),
            )
            .await
    }

    async fn get_access_policy(&self, id: &str) -> Result<AccessPolicy, OciError> {
        self.http.get(&format!("/accessPolicies/{}", id)).await
    }

    async fn create_access_policy(&self, ap: &AccessPolicy, opc_retry_token: &str) -> Result<AccessPolicy, OciError> {
        self.http
            .create("/accessPolicies", &access_policy_create_body(ap), opc_retry_token)
            .await
    }

    async fn update_access_policy(&self, ap: &AccessPolicy) -> Result<(), OciError> {
        self.http
            .put(&format!("/accessPolicies/{}", ap.id), &access_policy_update_body(ap))
            .await
    }

    async fn delete_access_policy(&self, id: &str) -> Result<(), OciError> {
        self.http.delete(&format!("/accessPolicies/{}", id)).await
    }

    async fn change_access_policy_compartment(&self, id: &str, compartment_id: &str) -> Result<(), OciError> {
        self.http
            .action(
                &format!("/accessPolicies/{}/actions/changeCompartment", id),
                &change_compartment_body(compartment_id),
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mesh() -> Mesh {
        Mesh {
            id: "ocid1.mesh".into(),
            compartment_id: "ocid1.compartment".into(),
            display_name: "my-namespace/my-mesh".into(),
            certificate_authorities: vec![CertificateAuthority { id: "ocid1.ca".into() }],
            mtls: Some(MeshMutualTransportLayerSecurity {
                minimum: MutualTransportLayerSecurityMode::Permissive,
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_mesh_create_body_has_create_time_fields() {
        let body = mesh_create_body(&mesh());
        assert_eq!(body["compartmentId"], "ocid1.compartment");
        assert_eq!(body["certificateAuthorities"][0]["id"], "ocid1.ca");
        assert_eq!(body["mtls"]["minimum"], "PERMISSIVE");
        assert!(body.get("description").is_none());
        assert!(body.get("lifecycleState").is_none());
    }

    #[test]
    fn test_mesh_update_body_omits_create_only_fields() {
        let body = mesh_update_body(&mesh());
        assert!(body.get("compartmentId").is_none());
        assert!(body.get("certificateAuthorities").is_none());
        assert_eq!(body["displayName"], "my-namespace/my-mesh");
    }

    #[test]
    fn test_virtual_service_mtls_drops_certificate_id() {
        let vs = VirtualService {
            mesh_id: "ocid1.mesh".into(),
            name: "vs".into(),
            mtls: Some(MutualTransportLayerSecurity {
                mode: MutualTransportLayerSecurityMode::Strict,
                maximum_validity: Some(30),
                certificate_id: Some("ocid1.cert".into()),
            }),
            ..Default::default()
        };
        let body = virtual_service_update_body(&vs);
        assert_eq!(body["mtls"], json!({"mode": "STRICT", "maximumValidity": 30}));
        assert!(body.get("meshId").is_none());
        assert!(body.get("name").is_none());
        assert_eq!(virtual_service_create_body(&vs)["meshId"], "ocid1.mesh");
    }

    #[test]
    fn test_access_policy_rules_carry_type_tags() {
        let ap = AccessPolicy {
            mesh_id: "ocid1.mesh".into(),
            name: "ap".into(),
            rules: vec![AccessPolicyRule {
                action: AccessPolicyAction::Allow,
                source: AccessPolicyTarget::AllVirtualServices,
                destination: AccessPolicyTarget::VirtualService(VirtualServiceAccessPolicyTarget {
                    virtual_service_id: "ocid1.vs".into(),
                }),
            }],
            ..Default::default()
        };
        let body = access_policy_create_body(&ap);
        assert_eq!(body["rules"][0]["source"]["type"], "ALL_VIRTUAL_SERVICES");
        assert_eq!(body["rules"][0]["destination"]["virtualServiceId"], "ocid1.vs");
    }
}
