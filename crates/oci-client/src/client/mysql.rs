//! MySQL DB system HTTP client

use serde_json::{json, Value};

use crate::common::{strip_nulls, HttpClient};
use crate::error::OciError;
use crate::models::mysql::DbSystem;
use crate::oci_trait::MySqlClient;

pub struct MySqlHttpClient {
    http: HttpClient,
}

impl MySqlHttpClient {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }
}

pub(crate) fn db_system_create_body(db: &DbSystem) -> Value {
    strip_nulls(json!({
        "compartmentId": db.compartment_id,
        "displayName": db.display_name,
        "description": db.description,
        "shapeName": db.shape_name,
        "subnetId": db.subnet_id,
        "availabilityDomain": db.availability_domain,
        "faultDomain": db.fault_domain,
        "configurationId": db.configuration_id,
        "mysqlVersion": db.mysql_version,
        "adminUsername": db.admin_username,
        "adminPassword": db.admin_password,
        "dataStorageSizeInGBs": db.data_storage_size_in_gbs,
        "hostnameLabel": db.hostname_label,
        "ipAddress": db.ip_address,
        "port": db.port,
        "portX": db.port_x,
        "isHighlyAvailable": db.is_highly_available,
        "freeformTags": db.freeform_tags,
        "definedTags": db.defined_tags,
    }))
}

pub(crate) fn db_system_update_body(db: &DbSystem) -> Value {
    strip_nulls(json!({
        "displayName": db.display_name,
        "description": db.description,
        "shapeName": db.shape_name,
        "configurationId": db.configuration_id,
        "dataStorageSizeInGBs": db.data_storage_size_in_gbs,
        "isHighlyAvailable": db.is_highly_available,
        "freeformTags": db.freeform_tags,
        "definedTags": db.defined_tags,
    }))
}

#[async_trait::async_trait]
impl MySqlClient for MySqlHttpClient {
    async fn get_db_system(&self, id: &str) -> Result<DbSystem, OciError> {
        self.http.get(&format!("/dbSystems/{}", id)).await
    }

    async fn create_db_system(&self, db_system: &DbSystem, opc_retry_token: &str) -> Result<DbSystem, OciError> {
        self.http
            .create("/dbSystems", &db_system_create_body(db_system), opc_retry_token)
            .await
    }

    async fn update_db_system(&self, db_system: &DbSystem) -> Result<(), OciError> {
        self.http
            .put(&format!("/dbSystems/{}", db_system.id), &db_system_update_body(db_system))
            .await
    }

    async fn delete_db_system(&self, id: &str) -> Result<(), OciError> {
        self.http.delete(&format!("/dbSystems/{}", id)).await
    }

    async fn change_db_system_compartment(&self, id: &str, compartment_id: &str) -> Result<(), OciError> {
        self.http
            .action(
                &format!("/dbSystems/{}/actions/changeCompartment", id),
                &json!({ "compartmentId": compartment_id }),
            )
            .await
    }
}
