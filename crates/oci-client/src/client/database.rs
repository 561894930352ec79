//! Autonomous Database HTTP client

use serde_json::{json, Value};

use crate::common::{strip_nulls, HttpClient};
use crate::error::OciError;
use crate::models::database::AutonomousDatabase;
use crate::oci_trait::DatabaseClient;

pub struct DatabaseHttpClient {
    http: HttpClient,
}

impl DatabaseHttpClient {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }
}

pub(crate) fn autonomous_database_create_body(adb: &AutonomousDatabase) -> Value {
    strip_nulls(json!({
        "source": "NONE",
        "compartmentId": adb.compartment_id,
        "displayName": adb.display_name,
        "dbName": adb.db_name,
        "dbWorkload": adb.db_workload,
        "isDedicated": adb.is_dedicated,
        "dbVersion": adb.db_version,
        "dataStorageSizeInTBs": adb.data_storage_size_in_tbs,
        "cpuCoreCount": adb.cpu_core_count,
        "adminPassword": adb.admin_password,
        "isAutoScalingEnabled": adb.is_auto_scaling_enabled,
        "isFreeTier": adb.is_free_tier,
        "licenseModel": adb.license_model,
        "freeformTags": adb.freeform_tags,
        "definedTags": adb.defined_tags,
    }))
}

pub(crate) fn autonomous_database_update_body(adb: &AutonomousDatabase) -> Value {
    strip_nulls(json!({
        "displayName": adb.display_name,
        "dbVersion": adb.db_version,
        "dataStorageSizeInTBs": adb.data_storage_size_in_tbs,
        "cpuCoreCount": adb.cpu_core_count,
        "adminPassword": adb.admin_password,
        "isAutoScalingEnabled": adb.is_auto_scaling_enabled,
        "licenseModel": adb.license_model,
        "freeformTags": adb.freeform_tags,
        "definedTags": adb.defined_tags,
    }))
}

#[async_trait::async_trait]
impl DatabaseClient for DatabaseHttpClient {
    async fn get_autonomous_database(&self, id: &str) -> Result<AutonomousDatabase, OciError> {
        self.http.get(&format!("/autonomousDatabases/{}", id)).await
    }

    async fn create_autonomous_database(&self, adb: &AutonomousDatabase, opc_retry_token: &str) -> Result<AutonomousDatabase, OciError> {
        self.http
            .create("/autonomousDatabases", &autonomous_database_create_body(adb), opc_retry_token)
            .await
    }

    async fn update_autonomous_database(&self, adb: &AutonomousDatabase) -> Result<(), OciError> {
        self.http
            .put(
                &format!("/autonomousDatabases/{}", adb.id),
                &autonomous_database_update_body(adb),
            )
            .await
    }

    async fn delete_autonomous_database(&self, id: &str) -> Result<(), OciError> {
        self.http.delete(&format!("/autonomousDatabases/{}", id)).await
    }

    async fn change_autonomous_database_compartment(&self, id: &str, compartment_id: &str) -> Result<(), OciError> {
        self.http
            .action(
                &format!("/autonomousDatabases/{}/actions/changeCompartment", id),
                &json!({ "compartmentId": compartment_id }),
            )
            .await
    }
}
