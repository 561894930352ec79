//! Autonomous Database operations for the mock client

use super::{mock_record, MockBackend, Table};
use crate::error::OciError;
use crate::models::database::{AutonomousDatabase, AutonomousDatabaseLifecycleState};
use crate::oci_trait::DatabaseClient;

mock_record!(AutonomousDatabase, AutonomousDatabaseLifecycleState, "autonomousdatabase", no_time_updated);

/// Mock Autonomous Database client
#[derive(Clone, Default)]
pub struct MockDatabaseClient {
    pub backend: MockBackend,
    pub autonomous_databases: Table<AutonomousDatabase>,
}

impl MockDatabaseClient {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl DatabaseClient for MockDatabaseClient {
    async fn get_autonomous_database(&self, id: &str) -> Result<AutonomousDatabase, OciError> {
        self.autonomous_databases
            .fetch(&self.backend, "get_autonomous_database", id)
    }

    async fn create_autonomous_database(&self, adb: &AutonomousDatabase, opc_retry_token: &str) -> Result<AutonomousDatabase, OciError> {
        // The service never echoes the password back.
        let mut created = self.autonomous_databases.create(
            &self.backend,
            "create_autonomous_database",
            adb,
            opc_retry_token,
        )?;
        created.admin_password = None;
        self.autonomous_databases.insert(created.clone());
        Ok(created)
    }

    async fn update_autonomous_database(&self, adb: &AutonomousDatabase) -> Result<(), OciError> {
        let mut request = adb.clone();
        request.admin_password = None;
        self.autonomous_databases
            .update(&self.backend, "update_autonomous_database", &request)
    }

    async fn delete_autonomous_database(&self, id: &str) -> Result<(), OciError> {
        self.autonomous_databases
            .delete(&self.backend, "delete_autonomous_database", id)
    }

    async fn change_autonomous_database_compartment(&self, id: &str, compartment_id: &str) -> Result<(), OciError> {
        self.autonomous_databases.change_compartment(
            &self.backend,
            "change_autonomous_database_compartment",
            id,
            compartment_id,
        )
    }
}
