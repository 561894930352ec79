//! MySQL DB system operations for the mock client

use super::{mock_record, MockBackend, Table};
use crate::error::OciError;
use crate::models::mysql::{DbSystem, DbSystemLifecycleState};
use crate::oci_trait::MySqlClient;

mock_record!(DbSystem, DbSystemLifecycleState, "mysqldbsystem");

/// Mock MySQL client
#[derive(Clone, Default)]
pub struct MockMySqlClient {
    pub backend: MockBackend,
    pub db_systems: Table<DbSystem>,
}

impl MockMySqlClient {
    pub fn new() -> Self {
        Self::default()
    }
}

fn without_credentials(db_system: &DbSystem) -> DbSystem {
    DbSystem {
        admin_username: None,
        admin_password: None,
        ..db_system.clone()
    }
}

#[async_trait::async_trait]
impl MySqlClient for MockMySqlClient {
    async fn get_db_system(&self, id: &str) -> Result<DbSystem, OciError> {
        self.db_systems.fetch(&self.backend, "get_db_system", id)
    }

    async fn create_db_system(&self, db_system: &DbSystem, opc_retry_token: &str) -> Result<DbSystem, OciError> {
        self.db_systems.create(
            &self.backend,
            "create_db_system",
            &without_credentials(db_system),
            opc_retry_token,
        )
    }

    async fn update_db_system(&self, db_system: &DbSystem) -> Result<(), OciError> {
        self.db_systems
            .update(&self.backend, "update_db_system", &without_credentials(db_system))
    }

    async fn delete_db_system(&self, id: &str) -> Result<(), OciError> {
        self.db_systems.delete(&self.backend, "delete_db_system", id)
    }

    async fn change_db_system_compartment(&self, id: &str, compartment_id: &str) -> Result<(), OciError> {
        self.db_systems.change_compartment(
            &self.backend,
            "change_db_system_compartment",
            id,
            compartment_id,
        )
    }
}
