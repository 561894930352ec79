//! Autonomous Database and MySQL DB system handlers
//!
//! Admin credentials are read from secrets only until the remote resource
//! exists; after that the secrets may be rotated or removed freely.

use std::sync::Arc;

use crds::{AutonomousDatabases, ManagedResource, MySqlDbSystem, OCI_FINALIZER, SecretSource};
use oci_client::models::database::AutonomousDatabase;
use oci_client::models::mysql::DbSystem;
use oci_client::{DatabaseClient, MySqlClient, OciError};

use crate::conversions::database::{ADMIN_PASSWORD, ADMIN_USERNAME};
use crate::conversions::{autonomous_database_to_sdk, mysql_db_system_to_sdk};
use crate::error::{ConversionError, ServiceManagerError};
use crate::manager::{CustomResourceHandler, ResolvedDependencies};
use crate::resolver::Resolver;

/// Key of the password inside an admin password secret
const PASSWORD_KEY: &str = "password";

/// Key of the user name inside an admin username secret
const USERNAME_KEY: &str = "username";

async fn read_credential(
    resolver: &dyn Resolver,
    namespace: &str,
    source: Option<&SecretSource>,
    key: &str,
    field: &str,
    dependencies: &mut ResolvedDependencies,
) -> Result<(), ServiceManagerError> {
    if let Some(source) = source {
        let value = resolver
            .read_secret(namespace, &source.secret.secret_name, key)
            .await?;
        dependencies.insert_secret(field, value);
    }
    Ok(())
}

pub struct AutonomousDatabaseHandler {
    client: Arc<dyn DatabaseClient>,
    resolver: Arc<dyn Resolver>,
}

impl AutonomousDatabaseHandler {
    pub fn new(client: Arc<dyn DatabaseClient>, resolver: Arc<dyn Resolver>) -> Self {
        Self { client, resolver }
    }
}

#[async_trait::async_trait]
impl CustomResourceHandler for AutonomousDatabaseHandler {
    type Resource = AutonomousDatabases;
    type Sdk = AutonomousDatabase;

    const KIND: &'static str = "AutonomousDatabases";

    fn finalizer(&self) -> &'static str {
        OCI_FINALIZER
    }

    async fn resolve_dependencies(
        &self,
        adb: &AutonomousDatabases,
    ) -> Result<ResolvedDependencies, ServiceManagerError> {
        let mut dependencies = ResolvedDependencies::default();
        if adb.remote_id().is_none() {
            read_credential(
                self.resolver.as_ref(),
                &adb.namespace_or_default(),
                adb.spec.admin_password.as_ref(),
                PASSWORD_KEY,
                ADMIN_PASSWORD,
                &mut dependencies,
            )
            .await?;
        }
        Ok(dependencies)
    }

    async fn get_resource(&self, id: &str) -> Result<AutonomousDatabase, OciError> {
        self.client.get_autonomous_database(id).await
    }

    fn build_sdk(
        &self,
        adb: &AutonomousDatabases,
        base: Option<&AutonomousDatabase>,
        dependencies: &ResolvedDependencies,
    ) -> Result<AutonomousDatabase, ConversionError> {
        autonomous_database_to_sdk(adb, base, dependencies)
    }

    async fn create_resource(
        &self,
        adb: &AutonomousDatabase,
        opc_retry_token: &str,
    ) -> Result<AutonomousDatabase, OciError> {
        self.client
            .create_autonomous_database(adb, opc_retry_token)
            .await
    }

    async fn update_resource(&self, adb: &AutonomousDatabase) -> Result<(), OciError> {
        self.client.update_autonomous_database(adb).await
    }

    async fn change_compartment(&self, id: &str, compartment_id: &str) -> Result<(), OciError> {
        self.client
            .change_autonomous_database_compartment(id, compartment_id)
            .await
    }

    async fn delete_resource(&self, id: &str) -> Result<(), OciError> {
        self.client.delete_autonomous_database(id).await
    }
}

pub struct MySqlDbSystemHandler {
    client: Arc<dyn MySqlClient>,
    resolver: Arc<dyn Resolver>,
}

impl MySqlDbSystemHandler {
    pub fn new(client: Arc<dyn MySqlClient>, resolver: Arc<dyn Resolver>) -> Self {
        Self { client, resolver }
    }
}

#[async_trait::async_trait]
impl CustomResourceHandler for MySqlDbSystemHandler {
    type Resource = MySqlDbSystem;
    type Sdk = DbSystem;

    const KIND: &'static str = "MySqlDbSystem";

    fn finalizer(&self) -> &'static str {
        OCI_FINALIZER
    }

    async fn resolve_dependencies(
        &self,
        db: &MySqlDbSystem,
    ) -> Result<ResolvedDependencies, ServiceManagerError> {
        let mut dependencies = ResolvedDependencies::default();
        if db.remote_id().is_none() {
            let namespace = db.namespace_or_default();
            read_credential(
                self.resolver.as_ref(),
                &namespace,
                db.spec.admin_username.as_ref(),
                USERNAME_KEY,
                ADMIN_USERNAME,
                &mut dependencies,
            )
            .await?;
            read_credential(
                self.resolver.as_ref(),
                &namespace,
                db.spec.admin_password.as_ref(),
                PASSWORD_KEY,
                ADMIN_PASSWORD,
                &mut dependencies,
            )
            .await?;
        }
        Ok(dependencies)
    }

    async fn get_resource(&self, id: &str) -> Result<DbSystem, OciError> {
        self.client.get_db_system(id).await
    }

    fn build_sdk(
        &self,
        db: &MySqlDbSystem,
        base: Option<&DbSystem>,
        dependencies: &ResolvedDependencies,
    ) -> Result<DbSystem, ConversionError> {
        mysql_db_system_to_sdk(db, base, dependencies)
    }

    async fn create_resource(&self, db: &DbSystem, opc_retry_token: &str) -> Result<DbSystem, OciError> {
        self.client.create_db_system(db, opc_retry_token).await
    }

    async fn update_resource(&self, db: &DbSystem) -> Result<(), OciError> {
        self.client.update_db_system(db).await
    }

    async fn change_compartment(&self, id: &str, compartment_id: &str) -> Result<(), OciError> {
        self.client
            .change_db_system_compartment(id, compartment_id)
            .await
    }

    async fn delete_resource(&self, id: &str) -> Result<(), OciError> {
        self.client.delete_db_system(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crds::{ResourceStatus, SecretRef};
    use oci_client::{MockDatabaseClient, MockMySqlClient};

    use crate::test_utils::{autonomous_database, mysql_db_system, MockResolver};

    fn secret(name: &str) -> Option<SecretSource> {
        Some(SecretSource {
            secret: SecretRef {
                secret_name: name.to_string(),
            },
        })
    }

    #[tokio::test]
    async fn test_adb_reads_password_before_create() {
        let resolver = MockResolver::default();
        resolver.add_secret("ns", "orders-admin", "password", "s3cr3t-Pass");
        let handler = AutonomousDatabaseHandler::new(Arc::new(MockDatabaseClient::new()), Arc::new(resolver));

        let mut adb = autonomous_database("ns", "orders");
        adb.spec.admin_password = secret("orders-admin");
        let deps = handler.resolve_dependencies(&adb).await.unwrap();
        assert_eq!(deps.secret(ADMIN_PASSWORD).unwrap().expose(), "s3cr3t-Pass");

        // once created the secret is no longer needed
        adb.status = Some(ResourceStatus {
            id: Some("ocid1.adb".to_string()),
            ..Default::default()
        });
        adb.spec.admin_password = secret("deleted-secret");
        let deps = handler.resolve_dependencies(&adb).await.unwrap();
        assert!(deps.secret(ADMIN_PASSWORD).is_none());
    }

    #[tokio::test]
    async fn test_missing_secret_requeues() {
        let handler = AutonomousDatabaseHandler::new(
            Arc::new(MockDatabaseClient::new()),
            Arc::new(MockResolver::default()),
        );
        let mut adb = autonomous_database("ns", "orders");
        adb.spec.admin_password = secret("orders-admin");
        let err = handler.resolve_dependencies(&adb).await.unwrap_err();
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_mysql_reads_both_credentials() {
        let resolver = MockResolver::default();
        resolver.add_secret("ns", "mysql-user", "username", "admin");
        resolver.add_secret("ns", "mysql-pass", "password", "s3cr3t-Pass");
        let handler = MySqlDbSystemHandler::new(Arc::new(MockMySqlClient::new()), Arc::new(resolver));

        let mut db = mysql_db_system("ns", "inventory");
        db.spec.admin_username = secret("mysql-user");
        db.spec.admin_password = secret("mysql-pass");
        let deps = handler.resolve_dependencies(&db).await.unwrap();
        assert_eq!(deps.secret(ADMIN_USERNAME).unwrap().expose(), "admin");
        assert_eq!(deps.secret(ADMIN_PASSWORD).unwrap().expose(), "s3cr3t-Pass");
    }
}
