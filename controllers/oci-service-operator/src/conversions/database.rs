//! Autonomous Database and MySQL DB system conversions
//!
//! Admin credentials come from secrets resolved beforehand and are only sent
//! on create; the services never return them, so an update request built from
//! the fetched object carries none.

use crds::{AutonomousDatabases, DbWorkload, LicenseModel, ManagedResource, MySqlDbSystem};
use oci_client::models::database as adb_sdk;
use oci_client::models::mysql as mysql_sdk;

use super::common::{merge_defined_tags, merge_freeform_tags};
use crate::error::ConversionError;
use crate::manager::ResolvedDependencies;

/// Secret field carrying the admin password
pub const ADMIN_PASSWORD: &str = "adminPassword";

/// Secret field carrying the admin user name
pub const ADMIN_USERNAME: &str = "adminUsername";

pub fn autonomous_database_to_sdk(
    adb: &AutonomousDatabases,
    base: Option<&adb_sdk::AutonomousDatabase>,
    dependencies: &ResolvedDependencies,
) -> Result<adb_sdk::AutonomousDatabase, ConversionError> {
    let spec = &adb.spec;
    let mut out = base.cloned().unwrap_or_default();

    out.compartment_id = spec.compartment_id.clone();
    out.display_name = adb.display_name();
    if base.is_none() {
        out.db_name = spec.db_name.clone();
        out.is_dedicated = Some(spec.is_dedicated);
        out.admin_password = dependencies
            .secret(ADMIN_PASSWORD)
            .map(|s| s.expose().to_string());
    }
    if let Some(workload) = spec.db_workload {
        out.db_workload = Some(db_workload_to_sdk(workload));
    }
    if spec.db_version.is_some() {
        out.db_version = spec.db_version.clone();
    }
    out.cpu_core_count = spec.cpu_core_count;
    out.data_storage_size_in_tbs = spec.data_storage_size_in_tbs;
    if spec.is_auto_scaling_enabled.is_some() {
        out.is_auto_scaling_enabled = spec.is_auto_scaling_enabled;
    }
    if spec.is_free_tier.is_some() {
        out.is_free_tier = spec.is_free_tier;
    }
    if let Some(license) = spec.license_model {
        out.license_model = Some(match license {
            LicenseModel::LicenseIncluded => adb_sdk::LicenseModel::LicenseIncluded,
            LicenseModel::BringYourOwnLicense => adb_sdk::LicenseModel::BringYourOwnLicense,
        });
    }
    out.freeform_tags = merge_freeform_tags(&spec.freeform_tags, base.map(|b| &b.freeform_tags));
    out.defined_tags = merge_defined_tags(&spec.defined_tags, base.map(|b| &b.defined_tags));
    Ok(out)
}

fn db_workload_to_sdk(workload: DbWorkload) -> adb_sdk::DbWorkload {
    match workload {
        DbWorkload::Oltp => adb_sdk::DbWorkload::Oltp,
        DbWorkload::Dw => adb_sdk::DbWorkload::Dw,
        DbWorkload::Ajd => adb_sdk::DbWorkload::Ajd,
        DbWorkload::Apex => adb_sdk::DbWorkload::Apex,
    }
}

pub fn db_workload_from_sdk(workload: adb_sdk::DbWorkload) -> Result<DbWorkload, ConversionError> {
    match workload {
        adb_sdk::DbWorkload::Oltp => Ok(DbWorkload::Oltp),
        adb_sdk::DbWorkload::Dw => Ok(DbWorkload::Dw),
        adb_sdk::DbWorkload::Ajd => Ok(DbWorkload::Ajd),
        adb_sdk::DbWorkload::Apex => Ok(DbWorkload::Apex),
        adb_sdk::DbWorkload::Unknown => Err(ConversionError::UnknownVariant("db workload")),
    }
}

pub fn mysql_db_system_to_sdk(
    db: &MySqlDbSystem,
    base: Option<&mysql_sdk::DbSystem>,
    dependencies: &ResolvedDependencies,
) -> Result<mysql_sdk::DbSystem, ConversionError> {
    let spec = &db.spec;
    let mut out = base.cloned().unwrap_or_default();

    out.compartment_id = spec.compartment_id.clone();
    out.display_name = db.display_name();
    out.description = spec.description.clone();
    out.shape_name = spec.shape_name.clone();
    if base.is_none() {
        out.subnet_id = spec.subnet_id.clone();
        out.availability_domain = spec.availability_domain.clone();
        out.fault_domain = spec.fault_domain.clone();
        out.hostname_label = spec.hostname_label.clone();
        out.ip_address = spec.ip_address.clone();
        out.port = spec.port.map(|p| p.get());
        out.port_x = spec.port_x.map(|p| p.get());
        out.admin_username = dependencies
            .secret(ADMIN_USERNAME)
            .map(|s| s.expose().to_string());
        out.admin_password = dependencies
            .secret(ADMIN_PASSWORD)
            .map(|s| s.expose().to_string());
    }
    if spec.configuration_id.is_some() {
        out.configuration_id = spec.configuration_id.clone();
    }
    if spec.mysql_version.is_some() {
        out.mysql_version = spec.mysql_version.clone();
    }
    if spec.data_storage_size_in_gbs.is_some() {
        out.data_storage_size_in_gbs = spec.data_storage_size_in_gbs;
    }
    if spec.is_highly_available.is_some() {
        out.is_highly_available = spec.is_highly_available;
    }
    out.freeform_tags = merge_freeform_tags(&spec.freeform_tags, base.map(|b| &b.freeform_tags));
    out.defined_tags = merge_defined_tags(&spec.defined_tags, base.map(|b| &b.defined_tags));
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crds::Port;

    use crate::manager::SecretValue;
    use crate::test_utils::{autonomous_database, mysql_db_system};

    fn credentials() -> ResolvedDependencies {
        let mut deps = ResolvedDependencies::default();
        deps.insert_secret(ADMIN_PASSWORD, SecretValue::new("s3cr3t-Pass"));
        deps.insert_secret(ADMIN_USERNAME, SecretValue::new("admin"));
        deps
    }

    #[test]
    fn test_adb_create_carries_password() {
        let mut adb = autonomous_database("ns", "orders");
        adb.spec.db_workload = Some(DbWorkload::Oltp);
        adb.spec.license_model = Some(LicenseModel::BringYourOwnLicense);

        let out = autonomous_database_to_sdk(&adb, None, &credentials()).unwrap();
        assert_eq!(out.display_name, "ns/orders");
        assert_eq!(out.db_name, "orders");
        assert_eq!(out.admin_password.as_deref(), Some("s3cr3t-Pass"));
        assert_eq!(out.db_workload, Some(adb_sdk::DbWorkload::Oltp));
        assert_eq!(out.license_model, Some(adb_sdk::LicenseModel::BringYourOwnLicense));
        assert_eq!(out.is_dedicated, Some(false));
    }

    #[test]
    fn test_adb_update_omits_password_and_create_only_fields() {
        let mut adb = autonomous_database("ns", "orders");
        adb.spec.db_name = "renamed".to_string();
        adb.spec.cpu_core_count = 4;
        let base = adb_sdk::AutonomousDatabase {
            id: "ocid1.adb".to_string(),
            compartment_id: "ocid1.compartment.oc1..test".to_string(),
            display_name: "ns/orders".to_string(),
            db_name: "orders".to_string(),
            cpu_core_count: 1,
            data_storage_size_in_tbs: 1,
            ..Default::default()
        };

        let out = autonomous_database_to_sdk(&adb, Some(&base), &credentials()).unwrap();
        assert_eq!(out.db_name, "orders");
        assert_eq!(out.cpu_core_count, 4);
        assert_eq!(out.admin_password, None);
    }

    #[test]
    fn test_adb_unchanged_spec_matches_remote() {
        let adb = autonomous_database("ns", "orders");
        let created = autonomous_database_to_sdk(&adb, None, &credentials()).unwrap();
        // what the service hands back: no password, an id and a state
        let remote = adb_sdk::AutonomousDatabase {
            id: "ocid1.adb".to_string(),
            admin_password: None,
            lifecycle_state: adb_sdk::AutonomousDatabaseLifecycleState::Available,
            ..created
        };
        let desired = autonomous_database_to_sdk(&adb, Some(&remote), &credentials()).unwrap();
        assert_eq!(desired, remote);
    }

    #[test]
    fn test_db_workload_unknown() {
        assert_eq!(
            db_workload_from_sdk(adb_sdk::DbWorkload::Unknown).unwrap_err(),
            ConversionError::UnknownVariant("db workload")
        );
        assert_eq!(db_workload_from_sdk(adb_sdk::DbWorkload::Ajd).unwrap(), DbWorkload::Ajd);
    }

    #[test]
    fn test_mysql_create_and_update() {
        let mut db = mysql_db_system("ns", "inventory");
        db.spec.port = Some(Port::try_from(3306).unwrap());
        db.spec.is_highly_available = Some(true);

        let created = mysql_db_system_to_sdk(&db, None, &credentials()).unwrap();
        assert_eq!(created.admin_username.as_deref(), Some("admin"));
        assert_eq!(created.admin_password.as_deref(), Some("s3cr3t-Pass"));
        assert_eq!(created.port, Some(3306));
        assert_eq!(created.subnet_id, "ocid1.subnet.oc1..test");

        let remote = mysql_sdk::DbSystem {
            id: "ocid1.mysqldbsystem".to_string(),
            admin_username: None,
            admin_password: None,
            ..created
        };
        db.spec.subnet_id = "ocid1.subnet.oc1..other".to_string();
        db.spec.shape_name = "MySQL.VM.Standard.E4.2.32GB".to_string();
        let updated = mysql_db_system_to_sdk(&db, Some(&remote), &credentials()).unwrap();
        assert_eq!(updated.subnet_id, "ocid1.subnet.oc1..test");
        assert_eq!(updated.shape_name, "MySQL.VM.Standard.E4.2.32GB");
        assert_eq!(updated.admin_password, None);
    }
}
