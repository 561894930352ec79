//! Database CRDs (`oci.oracle.com/v1beta1`)

pub mod autonomous_database;
pub mod mysql_db_system;

pub use autonomous_database::*;
pub use mysql_db_system::*;
