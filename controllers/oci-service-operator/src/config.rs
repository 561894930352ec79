//! # Operator Configuration
//!
//! Settings loaded from environment variables.

use std::collections::HashMap;

use crate::error::ControllerError;

const DEFAULT_REGION: &str = "us-ashburn-1";
const DEFAULT_RECONCILE_CONCURRENCY: u16 = 3;
const DEFAULT_RECONCILE_DEBOUNCE_SECS: u64 = 1;
const DEFAULT_BACKOFF_MIN_SECS: u64 = 5;
const DEFAULT_BACKOFF_MAX_SECS: u64 = 300;

/// Operator configuration
#[derive(Clone)]
pub struct OperatorConfig {
    pub region: String,
    pub service_mesh_endpoint: String,
    pub streaming_endpoint: String,
    pub database_endpoint: String,
    pub mysql_endpoint: String,
    /// Bearer credential for the OCI APIs
    pub auth_token: String,
    /// Namespace to watch (`None` = all namespaces)
    pub watch_namespace: Option<String>,
    /// Concurrent reconciles per kind
    pub reconcile_concurrency: u16,
    /// Watcher debounce (seconds)
    pub reconcile_debounce_secs: u64,
    pub backoff_min_secs: u64,
    pub backoff_max_secs: u64,
}

impl std::fmt::Debug for OperatorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OperatorConfig")
            .field("region", &self.region)
            .field("service_mesh_endpoint", &self.service_mesh_endpoint)
            .field("streaming_endpoint", &self.streaming_endpoint)
            .field("database_endpoint", &self.database_endpoint)
            .field("mysql_endpoint", &self.mysql_endpoint)
            .field("auth_token", &"<redacted>")
            .field("watch_namespace", &self.watch_namespace)
            .field("reconcile_concurrency", &self.reconcile_concurrency)
            .field("reconcile_debounce_secs", &self.reconcile_debounce_secs)
            .field("backoff_min_secs", &self.backoff_min_secs)
            .field("backoff_max_secs", &self.backoff_max_secs)
            .finish()
    }
}

impl OperatorConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ControllerError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from a fixed set of variables
    pub fn from_map(vars: &HashMap<String, String>) -> Result<Self, ControllerError> {
        Self::from_lookup(|key| vars.get(key).cloned())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ControllerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let region = non_empty("OCI_REGION").unwrap_or_else(|| DEFAULT_REGION.to_string());
        let auth_token = non_empty("OCI_AUTH_TOKEN").ok_or_else(|| {
            ControllerError::InvalidConfig(
                "OCI_AUTH_TOKEN environment variable is required".to_string(),
            )
        })?;

        let config = Self {
            service_mesh_endpoint: non_empty("OCI_SERVICE_MESH_ENDPOINT").unwrap_or_else(|| {
                format!("https://service-mesh.{region}.oci.oraclecloud.com/20220615")
            }),
            streaming_endpoint: non_empty("OCI_STREAMING_ENDPOINT").unwrap_or_else(|| {
                format!("https://streaming.{region}.oci.oraclecloud.com/20180418")
            }),
            database_endpoint: non_empty("OCI_DATABASE_ENDPOINT")
                .unwrap_or_else(|| format!("https://database.{region}.oraclecloud.com/20160918")),
            mysql_endpoint: non_empty("OCI_MYSQL_ENDPOINT")
                .unwrap_or_else(|| format!("https://mysql.{region}.ocp.oraclecloud.com/20190415")),
            auth_token,
            watch_namespace: non_empty("WATCH_NAMESPACE"),
            reconcile_concurrency: parse_or_default(
                &lookup,
                "RECONCILE_CONCURRENCY",
                DEFAULT_RECONCILE_CONCURRENCY,
            ),
            reconcile_debounce_secs: parse_or_default(
                &lookup,
                "RECONCILE_DEBOUNCE_SECS",
                DEFAULT_RECONCILE_DEBOUNCE_SECS,
            ),
            backoff_min_secs: parse_or_default(&lookup, "BACKOFF_MIN_SECS", DEFAULT_BACKOFF_MIN_SECS),
            backoff_max_secs: parse_or_default(&lookup, "BACKOFF_MAX_SECS", DEFAULT_BACKOFF_MAX_SECS),
            region,
        };

        if config.backoff_min_secs > config.backoff_max_secs {
            return Err(ControllerError::InvalidConfig(format!(
                "BACKOFF_MIN_SECS ({}) must not exceed BACKOFF_MAX_SECS ({})",
                config.backoff_min_secs, config.backoff_max_secs
            )));
        }

        Ok(config)
    }
}

/// Read a variable or return the default value when unset or unparsable
fn parse_or_default<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = OperatorConfig::from_map(&vars(&[("OCI_AUTH_TOKEN", "t")])).unwrap();
        assert_eq!(config.region, "us-ashburn-1");
        assert_eq!(
            config.service_mesh_endpoint,
            "https://service-mesh.us-ashburn-1.oci.oraclecloud.com/20220615"
        );
        assert_eq!(
            config.streaming_endpoint,
            "https://streaming.us-ashburn-1.oci.oraclecloud.com/20180418"
        );
        assert_eq!(config.watch_namespace, None);
        assert_eq!(config.reconcile_concurrency, 3);
        assert_eq!(config.reconcile_debounce_secs, 1);
        assert_eq!(config.backoff_min_secs, 5);
        assert_eq!(config.backoff_max_secs, 300);
    }

    #[test]
    fn test_region_drives_endpoints() {
        let config = OperatorConfig::from_map(&vars(&[
            ("OCI_AUTH_TOKEN", "t"),
            ("OCI_REGION", "eu-frankfurt-1"),
            ("OCI_MYSQL_ENDPOINT", "http://localhost:9000"),
        ]))
        .unwrap();
        assert_eq!(
            config.database_endpoint,
            "https://database.eu-frankfurt-1.oraclecloud.com/20160918"
        );
        assert_eq!(config.mysql_endpoint, "http://localhost:9000");
    }

    #[test]
    fn test_missing_token_is_invalid_config() {
        let err = OperatorConfig::from_map(&vars(&[("OCI_AUTH_TOKEN", "  ")])).unwrap_err();
        assert!(matches!(err, ControllerError::InvalidConfig(_)));
    }

    #[test]
    fn test_unparsable_numbers_fall_back() {
        let config = OperatorConfig::from_map(&vars(&[
            ("OCI_AUTH_TOKEN", "t"),
            ("RECONCILE_CONCURRENCY", "many"),
            ("BACKOFF_MAX_SECS", "600"),
            ("WATCH_NAMESPACE", "mesh-apps"),
        ]))
        .unwrap();
        assert_eq!(config.reconcile_concurrency, 3);
        assert_eq!(config.backoff_max_secs, 600);
        assert_eq!(config.watch_namespace.as_deref(), Some("mesh-apps"));
    }

    #[test]
    fn test_backoff_bounds_are_checked() {
        let err = OperatorConfig::from_map(&vars(&[
            ("OCI_AUTH_TOKEN", "t"),
            ("BACKOFF_MIN_SECS", "600"),
            ("BACKOFF_MAX_SECS", "60"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("BACKOFF_MIN_SECS"));
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = OperatorConfig::from_map(&vars(&[("OCI_AUTH_TOKEN", "secret-token")])).unwrap();
        assert!(!format!("{config:?}").contains("secret-token"));
    }
}
