//! Mock OCI clients for unit testing
//!
//! These mocks implement the service client traits against in-memory tables
//! so controller tests run without an OCI tenancy.
//!
//! The mock is organized into service-specific modules:
//! - `servicemesh.rs` - meshes, virtual services/deployments, route tables, gateways, access policies
//! - `database.rs` - autonomous databases
//! - `mysql.rs` - MySQL DB systems
//! - `streaming.rs` - streams
//!
//! Every mock shares the same behaviour:
//! - creates are deduplicated by retry token (same token, same object)
//! - newly created objects start in a configurable lifecycle phase
//! - each operation is counted by name (`create_mesh`, `get_stream`, ...)
//! - an error can be queued for the next call of a named operation

mod database;
mod mysql;
mod servicemesh;
mod streaming;

pub use database::MockDatabaseClient;
pub use mysql::MockMySqlClient;
pub use servicemesh::MockServiceMeshClient;
pub use streaming::MockStreamAdminClient;

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::OciError;
use crate::models::{LifecyclePhase, RemoteResource};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Write access the mock needs on every model
pub trait MockRecord: RemoteResource {
    /// OCID type segment, e.g. `mesh` in `ocid1.mesh.oc1..`
    const OCID_TYPE: &'static str;

    fn set_id(&mut self, id: String);
    fn set_compartment_id(&mut self, compartment_id: String);
    fn set_phase(&mut self, phase: LifecyclePhase);
    fn touch(&mut self);
}

/// Error to hand back on the next call of an operation
#[derive(Debug, Clone)]
pub struct InjectedError {
    pub status: u16,
    pub code: String,
    pub message: String,
}

impl InjectedError {
    pub fn new(status: u16, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            code: code.into(),
            message: message.into(),
        }
    }

    fn into_error(self) -> OciError {
        OciError::service(
            self.status,
            self.code,
            self.message,
            Some("mock-request-id".to_string()),
        )
    }
}

/// State shared by all tables of one mock client
#[derive(Clone)]
pub struct MockBackend {
    next_id: Arc<Mutex<u64>>,
    calls: Arc<Mutex<HashMap<String, usize>>>,
    failures: Arc<Mutex<HashMap<String, VecDeque<InjectedError>>>>,
    create_phase: Arc<Mutex<LifecyclePhase>>,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self {
            next_id: Arc::new(Mutex::new(1)),
            calls: Arc::new(Mutex::new(HashMap::new())),
            failures: Arc::new(Mutex::new(HashMap::new())),
            create_phase: Arc::new(Mutex::new(LifecyclePhase::Active)),
        }
    }
}

impl MockBackend {
    /// Number of calls made to `operation`
    pub fn calls(&self, operation: &str) -> usize {
        lock(&self.calls).get(operation).copied().unwrap_or(0)
    }

    /// Fail the next call of `operation` with `error`
    pub fn fail_next(&self, operation: &str, error: InjectedError) {
        lock(&self.failures)
            .entry(operation.to_string())
            .or_default()
            .push_back(error);
    }

    /// Phase given to objects created from now on
    pub fn set_create_phase(&self, phase: LifecyclePhase) {
        *lock(&self.create_phase) = phase;
    }

    fn begin(&self, operation: &str) -> Result<(), OciError> {
        *lock(&self.calls).entry(operation.to_string()).or_insert(0) += 1;
        match lock(&self.failures).get_mut(operation).and_then(VecDeque::pop_front) {
            Some(error) => Err(error.into_error()),
            None => Ok(()),
        }
    }

    fn next_id(&self) -> u64 {
        let mut id = lock(&self.next_id);
        let current = *id;
        *id += 1;
        current
    }
}

/// In-memory table of one resource type
pub struct Table<T> {
    rows: Arc<Mutex<BTreeMap<String, T>>>,
    tokens: Arc<Mutex<HashMap<String, String>>>,
}

impl<T> Clone for Table<T> {
    fn clone(&self) -> Self {
        Self {
            rows: Arc::clone(&self.rows),
            tokens: Arc::clone(&self.tokens),
        }
    }
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: Arc::new(Mutex::new(BTreeMap::new())),
            tokens: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl<T: MockRecord> Table<T> {
    /// Add an object to the table (for test setup)
    pub fn insert(&self, record: T) {
        lock(&self.rows).insert(record.id().to_string(), record);
    }

    pub fn get(&self, id: &str) -> Option<T> {
        lock(&self.rows).get(id).cloned()
    }

    pub fn len(&self) -> usize {
        lock(&self.rows).len()
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.rows).is_empty()
    }

    /// Move an existing object to another lifecycle phase
    pub fn set_phase(&self, id: &str, phase: LifecyclePhase) {
        if let Some(row) = lock(&self.rows).get_mut(id) {
            row.set_phase(phase);
        }
    }

    pub(crate) fn fetch(&self, backend: &MockBackend, op: &str, id: &str) -> Result<T, OciError> {
        backend.begin(op)?;
        self.get(id)
            .ok_or_else(|| OciError::not_found(format!("{} {} not found", T::OCID_TYPE, id)))
    }

    pub(crate) fn create(
        &self,
        backend: &MockBackend,
        op: &str,
        request: &T,
        opc_retry_token: &str,
    ) -> Result<T, OciError> {
        backend.begin(op)?;
        if let Some(existing) = lock(&self.tokens)
            .get(opc_retry_token)
            .and_then(|id| self.get(id))
        {
            return Ok(existing);
        }

        let mut record = request.clone();
        record.set_id(format!("ocid1.{}.oc1..mock{}", T::OCID_TYPE, backend.next_id()));
        record.set_phase(*lock(&backend.create_phase));
        record.touch();
        lock(&self.tokens).insert(opc_retry_token.to_string(), record.id().to_string());
        self.insert(record.clone());
        Ok(record)
    }

    pub(crate) fn update(&self, backend: &MockBackend, op: &str, request: &T) -> Result<(), OciError> {
        backend.begin(op)?;
        let mut rows = lock(&self.rows);
        let Some(row) = rows.get_mut(request.id()) else {
            return Err(OciError::not_found(format!("{} {} not found", T::OCID_TYPE, request.id())));
        };
        let compartment_id = row.compartment_id().to_string();
        let phase = row.lifecycle_phase();
        *row = request.clone();
        row.set_compartment_id(compartment_id);
        row.set_phase(phase);
        row.touch();
        Ok(())
    }

    pub(crate) fn delete(&self, backend: &MockBackend, op: &str, id: &str) -> Result<(), OciError> {
        backend.begin(op)?;
        match lock(&self.rows).get_mut(id) {
            Some(row) => {
                row.set_phase(LifecyclePhase::Deleted);
                Ok(())
            }
            None => Err(OciError::not_found(format!("{} {} not found", T::OCID_TYPE, id))),
        }
    }

    pub(crate) fn change_compartment(
        &self,
        backend: &MockBackend,
        op: &str,
        id: &str,
        compartment_id: &str,
    ) -> Result<(), OciError> {
        backend.begin(op)?;
        match lock(&self.rows).get_mut(id) {
            Some(row) => {
                row.set_compartment_id(compartment_id.to_string());
                row.touch();
                Ok(())
            }
            None => Err(OciError::not_found(format!("{} {} not found", T::OCID_TYPE, id))),
        }
    }
}

/// Implements [`MockRecord`] for a model
macro_rules! mock_record {
    (@impl $model:ty, $state:ty, $ocid_type:literal, $touch:expr) => {
        impl $crate::mock::MockRecord for $model {
            const OCID_TYPE: &'static str = $ocid_type;

            fn set_id(&mut self, id: String) {
                self.id = id;
            }

            fn set_compartment_id(&mut self, compartment_id: String) {
                self.compartment_id = compartment_id;
            }

            fn set_phase(&mut self, phase: $crate::models::LifecyclePhase) {
                self.lifecycle_state = <$state>::from_phase(phase);
            }

            fn touch(&mut self) {
                let touch: fn(&mut $model) = $touch;
                touch(self);
            }
        }
    };
    ($model:ty, $state:ty, $ocid_type:literal) => {
        mock_record!(@impl $model, $state, $ocid_type, |r: &mut $model| {
            r.time_updated = Some(chrono::Utc::now());
        });
    };
    ($model:ty, $state:ty, $ocid_type:literal, no_time_updated) => {
        mock_record!(@impl $model, $state, $ocid_type, |r: &mut $model| {
            if r.time_created.is_none() {
                r.time_created = Some(chrono::Utc::now());
            }
        });
    };
}

pub(crate) use mock_record;
