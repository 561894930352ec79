//! OCI Service Operator
//!
//! Reconciles OCI Service Mesh, Autonomous Database, MySQL DB System and
//! Streaming custom resources against the OCI control plane. Every kind
//! runs through the same [`manager::ServiceManager`]; the per-kind
//! behaviour lives in [`handlers`].

pub mod admission;
pub mod backoff;
pub mod config;
pub mod controller;
pub mod conversions;
pub mod error;
pub mod handlers;
pub mod manager;
pub mod resolver;
pub mod store;
pub mod validator;
pub mod watcher;

#[cfg(test)]
pub mod test_utils;
