//! Streaming CRDs (`oci.oracle.com/v1beta1`)

pub mod stream;

pub use stream::*;
