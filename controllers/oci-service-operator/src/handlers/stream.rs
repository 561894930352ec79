//! Stream handler

use std::sync::Arc;

use crds::{OCI_FINALIZER, Stream};
use oci_client::models::streaming as sdk;
use oci_client::{OciError, StreamAdminClient};

use crate::conversions::stream_to_sdk;
use crate::error::{ConversionError, ServiceManagerError};
use crate::manager::{CustomResourceHandler, ResolvedDependencies};

pub struct StreamHandler {
    client: Arc<dyn StreamAdminClient>,
}

impl StreamHandler {
    pub fn new(client: Arc<dyn StreamAdminClient>) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl CustomResourceHandler for StreamHandler {
    type Resource = Stream;
    type Sdk = sdk::Stream;

    const KIND: &'static str = "Stream";

    fn finalizer(&self) -> &'static str {
        OCI_FINALIZER
    }

    async fn resolve_dependencies(&self, _stream: &Stream) -> Result<ResolvedDependencies, ServiceManagerError> {
        Ok(ResolvedDependencies::default())
    }

    async fn get_resource(&self, id: &str) -> Result<sdk::Stream, OciError> {
        self.client.get_stream(id).await
    }

    fn build_sdk(
        &self,
        stream: &Stream,
        base: Option<&sdk::Stream>,
        _dependencies: &ResolvedDependencies,
    ) -> Result<sdk::Stream, ConversionError> {
        stream_to_sdk(stream, base)
    }

    async fn create_resource(&self, stream: &sdk::Stream, opc_retry_token: &str) -> Result<sdk::Stream, OciError> {
        self.client.create_stream(stream, opc_retry_token).await
    }

    async fn update_resource(&self, stream: &sdk::Stream) -> Result<(), OciError> {
        self.client.update_stream(stream).await
    }

    async fn change_compartment(&self, id: &str, compartment_id: &str) -> Result<(), OciError> {
        self.client.change_stream_compartment(id, compartment_id).await
    }

    async fn delete_resource(&self, id: &str) -> Result<(), OciError> {
        self.client.delete_stream(id).await
    }
}
