//! Stream admin operations for the mock client

use super::{mock_record, MockBackend, Table};
use crate::error::OciError;
use crate::models::streaming::{Stream, StreamLifecycleState};
use crate::oci_trait::StreamAdminClient;

mock_record!(Stream, StreamLifecycleState, "stream", no_time_updated);

/// Mock stream admin client
#[derive(Clone, Default)]
pub struct MockStreamAdminClient {
    pub backend: MockBackend,
    pub streams: Table<Stream>,
}

impl MockStreamAdminClient {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl StreamAdminClient for MockStreamAdminClient {
    async fn get_stream(&self, id: &str) -> Result<Stream, OciError> {
        self.streams.fetch(&self.backend, "get_stream", id)
    }

    async fn create_stream(&self, stream: &Stream, opc_retry_token: &str) -> Result<Stream, OciError> {
        let mut created = self
            .streams
            .create(&self.backend, "create_stream", stream, opc_retry_token)?;
        if created.messages_endpoint.is_none() {
            created.messages_endpoint = Some("https://cell-1.streaming.mock.oci.oraclecloud.com".to_string());
            self.streams.insert(created.clone());
        }
        Ok(created)
    }

    async fn update_stream(&self, stream: &Stream) -> Result<(), OciError> {
        self.streams.update(&self.backend, "update_stream", stream)
    }

    async fn delete_stream(&self, id: &str) -> Result<(), OciError> {
        self.streams.delete(&self.backend, "delete_stream", id)
    }

    async fn change_stream_compartment(&self, id: &str, compartment_id: &str) -> Result<(), OciError> {
        self.streams.change_compartment(
            &self.backend,
            "change_stream_compartment",
            id,
            compartment_id,
        )
    }
}
