//! Stream admin HTTP client

use serde_json::{json, Value};

use crate::common::{strip_nulls, HttpClient};
use crate::error::OciError;
use crate::models::streaming::Stream;
use crate::oci_trait::StreamAdminClient;

pub struct StreamAdminHttpClient {
    http: HttpClient,
}

impl StreamAdminHttpClient {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }
}

// A stream goes either into an explicit pool or into the compartment's default pool.
pub(crate) fn stream_create_body(stream: &Stream) -> Value {
    let placement = match &stream.stream_pool_id {
        Some(pool) => json!({ "streamPoolId": pool }),
        None => json!({ "compartmentId": stream.compartment_id }),
    };
    let mut body = strip_nulls(json!({
        "name": stream.name,
        "partitions": stream.partitions,
        "retentionInHours": stream.retention_in_hours,
        "freeformTags": stream.freeform_tags,
        "definedTags": stream.defined_tags,
    }));
    if let (Value::Object(body), Value::Object(placement)) = (&mut body, placement) {
        body.extend(placement);
    }
    body
}

pub(crate) fn stream_update_body(stream: &Stream) -> Value {
    strip_nulls(json!({
        "streamPoolId": stream.stream_pool_id,
        "freeformTags": stream.freeform_tags,
        "definedTags": stream.defined_tags,
    }))
}

#[async_trait::async_trait]
impl StreamAdminClient for StreamAdminHttpClient {
    async fn get_stream(&self, id: &str) -> Result<Stream, OciError> {
        self.http.get(&format!("/streams/{}", id)).await
    }

    async fn create_stream(&self, stream: &Stream, opc_retry_token: &str) -> Result<Stream, OciError> {
        self.http
            .create("/streams", &stream_create_body(stream), opc_retry_token)
            .await
    }

    async fn update_stream(&self, stream: &Stream) -> Result<(), OciError> {
        self.http
            .put(&format!("/streams/{}", stream.id), &stream_update_body(stream))
            .await
    }

    async fn delete_stream(&self, id: &str) -> Result<(), OciError> {
        self.http.delete(&format!("/streams/{}", id)).await
    }

    async fn change_stream_compartment(&self, id: &str, compartment_id: &str) -> Result<(), OciError> {
        self.http
            .action(
                &format!("/streams/{}/actions/changeCompartment", id),
                &json!({ "compartmentId": compartment_id }),
            )
            .await
    }
}
