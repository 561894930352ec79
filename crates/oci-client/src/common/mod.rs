//! Common utilities for OCI API clients
//!
//! Provides the HTTP transport shared by every service client.

pub mod signer;

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{OciError, ServiceErrorBody};
pub use signer::{BearerTokenSigner, RequestSigner};

pub const OPC_RETRY_TOKEN_HEADER: &str = "opc-retry-token";
pub const OPC_REQUEST_ID_HEADER: &str = "opc-request-id";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client wrapper bound to one service endpoint
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    signer: Arc<dyn RequestSigner>,
}

impl HttpClient {
    /// Create a new HTTP client wrapper
    pub fn new(client: Client, base_url: impl Into<String>, signer: Arc<dyn RequestSigner>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            signer,
        }
    }

    /// Build a client with the default timeout
    pub fn with_endpoint(
        base_url: impl Into<String>,
        signer: Arc<dyn RequestSigner>,
    ) -> Result<Self, OciError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(OciError::Http)?;
        Ok(Self::new(client, base_url, signer))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a full URL from a path
    pub fn build_url(&self, path: &str) -> String {
        if path.starts_with("http") {
            path.to_string()
        } else {
            format!("{}{}", self.base_url, path)
        }
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, OciError> {
        let url = self.build_url(path);
        debug!("{} {}", method, url);
        let builder = self
            .client
            .request(method, &url)
            .header("Accept", "application/json");
        self.signer.sign(builder)
    }

    async fn send(&self, builder: RequestBuilder, path: &str) -> Result<Response, OciError> {
        let response = builder.send().await.map_err(OciError::Http)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let request_id = response
            .headers()
            .get(OPC_REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let text = response.text().await.unwrap_or_default();
        let body: ServiceErrorBody = serde_json::from_str(&text).unwrap_or_else(|_| ServiceErrorBody {
            code: status.canonical_reason().unwrap_or("Unknown").replace(' ', ""),
            message: text.chars().take(500).collect(),
        });
        debug!(
            "{} failed: {} {} (opc-request-id: {:?})",
            path, status, body.code, request_id
        );
        Err(OciError::service(status.as_u16(), body.code, body.message, request_id))
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, OciError> {
        let builder = self.request(Method::GET, path)?;
        let response = self.send(builder, path).await?;
        response.json().await.map_err(OciError::Http)
    }

    /// Make a POST request that creates a resource, deduplicated by `opc_retry_token`
    pub async fn create<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &serde_json::Value,
        opc_retry_token: &str,
    ) -> Result<T, OciError> {
        debug!(
            "POST {} with body: {}",
            path,
            serde_json::to_string_pretty(body).unwrap_or_default()
        );
        let builder = self
            .request(Method::POST, path)?
            .header(OPC_RETRY_TOKEN_HEADER, opc_retry_token)
            .json(body);
        let response = self.send(builder, path).await?;
        response.json().await.map_err(OciError::Http)
    }

    /// Make a PUT request; OCI answers updates asynchronously so no body is read
    pub async fn put(&self, path: &str, body: &serde_json::Value) -> Result<(), OciError> {
        debug!(
            "PUT {} with body: {}",
            path,
            serde_json::to_string_pretty(body).unwrap_or_default()
        );
        let builder = self.request(Method::PUT, path)?.json(body);
        self.send(builder, path).await?;
        Ok(())
    }

    /// Make a POST request to an action endpoint
    pub async fn action(&self, path: &str, body: &serde_json::Value) -> Result<(), OciError> {
        debug!("POST {} (action)", path);
        let builder = self.request(Method::POST, path)?.json(body);
        self.send(builder, path).await?;
        Ok(())
    }

    /// Make a DELETE request
    pub async fn delete(&self, path: &str) -> Result<(), OciError> {
        let builder = self.request(Method::DELETE, path)?;
        self.send(builder, path).await?;
        Ok(())
    }
}

/// Drop `null` members so optional fields are omitted from request bodies
pub fn strip_nulls(mut value: serde_json::Value) -> serde_json::Value {
    if let serde_json::Value::Object(map) = &mut value {
        map.retain(|_, v| !v.is_null());
        for v in map.values_mut() {
            *v = strip_nulls(v.take());
        }
    }
    value
}
