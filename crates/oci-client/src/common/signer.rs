//! Request authentication

use reqwest::RequestBuilder;

use crate::error::OciError;

/// Adds credentials to an outgoing request
pub trait RequestSigner: Send + Sync {
    fn sign(&self, request: RequestBuilder) -> Result<RequestBuilder, OciError>;
}

/// Sends a static bearer token (instance-principal or session token exchange
/// is expected to happen outside the operator)
pub struct BearerTokenSigner {
    token: String,
}

impl BearerTokenSigner {
    pub fn new(token: impl Into<String>) -> Result<Self, OciError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(OciError::InvalidRequest("auth token is empty".to_string()));
        }
        Ok(Self { token })
    }
}

impl RequestSigner for BearerTokenSigner {
    fn sign(&self, request: RequestBuilder) -> Result<RequestBuilder, OciError> {
        Ok(request.bearer_auth(&self.token))
    }
}

impl std::fmt::Debug for BearerTokenSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BearerTokenSigner")
            .field("token", &"<redacted>")
            .finish()
    }
}
