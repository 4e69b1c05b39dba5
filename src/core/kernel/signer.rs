use crate::core::errors::QashError;
use secrecy::{ExposeSecret, Secret};
use std::collections::HashMap;

/// Result type for signing operations: headers to attach to the request
pub type SignatureResult = Result<HashMap<String, String>, QashError>;

/// Signer trait for request authentication
///
/// Implementations produce the headers an authenticated request must carry.
pub trait Signer: Send + Sync {
    /// Sign a request and return the headers to add
    ///
    /// # Arguments
    /// * `method` - HTTP method (GET, POST, etc.)
    /// * `endpoint` - API endpoint path, including any query string
    /// * `body` - Raw request body bytes
    fn sign_request(&self, method: &str, endpoint: &str, body: &[u8]) -> SignatureResult;
}

/// Static-key signer sending `Authorization: Basic {api_key}`.
///
/// The key goes out verbatim; it is not base64-encoded credentials.
pub struct BasicKeySigner {
    api_key: Secret<String>,
}

impl BasicKeySigner {
    pub fn new(api_key: Secret<String>) -> Self {
        Self { api_key }
    }

    pub fn header_value(&self) -> String {
        format!("Basic {}", self.api_key.expose_secret())
    }
}

impl std::fmt::Debug for BasicKeySigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicKeySigner").finish_non_exhaustive()
    }
}

impl Signer for BasicKeySigner {
    fn sign_request(&self, _method: &str, _endpoint: &str, _body: &[u8]) -> SignatureResult {
        let mut headers = HashMap::new();
        headers.insert("Authorization".to_string(), self.header_value());
        Ok(headers)
    }
}
