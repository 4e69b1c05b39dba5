use crate::core::config::ConfigError;
use crate::core::errors::QashError;
use crate::core::kernel::signer::Signer;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, Request};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, instrument, trace};

/// A single HTTP call, described independently of the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestRequest {
    pub method: Method,
    /// Path relative to the base URL, including any query string
    pub endpoint: String,
    pub body: Option<Vec<u8>>,
    pub authenticated: bool,
}

impl RestRequest {
    pub fn get(endpoint: impl Into<String>, authenticated: bool) -> Self {
        Self {
            method: Method::GET,
            endpoint: endpoint.into(),
            body: None,
            authenticated,
        }
    }

    pub fn post_json(
        endpoint: impl Into<String>,
        body: &Value,
        authenticated: bool,
    ) -> Result<Self, QashError> {
        Ok(Self {
            method: Method::POST,
            endpoint: endpoint.into(),
            body: Some(serde_json::to_vec(body)?),
            authenticated,
        })
    }

    /// Request body parsed back as JSON, if any
    pub fn body_json(&self) -> Option<Value> {
        self.body
            .as_deref()
            .and_then(|bytes| serde_json::from_slice(bytes).ok())
    }
}

/// REST client trait for making HTTP requests
///
/// Implementations send exactly one request per call and hand back the raw
/// response body. They do not look at the body; unwrapping it is left to
/// the caller.
#[async_trait]
pub trait RestClient: Send + Sync {
    /// Send the request and return the response body as text
    ///
    /// The HTTP status code is not an error by itself; only transport
    /// failures are.
    async fn execute(&self, request: RestRequest) -> Result<String, QashError>;

    /// Base URL every endpoint is appended to
    fn base_url(&self) -> &str;
}

/// Configuration for the REST client
#[derive(Clone, Debug)]
pub struct RestClientConfig {
    /// Base URL for the API
    pub base_url: String,
    /// User agent string to include in requests
    pub user_agent: String,
}

impl RestClientConfig {
    /// Create a new configuration
    ///
    /// # Arguments
    /// * `base_url` - Base URL for the API
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            user_agent: concat!("qash-sdk/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    /// Set the user agent string
    pub fn with_user_agent(mut self, user_agent: String) -> Self {
        self.user_agent = user_agent;
        self
    }
}

/// Builder for creating REST client instances
pub struct RestClientBuilder {
    config: RestClientConfig,
    signer: Option<Arc<dyn Signer>>,
}

impl RestClientBuilder {
    pub fn new(config: RestClientConfig) -> Self {
        Self {
            config,
            signer: None,
        }
    }

    /// Set the signer for authenticated requests
    pub fn with_signer(mut self, signer: Arc<dyn Signer>) -> Self {
        self.signer = Some(signer);
        self
    }

    /// Build the REST client
    ///
    /// No request timeout is configured; a stalled call waits until the
    /// caller drops its future.
    pub fn build(self) -> Result<ReqwestRest, ConfigError> {
        let client = Client::builder()
            .user_agent(&self.config.user_agent)
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(ReqwestRest {
            client,
            config: self.config,
            signer: self.signer,
        })
    }
}

/// Implementation of `RestClient` using reqwest
#[derive(Clone)]
pub struct ReqwestRest {
    client: Client,
    config: RestClientConfig,
    signer: Option<Arc<dyn Signer>>,
}

impl std::fmt::Debug for ReqwestRest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestRest")
            .field("config", &self.config)
            .field("has_signer", &self.signer.is_some())
            .finish_non_exhaustive()
    }
}

impl ReqwestRest {
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Build the full URL for an endpoint
    fn build_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.config.base_url, endpoint)
    }

    /// Turn a `RestRequest` into a ready-to-send reqwest request
    pub fn build_request(&self, request: &RestRequest) -> Result<Request, QashError> {
        let mut builder = self
            .client
            .request(request.method.clone(), self.build_url(&request.endpoint));

        if request.authenticated {
            let Some(signer) = &self.signer else {
                debug!(endpoint = %request.endpoint, "Authentication required but no signer provided");
                return Err(QashError::UnexpectedIssue);
            };

            let body = request.body.as_deref().unwrap_or_default();
            let headers = signer.sign_request(request.method.as_str(), &request.endpoint, body)?;
            for (key, value) in headers {
                builder = builder.header(key, value);
            }
        }

        if let Some(body) = &request.body {
            builder = builder
                .header(CONTENT_TYPE, "application/json")
                .body(body.clone());
        }

        Ok(builder.build()?)
    }
}

#[async_trait]
impl RestClient for ReqwestRest {
    #[instrument(skip(self, request), fields(base_url = %self.config.base_url, method = %request.method, endpoint = %request.endpoint))]
    async fn execute(&self, request: RestRequest) -> Result<String, QashError> {
        let http_request = self.build_request(&request)?;
        let response = self.client.execute(http_request).await?;

        let status = response.status();
        let body = response.text().await?;

        trace!(status = %status, "Response body: {}", body);
        Ok(body)
    }

    fn base_url(&self) -> &str {
        &self.config.base_url
    }
}
