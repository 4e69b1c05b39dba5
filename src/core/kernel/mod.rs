/// Qash kernel - transport and response handling shared by every endpoint
///
/// # Architecture
///
/// ## Transport Layer
/// - `RestClient`: Transport interface, one request in, raw body out
/// - `ReqwestRest`: reqwest-backed implementation
///
/// ## Authentication
/// - `Signer`: Pluggable authentication interface
/// - `BasicKeySigner`: Static `Authorization: Basic {api_key}` header
///
/// ## Message Handling
/// - `query`: Filter mapping to query string serialization
/// - `envelope`: `error`/`errors` detection and typed decoding
///
/// # Usage
/// ```rust,no_run
/// use qash_sdk::core::kernel::*;
/// use qash_sdk::core::config::QashEnvironment;
/// use secrecy::Secret;
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let rest_config = RestClientConfig::new(QashEnvironment::Staging.base_url().to_string());
/// let signer = Arc::new(BasicKeySigner::new(Secret::new("api_key".to_string())));
/// let rest = RestClientBuilder::new(rest_config)
///     .with_signer(signer)
///     .build()?;
///
/// let raw = rest.execute(RestRequest::get("/v1/partner/@self", true)).await?;
/// let partner: qash_sdk::Partner = envelope::decode(&raw)?;
/// # Ok(())
/// # }
/// ```
pub mod envelope;
pub mod query;
pub mod rest;
pub mod signer;

// Re-export key types for convenience
pub use envelope::{check_envelope, decode, unwrap_envelope};
pub use query::build_query;
pub use rest::{ReqwestRest, RestClient, RestClientBuilder, RestClientConfig, RestRequest};
pub use signer::{BasicKeySigner, SignatureResult, Signer};
