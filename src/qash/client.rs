use crate::core::{
    config::{ConfigError, QashConfig, QashEnvironment},
    errors::QashError,
    kernel::{ReqwestRest, RestClient},
    traits::PartnerDirectory,
    types::Partner,
};
use crate::qash::{builder::QashBuilder, cbs::Cbs, datasets::Datasets, rest::QashRest};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::instrument;

/// Root Qash client
///
/// Holds the credentials and environment for its whole lifetime and hands
/// the same read-only transport to the `cbs` and `datasets` sub-clients.
///
/// ```rust,no_run
/// use qash_sdk::{QashClient, QashEnvironment};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let qash = QashClient::new("api_key", QashEnvironment::Staging)?;
/// let partner = qash.get_authorized_partner().await?;
/// let currencies = qash.datasets.get_currencies().await?;
/// # Ok(())
/// # }
/// ```
pub struct QashClient<R: RestClient = ReqwestRest> {
    rest: Arc<QashRest<R>>,
    pub cbs: Cbs<R>,
    pub datasets: Datasets<R>,
}

impl QashClient<ReqwestRest> {
    /// Create a client for the given API key and environment
    pub fn new(api_key: impl Into<String>, environment: QashEnvironment) -> Result<Self, ConfigError> {
        Self::from_config(QashConfig::new(api_key.into()).environment(environment))
    }

    pub fn from_config(config: QashConfig) -> Result<Self, ConfigError> {
        QashBuilder::new(config).build()
    }
}

impl<R: RestClient> QashClient<R> {
    /// Create a client over an existing transport
    ///
    /// The environment is read off the transport's base URL, which must be
    /// one of the Qash hosts.
    pub fn with_rest(rest: R) -> Result<Self, ConfigError> {
        let environment = QashEnvironment::from_base_url(rest.base_url())
            .ok_or_else(|| ConfigError::InvalidEnvironment(rest.base_url().to_string()))?;

        let rest = Arc::new(QashRest::new(rest, environment));
        Ok(Self {
            cbs: Cbs::new(Arc::clone(&rest)),
            datasets: Datasets::new(Arc::clone(&rest)),
            rest,
        })
    }

    pub fn environment(&self) -> QashEnvironment {
        self.rest.environment()
    }

    /// Base URL requests are actually sent to
    pub fn base_url(&self) -> &str {
        self.rest.transport().base_url()
    }

    pub fn transport(&self) -> &R {
        self.rest.transport()
    }

    #[instrument(skip(self), fields(environment = %self.rest.environment()))]
    pub async fn get_authorized_partner(&self) -> Result<Partner, QashError> {
        self.rest.get_authorized_partner().await
    }
}

impl<R: RestClient> std::fmt::Debug for QashClient<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QashClient")
            .field("environment", &self.rest.environment())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl<R: RestClient> PartnerDirectory for QashClient<R> {
    async fn get_authorized_partner(&self) -> Result<Partner, QashError> {
        Self::get_authorized_partner(self).await
    }
}
