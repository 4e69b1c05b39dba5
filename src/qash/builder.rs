use crate::core::{
    config::{ConfigError, QashConfig},
    kernel::{BasicKeySigner, ReqwestRest, RestClientBuilder, RestClientConfig},
};
use crate::qash::client::QashClient;
use std::sync::Arc;

/// Builder for reqwest-backed Qash clients
pub struct QashBuilder {
    config: QashConfig,
    user_agent: Option<String>,
}

impl QashBuilder {
    pub fn new(config: QashConfig) -> Self {
        Self {
            config,
            user_agent: None,
        }
    }

    /// Override the default `qash-sdk/{version}` user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build only the transport, signed with the configured API key
    pub fn build_rest(&self) -> Result<ReqwestRest, ConfigError> {
        let mut rest_config = RestClientConfig::new(self.config.base_url().to_string());
        if let Some(user_agent) = &self.user_agent {
            rest_config = rest_config.with_user_agent(user_agent.clone());
        }

        let signer = Arc::new(BasicKeySigner::new(self.config.api_key.clone()));
        RestClientBuilder::new(rest_config)
            .with_signer(signer)
            .build()
    }

    pub fn build(self) -> Result<QashClient<ReqwestRest>, ConfigError> {
        let rest = self.build_rest()?;
        QashClient::with_rest(rest)
    }
}

/// Create a client from `{PREFIX}_API_KEY` / `{PREFIX}_ENVIRONMENT`
pub fn build_client_from_env(prefix: &str) -> Result<QashClient<ReqwestRest>, ConfigError> {
    QashBuilder::new(QashConfig::from_env(prefix)?).build()
}
