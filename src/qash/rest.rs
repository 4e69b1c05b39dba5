use crate::core::config::QashEnvironment;
use crate::core::errors::QashError;
use crate::core::kernel::{envelope, RestClient, RestRequest};
use crate::core::types::{Account, AccountHolder, Currency, Partner};
use serde::de::DeserializeOwned;
use serde_json::Value;

pub mod endpoints {
    pub const PARTNER_SELF: &str = "/v1/partner/@self";
    pub const ACCOUNT_HOLDERS: &str = "/v1/cbs/account-holders";
    pub const ACCOUNT_HOLDER: &str = "/v1/cbs/account-holder";
    pub const ACCOUNTS: &str = "/v1/cbs/accounts";
    pub const CURRENCIES: &str = "/datasets/currencies";
    pub const CURRENCY: &str = "/datasets/currency";
}

/// Thin typed wrapper around `RestClient` for the Qash API
///
/// Every method sends one request and runs the body through the envelope
/// check before decoding it.
pub struct QashRest<R: RestClient> {
    client: R,
    environment: QashEnvironment,
}

impl<R: RestClient> QashRest<R> {
    pub fn new(client: R, environment: QashEnvironment) -> Self {
        Self {
            client,
            environment,
        }
    }

    pub const fn environment(&self) -> QashEnvironment {
        self.environment
    }

    pub const fn transport(&self) -> &R {
        &self.client
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        authenticated: bool,
    ) -> Result<T, QashError> {
        let raw = self
            .client
            .execute(RestRequest::get(endpoint, authenticated))
            .await?;
        envelope::decode(&raw)
    }

    async fn post_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &Value,
        authenticated: bool,
    ) -> Result<T, QashError> {
        let request = RestRequest::post_json(endpoint, body, authenticated)?;
        let raw = self.client.execute(request).await?;
        envelope::decode(&raw)
    }

    /// Get the partner bound to the API key
    pub async fn get_authorized_partner(&self) -> Result<Partner, QashError> {
        self.get_json(endpoints::PARTNER_SELF, true).await
    }

    /// Get all account holders
    pub async fn get_account_holders(&self) -> Result<Vec<AccountHolder>, QashError> {
        self.get_json(endpoints::ACCOUNT_HOLDERS, true).await
    }

    /// Get one account holder
    pub async fn get_account_holder(
        &self,
        account_holder_id: &str,
    ) -> Result<AccountHolder, QashError> {
        let endpoint = format!("{}/{}", endpoints::ACCOUNT_HOLDER, account_holder_id);
        self.get_json(&endpoint, true).await
    }

    /// Create an account holder from an already-shaped body
    pub async fn create_account_holder(&self, body: &Value) -> Result<AccountHolder, QashError> {
        self.post_json(endpoints::ACCOUNT_HOLDERS, body, true).await
    }

    /// Get accounts; `query_string` is either empty or starts with `?`
    pub async fn get_accounts(&self, query_string: &str) -> Result<Vec<Account>, QashError> {
        let endpoint = format!("{}{}", endpoints::ACCOUNTS, query_string);
        self.get_json(&endpoint, true).await
    }

    /// Get all currencies (public)
    pub async fn get_currencies(&self) -> Result<Vec<Currency>, QashError> {
        self.get_json(endpoints::CURRENCIES, false).await
    }

    /// Get one currency (public)
    pub async fn get_currency(&self, currency_id: &str) -> Result<Currency, QashError> {
        let endpoint = format!("{}/{}", endpoints::CURRENCY, currency_id);
        self.get_json(&endpoint, false).await
    }
}
