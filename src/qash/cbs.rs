use crate::core::{
    errors::QashError,
    kernel::RestClient,
    traits::CoreBanking,
    types::{Account, AccountHolder, AccountListQuery, IndividualAccountHolderCreationData},
};
use crate::qash::rest::QashRest;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Core banking (CBS) operations: account holders and accounts
pub struct Cbs<R: RestClient> {
    rest: Arc<QashRest<R>>,
}

impl<R: RestClient> Cbs<R> {
    pub fn new(rest: Arc<QashRest<R>>) -> Self {
        Self { rest }
    }

    // TODO: accept a search query once the account-holders endpoint supports filtering
    #[instrument(skip(self), fields(environment = %self.rest.environment()))]
    pub async fn get_account_holders(&self) -> Result<Vec<AccountHolder>, QashError> {
        self.rest.get_account_holders().await
    }

    #[instrument(skip(self), fields(environment = %self.rest.environment()))]
    pub async fn get_accounts(&self, query: &AccountListQuery) -> Result<Vec<Account>, QashError> {
        let query_string = query.to_query_string();
        self.rest.get_accounts(&query_string).await
    }

    #[instrument(skip(self), fields(environment = %self.rest.environment()))]
    pub async fn get_account_holder(
        &self,
        account_holder_id: &str,
    ) -> Result<AccountHolder, QashError> {
        self.rest.get_account_holder(account_holder_id).await
    }

    #[instrument(skip(self, data), fields(environment = %self.rest.environment(), name = %data.name))]
    pub async fn create_individual_account_holder(
        &self,
        data: &IndividualAccountHolderCreationData,
    ) -> Result<AccountHolder, QashError> {
        let body = individual_holder_body(data)?;
        self.rest.create_account_holder(&body).await
    }
}

/// Serialize creation data with `type` forced to `individual`.
fn individual_holder_body(data: &IndividualAccountHolderCreationData) -> Result<Value, QashError> {
    let mut body = serde_json::to_value(data)?;
    let Value::Object(fields) = &mut body else {
        debug!("Creation data did not serialize to an object");
        return Err(QashError::UnexpectedIssue);
    };

    fields.insert("type".to_string(), Value::String("individual".to_string()));
    Ok(body)
}

#[async_trait]
impl<R: RestClient> CoreBanking for Cbs<R> {
    async fn get_account_holders(&self) -> Result<Vec<AccountHolder>, QashError> {
        Self::get_account_holders(self).await
    }

    async fn get_accounts(&self, query: &AccountListQuery) -> Result<Vec<Account>, QashError> {
        Self::get_accounts(self, query).await
    }

    async fn get_account_holder(
        &self,
        account_holder_id: &str,
    ) -> Result<AccountHolder, QashError> {
        Self::get_account_holder(self, account_holder_id).await
    }

    async fn create_individual_account_holder(
        &self,
        data: &IndividualAccountHolderCreationData,
    ) -> Result<AccountHolder, QashError> {
        Self::create_individual_account_holder(self, data).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_body_injects_individual_type() {
        let data = IndividualAccountHolderCreationData::new("Ana")
            .with_discord_id("42")
            .with_metadata(json!({"tier": "gold"}));
        let body = individual_holder_body(&data).unwrap();

        assert_eq!(body["type"], "individual");
        assert_eq!(body["name"], "Ana");
        assert_eq!(body["discord_id"], "42");
        assert_eq!(body["minecraft_id"], Value::Null);
        assert_eq!(body["metadata"]["tier"], "gold");
    }

    #[test]
    fn test_injected_type_overrides_caller_type() {
        let data = IndividualAccountHolderCreationData::new("Ana")
            .with_field("type", json!("business"))
            .with_field("region", json!("eu"));
        let body = individual_holder_body(&data).unwrap();

        assert_eq!(body["type"], "individual");
        assert_eq!(body["region"], "eu");
    }
}
