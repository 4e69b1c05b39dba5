use crate::core::{
    errors::QashError,
    types::{
        Account, AccountHolder, AccountListQuery, Currency, IndividualAccountHolderCreationData,
        Partner,
    },
};
use async_trait::async_trait;

#[async_trait]
pub trait PartnerDirectory {
    /// Get the partner the configured API key belongs to
    async fn get_authorized_partner(&self) -> Result<Partner, QashError>;
}

#[async_trait]
pub trait CoreBanking {
    /// List every account holder visible to the partner
    async fn get_account_holders(&self) -> Result<Vec<AccountHolder>, QashError>;

    /// List accounts, optionally filtered
    async fn get_accounts(&self, query: &AccountListQuery) -> Result<Vec<Account>, QashError>;

    /// Get a single account holder by identifier
    async fn get_account_holder(&self, account_holder_id: &str)
        -> Result<AccountHolder, QashError>;

    /// Create an individual account holder
    async fn create_individual_account_holder(
        &self,
        data: &IndividualAccountHolderCreationData,
    ) -> Result<AccountHolder, QashError>;
}

#[async_trait]
pub trait DatasetSource {
    /// List all currencies
    async fn get_currencies(&self) -> Result<Vec<Currency>, QashError>;

    /// Get a single currency by identifier
    async fn get_currency(&self, currency_id: &str) -> Result<Currency, QashError>;
}
