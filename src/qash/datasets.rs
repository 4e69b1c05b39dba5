use crate::core::{
    errors::QashError, kernel::RestClient, traits::DatasetSource, types::Currency,
};
use crate::qash::rest::QashRest;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::instrument;

/// Public reference datasets; these calls never send credentials
pub struct Datasets<R: RestClient> {
    rest: Arc<QashRest<R>>,
}

impl<R: RestClient> Datasets<R> {
    pub fn new(rest: Arc<QashRest<R>>) -> Self {
        Self { rest }
    }

    #[instrument(skip(self), fields(environment = %self.rest.environment()))]
    pub async fn get_currencies(&self) -> Result<Vec<Currency>, QashError> {
        self.rest.get_currencies().await
    }

    #[instrument(skip(self), fields(environment = %self.rest.environment()))]
    pub async fn get_currency(&self, currency_id: &str) -> Result<Currency, QashError> {
        self.rest.get_currency(currency_id).await
    }
}

#[async_trait]
impl<R: RestClient> DatasetSource for Datasets<R> {
    async fn get_currencies(&self) -> Result<Vec<Currency>, QashError> {
        Self::get_currencies(self).await
    }

    async fn get_currency(&self, currency_id: &str) -> Result<Currency, QashError> {
        Self::get_currency(self, currency_id).await
    }
}
