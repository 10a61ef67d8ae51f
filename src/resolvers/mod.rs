//! Resolver set
//!
//! One method per relationship or query field. Every invocation issues
//! exactly one backend call under the [`DeadlinePolicy`], maps the returned
//! records into public entities, and hands backend failures back unchanged.
//!
//! - `order`: relationship fields on an already-resolved [`Order`](crate::core::Order)
//! - `query`: the top-level `accounts` and `products` collection queries

mod order;
mod query;

use crate::config::FanoutConfig;
use crate::core::service::{
    ACCOUNT_SERVICE, CATALOG_SERVICE, GET_ACCOUNT, GET_ACCOUNTS, GET_PRODUCT, GET_PRODUCTS,
};
use crate::core::{
    Account, AccountService, BackendError, CallContext, CatalogService, DeadlinePolicy, PageRange,
    Product,
};
use std::sync::Arc;

/// Resolvers bound to the backend service handles
///
/// Cheap to clone; the service handles are shared read-only.
#[derive(Clone)]
pub struct Resolvers {
    accounts: Arc<dyn AccountService>,
    catalog: Arc<dyn CatalogService>,
    deadline: DeadlinePolicy,
}

impl Resolvers {
    /// Create resolvers with the default three-second call deadline
    pub fn new(accounts: Arc<dyn AccountService>, catalog: Arc<dyn CatalogService>) -> Self {
        Self {
            accounts,
            catalog,
            deadline: DeadlinePolicy::default(),
        }
    }

    /// Create resolvers using the call timeout from `config`
    pub fn from_config(
        accounts: Arc<dyn AccountService>,
        catalog: Arc<dyn CatalogService>,
        config: &FanoutConfig,
    ) -> Self {
        Self::new(accounts, catalog).with_deadline(DeadlinePolicy::new(config.call_timeout()))
    }

    pub fn with_deadline(mut self, deadline: DeadlinePolicy) -> Self {
        self.deadline = deadline;
        self
    }

    pub fn deadline(&self) -> DeadlinePolicy {
        self.deadline
    }

    async fn fetch_account(&self, ctx: &CallContext, id: &str) -> Result<Account, BackendError> {
        let scope = self.deadline.scope(ctx);
        let record = scope
            .run(
                ACCOUNT_SERVICE,
                GET_ACCOUNT,
                self.accounts.get_account(scope.context(), id),
            )
            .await?;
        Ok(record.into())
    }

    async fn fetch_account_page(
        &self,
        ctx: &CallContext,
        range: PageRange,
    ) -> Result<Vec<Account>, BackendError> {
        let scope = self.deadline.scope(ctx);
        let records = scope
            .run(
                ACCOUNT_SERVICE,
                GET_ACCOUNTS,
                self.accounts
                    .get_accounts(scope.context(), range.skip, range.take),
            )
            .await?;
        Ok(map_page(records, range, ACCOUNT_SERVICE, GET_ACCOUNTS))
    }

    async fn fetch_product(&self, ctx: &CallContext, id: &str) -> Result<Product, BackendError> {
        let scope = self.deadline.scope(ctx);
        let record = scope
            .run(
                CATALOG_SERVICE,
                GET_PRODUCT,
                self.catalog.get_product(scope.context(), id),
            )
            .await?;
        Ok(record.into())
    }

    async fn fetch_product_page(
        &self,
        ctx: &CallContext,
        range: PageRange,
    ) -> Result<Vec<Product>, BackendError> {
        let scope = self.deadline.scope(ctx);
        let records = scope
            .run(
                CATALOG_SERVICE,
                GET_PRODUCTS,
                self.catalog
                    .get_products(scope.context(), range.skip, range.take),
            )
            .await?;
        Ok(map_page(records, range, CATALOG_SERVICE, GET_PRODUCTS))
    }
}

/// Map a page of backend records, keeping backend order
///
/// A page never exceeds `range.take`; surplus records from a backend that
/// ignored the bound are dropped.
fn map_page<R, T>(
    records: Vec<R>,
    range: PageRange,
    service: &'static str,
    method: &'static str,
) -> Vec<T>
where
    T: From<R>,
{
    let limit = range.take_len();
    if records.len() > limit {
        tracing::warn!(
            service,
            method,
            returned = records.len(),
            take = range.take,
            "backend returned more records than requested"
        );
    }
    records.into_iter().take(limit).map(T::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::AccountRecord;

    #[test]
    fn test_map_page_keeps_order() {
        let records = vec![
            AccountRecord::new("3", "c"),
            AccountRecord::new("1", "a"),
            AccountRecord::new("2", "b"),
        ];
        let accounts: Vec<Account> = map_page(
            records,
            PageRange::normalize(None, None),
            ACCOUNT_SERVICE,
            GET_ACCOUNTS,
        );
        let ids: Vec<&str> = accounts.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["3", "1", "2"]);
    }

    #[test]
    fn test_map_page_never_exceeds_take() {
        let records: Vec<AccountRecord> = (0..10)
            .map(|i| AccountRecord::new(i.to_string(), "x"))
            .collect();
        let accounts: Vec<Account> = map_page(
            records,
            PageRange::normalize(None, Some(4)),
            ACCOUNT_SERVICE,
            GET_ACCOUNTS,
        );
        assert_eq!(accounts.len(), 4);
        assert_eq!(accounts[0].id, "0");
        assert_eq!(accounts[3].id, "3");
    }
}
