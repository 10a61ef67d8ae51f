//! Top-level collection queries

use super::Resolvers;
use crate::core::{Account, BackendError, CallContext, Listing, Lookup, Product};

impl Resolvers {
    /// Resolve `accounts(skip, take, id)`
    ///
    /// A non-empty `id` fetches that single account and ignores `skip`/`take`;
    /// otherwise a page of accounts is fetched.
    #[tracing::instrument(
        name = "Query.accounts",
        skip_all,
        fields(id = ?id, skip = ?skip, take = ?take)
    )]
    pub async fn accounts(
        &self,
        ctx: &CallContext,
        skip: Option<u64>,
        take: Option<u64>,
        id: Option<&str>,
    ) -> Result<Listing<Account>, BackendError> {
        match Lookup::from_args(id, skip, take) {
            Lookup::ById(id) => self.fetch_account(ctx, &id).await.map(Listing::ById),
            Lookup::Page(range) => self
                .fetch_account_page(ctx, range)
                .await
                .map(Listing::Page),
        }
    }

    /// Resolve `products(skip, take, id)`
    #[tracing::instrument(
        name = "Query.products",
        skip_all,
        fields(id = ?id, skip = ?skip, take = ?take)
    )]
    pub async fn products(
        &self,
        ctx: &CallContext,
        skip: Option<u64>,
        take: Option<u64>,
        id: Option<&str>,
    ) -> Result<Listing<Product>, BackendError> {
        match Lookup::from_args(id, skip, take) {
            Lookup::ById(id) => self.fetch_product(ctx, &id).await.map(Listing::ById),
            Lookup::Page(range) => self
                .fetch_product_page(ctx, range)
                .await
                .map(Listing::Page),
        }
    }
}
