//! Relationship fields on `Order`

use super::Resolvers;
use crate::core::{Account, BackendError, CallContext, Order, PageRange, Product};

impl Resolvers {
    /// Resolve `Order.account`
    ///
    /// Looks up the account stored in the order's `account_id`. On success the
    /// field always holds exactly one account.
    #[tracing::instrument(
        name = "Order.account",
        skip_all,
        fields(order_id = %order.id, account_id = %order.account_id)
    )]
    pub async fn order_account(
        &self,
        ctx: &CallContext,
        order: &Order,
    ) -> Result<Account, BackendError> {
        self.fetch_account(ctx, &order.account_id).await
    }

    /// Resolve `Order.products(skip, take)`
    ///
    /// The catalog offers no per-order filter, so this is a plain page lookup.
    /// An empty page resolves to an empty list, never to null.
    #[tracing::instrument(
        name = "Order.products",
        skip_all,
        fields(order_id = %order.id, skip = ?skip, take = ?take)
    )]
    pub async fn order_products(
        &self,
        ctx: &CallContext,
        order: &Order,
        skip: Option<u64>,
        take: Option<u64>,
    ) -> Result<Vec<Product>, BackendError> {
        let range = PageRange::normalize(skip, take);
        self.fetch_product_page(ctx, range).await
    }
}
