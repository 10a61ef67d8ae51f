//! GraphQL schema: query root and entity object types
//!
//! Scalar fields are read straight off the entity snapshots; relationship and
//! query fields delegate to [`Resolvers`], one backend call per field.
//!
//! Resolved fields are nullable in the schema so that a failed field becomes
//! `null` plus an error entry without nulling its siblings. On success they are
//! never null.

use crate::core::{Account, CallContext, Order, Product};
use crate::resolvers::Resolvers;
use async_graphql::{
    Context, EmptyMutation, EmptySubscription, ErrorExtensions, Object, Result, Schema,
};

/// Schema type served by the query API
pub type FanoutSchema = Schema<QueryRoot, EmptyMutation, EmptySubscription>;

/// Build the schema over `resolvers`
///
/// `Order` is registered explicitly: orders are produced by the part of the
/// engine that owns them, and only their relationship fields resolve here.
pub fn build_schema(resolvers: Resolvers) -> FanoutSchema {
    Schema::build(QueryRoot, EmptyMutation, EmptySubscription)
        .register_output_type::<Order>()
        .data(resolvers)
        .finish()
}

/// Call context of the current request, or a fresh root context
fn call_context(ctx: &Context<'_>) -> CallContext {
    ctx.data_opt::<CallContext>()
        .cloned()
        .unwrap_or_else(CallContext::root)
}

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Accounts, either the one matching `id` or a page
    async fn accounts(
        &self,
        ctx: &Context<'_>,
        skip: Option<u64>,
        take: Option<u64>,
        id: Option<String>,
    ) -> Result<Option<Vec<Account>>> {
        let resolvers = ctx.data::<Resolvers>()?;
        resolvers
            .accounts(&call_context(ctx), skip, take, id.as_deref())
            .await
            .map(|listing| Some(listing.into_vec()))
            .map_err(|e| e.extend())
    }

    /// Products, either the one matching `id` or a page
    async fn products(
        &self,
        ctx: &Context<'_>,
        skip: Option<u64>,
        take: Option<u64>,
        id: Option<String>,
    ) -> Result<Option<Vec<Product>>> {
        let resolvers = ctx.data::<Resolvers>()?;
        resolvers
            .products(&call_context(ctx), skip, take, id.as_deref())
            .await
            .map(|listing| Some(listing.into_vec()))
            .map_err(|e| e.extend())
    }
}

#[Object]
impl Account {
    async fn id(&self) -> &str {
        &self.id
    }

    async fn name(&self) -> &str {
        &self.name
    }
}

#[Object]
impl Product {
    async fn id(&self) -> &str {
        &self.id
    }

    async fn name(&self) -> &str {
        &self.name
    }

    async fn description(&self) -> &str {
        &self.description
    }

    async fn price(&self) -> f64 {
        self.price
    }
}

#[Object]
impl Order {
    async fn id(&self) -> &str {
        &self.id
    }

    async fn account_id(&self) -> &str {
        &self.account_id
    }

    /// The account that placed this order
    async fn account(&self, ctx: &Context<'_>) -> Result<Option<Account>> {
        let resolvers = ctx.data::<Resolvers>()?;
        resolvers
            .order_account(&call_context(ctx), self)
            .await
            .map(Some)
            .map_err(|e| e.extend())
    }

    async fn products(
        &self,
        ctx: &Context<'_>,
        skip: Option<u64>,
        take: Option<u64>,
    ) -> Result<Option<Vec<Product>>> {
        let resolvers = ctx.data::<Resolvers>()?;
        resolvers
            .order_products(&call_context(ctx), self, skip, take)
            .await
            .map(Some)
            .map_err(|e| e.extend())
    }
}
