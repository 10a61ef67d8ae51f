//! Shared test harness for resolver testing
//!
//! Provides `FakeBackend`, a scripted account + catalog service that records
//! every call it actually starts serving, so tests can assert on how many
//! backend calls a resolver issued and with which arguments.
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! mod harness;
//! use harness::*;
//! ```

#![allow(dead_code)]

use async_trait::async_trait;
use fanout::prelude::*;
use std::sync::Mutex;
use std::time::Duration;

/// A backend call as observed by the fake
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    GetAccount(String),
    GetAccounts { skip: u64, take: u64 },
    GetProduct(String),
    GetProducts { skip: u64, take: u64 },
}

#[derive(Default)]
struct Recorded {
    calls: Vec<Call>,
    remaining: Vec<Option<Duration>>,
    contexts: Vec<CallContext>,
    answered: usize,
}

/// Scripted backend implementing both collaborator traits
///
/// Page lookups return the scripted records verbatim, exactly as a backend
/// would have sliced them.
#[derive(Clone, Default)]
pub struct FakeBackend {
    recorded: Arc<Mutex<Recorded>>,
    accounts: Vec<AccountRecord>,
    products: Vec<ProductRecord>,
    failure: Option<BackendError>,
    delay: Option<Duration>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_accounts(mut self, accounts: Vec<AccountRecord>) -> Self {
        self.accounts = accounts;
        self
    }

    pub fn with_products(mut self, products: Vec<ProductRecord>) -> Self {
        self.products = products;
        self
    }

    /// Fail every call with `failure`
    pub fn failing_with(mut self, failure: BackendError) -> Self {
        self.failure = Some(failure);
        self
    }

    /// Wait `delay` before answering
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Calls started so far, in order
    pub fn calls(&self) -> Vec<Call> {
        self.recorded.lock().unwrap().calls.clone()
    }

    /// Remaining time of the call context each call received
    pub fn remaining(&self) -> Vec<Option<Duration>> {
        self.recorded.lock().unwrap().remaining.clone()
    }

    /// Call context each call received
    pub fn contexts(&self) -> Vec<CallContext> {
        self.recorded.lock().unwrap().contexts.clone()
    }

    /// Number of calls that ran to the point of answering
    pub fn answered(&self) -> usize {
        self.recorded.lock().unwrap().answered
    }

    /// Resolvers backed by this fake for both services
    pub fn resolvers(&self) -> Resolvers {
        Resolvers::new(Arc::new(self.clone()), Arc::new(self.clone()))
    }

    async fn serve(&self, ctx: &CallContext, call: Call) -> Result<(), BackendError> {
        {
            let mut recorded = self.recorded.lock().unwrap();
            recorded.calls.push(call);
            recorded.remaining.push(ctx.remaining());
            recorded.contexts.push(ctx.clone());
        }
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.recorded.lock().unwrap().answered += 1;
        match &self.failure {
            Some(failure) => Err(failure.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl AccountService for FakeBackend {
    async fn get_account(
        &self,
        ctx: &CallContext,
        id: &str,
    ) -> Result<AccountRecord, BackendError> {
        self.serve(ctx, Call::GetAccount(id.to_string())).await?;
        self.accounts
            .iter()
            .find(|account| account.id == id)
            .cloned()
            .ok_or_else(|| BackendError::not_found("account", "GetAccount", id))
    }

    async fn get_accounts(
        &self,
        ctx: &CallContext,
        skip: u64,
        take: u64,
    ) -> Result<Vec<AccountRecord>, BackendError> {
        self.serve(ctx, Call::GetAccounts { skip, take }).await?;
        Ok(self.accounts.clone())
    }
}

#[async_trait]
impl CatalogService for FakeBackend {
    async fn get_product(
        &self,
        ctx: &CallContext,
        id: &str,
    ) -> Result<ProductRecord, BackendError> {
        self.serve(ctx, Call::GetProduct(id.to_string())).await?;
        self.products
            .iter()
            .find(|product| product.id == id)
            .cloned()
            .ok_or_else(|| BackendError::not_found("catalog", "GetProduct", id))
    }

    async fn get_products(
        &self,
        ctx: &CallContext,
        skip: u64,
        take: u64,
    ) -> Result<Vec<ProductRecord>, BackendError> {
        self.serve(ctx, Call::GetProducts { skip, take }).await?;
        Ok(self.products.clone())
    }
}

/// `count` accounts with ids "1".."count", named "account-<id>"
pub fn sample_accounts(count: usize) -> Vec<AccountRecord> {
    (1..=count)
        .map(|i| AccountRecord::new(i.to_string(), format!("account-{}", i)))
        .collect()
}

/// `count` products with ids "p1".."p<count>"
pub fn sample_products(count: usize) -> Vec<ProductRecord> {
    (1..=count)
        .map(|i| {
            ProductRecord::new(
                format!("p{}", i),
                format!("product-{}", i),
                format!("description of product {}", i),
                i as f64 * 10.0,
            )
        })
        .collect()
}
