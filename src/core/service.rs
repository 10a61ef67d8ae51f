//! Collaborator traits for the backend services
//!
//! The resolvers depend only on these traits. Implementations own connection
//! management and wire encoding; they receive the scoped [`CallContext`] of
//! the call so they can forward its deadline and observe cancellation.

use crate::core::deadline::CallContext;
use crate::core::error::BackendError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub const ACCOUNT_SERVICE: &str = "account";
pub const CATALOG_SERVICE: &str = "catalog";

pub const GET_ACCOUNT: &str = "GetAccount";
pub const GET_ACCOUNTS: &str = "GetAccounts";
pub const GET_PRODUCT: &str = "GetProduct";
pub const GET_PRODUCTS: &str = "GetProducts";

/// Account record as returned by the account service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRecord {
    pub id: String,
    pub name: String,
}

impl AccountRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Product record as returned by the catalog service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
}

impl ProductRecord {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        price: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            price,
        }
    }
}

/// Remote account service
///
/// Handles are shared read-only across concurrent resolver invocations.
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Get an account by ID
    ///
    /// An unknown ID is reported as a failure with [`CallStatus::NotFound`].
    ///
    /// [`CallStatus::NotFound`]: crate::core::error::CallStatus::NotFound
    async fn get_account(&self, ctx: &CallContext, id: &str) -> Result<AccountRecord, BackendError>;

    /// Get a page of accounts, in backend order
    async fn get_accounts(
        &self,
        ctx: &CallContext,
        skip: u64,
        take: u64,
    ) -> Result<Vec<AccountRecord>, BackendError>;
}

/// Remote catalog service
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Get a product by ID
    async fn get_product(&self, ctx: &CallContext, id: &str) -> Result<ProductRecord, BackendError>;

    /// Get a page of products, in backend order
    async fn get_products(
        &self,
        ctx: &CallContext,
        skip: u64,
        take: u64,
    ) -> Result<Vec<ProductRecord>, BackendError>;
}
