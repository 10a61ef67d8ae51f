//! In-memory account and catalog services for testing and development

use crate::core::deadline::CallContext;
use crate::core::error::BackendError;
use crate::core::service::{
    ACCOUNT_SERVICE, AccountRecord, AccountService, CATALOG_SERVICE, CatalogService, GET_ACCOUNT,
    GET_ACCOUNTS, GET_PRODUCT, GET_PRODUCTS, ProductRecord,
};
use async_trait::async_trait;
use std::sync::{Arc, RwLock};

/// Records kept in insertion order, keyed by id
#[derive(Debug)]
struct Table<R> {
    service: &'static str,
    rows: Arc<RwLock<Vec<R>>>,
}

impl<R> Clone for Table<R> {
    fn clone(&self) -> Self {
        Self {
            service: self.service,
            rows: Arc::clone(&self.rows),
        }
    }
}

impl<R: Clone> Table<R> {
    fn new(service: &'static str) -> Self {
        Self {
            service,
            rows: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Insert or replace, keeping the position of a replaced row
    fn upsert(&self, row: R, key: impl Fn(&R) -> &str) {
        let mut rows = self.rows.write().unwrap_or_else(|e| e.into_inner());
        match rows.iter().position(|existing| key(existing) == key(&row)) {
            Some(index) => rows[index] = row,
            None => rows.push(row),
        }
    }

    fn find(
        &self,
        method: &'static str,
        id: &str,
        key: impl Fn(&R) -> &str,
    ) -> Result<R, BackendError> {
        let rows = self
            .rows
            .read()
            .map_err(|e| {
                BackendError::internal(
                    self.service,
                    method,
                    format!("Failed to acquire read lock: {}", e),
                )
            })?;

        rows.iter()
            .find(|row| key(row) == id)
            .cloned()
            .ok_or_else(|| BackendError::not_found(self.service, method, id))
    }

    fn page(&self, method: &'static str, skip: u64, take: u64) -> Result<Vec<R>, BackendError> {
        let rows = self
            .rows
            .read()
            .map_err(|e| {
                BackendError::internal(
                    self.service,
                    method,
                    format!("Failed to acquire read lock: {}", e),
                )
            })?;

        let skip = usize::try_from(skip).unwrap_or(usize::MAX);
        let take = usize::try_from(take).unwrap_or(usize::MAX);
        Ok(rows.iter().skip(skip).take(take).cloned().collect())
    }

    fn len(&self) -> usize {
        self.rows.read().unwrap_or_else(|e| e.into_inner()).len()
    }
}

/// In-memory account service
///
/// Pages follow insertion order. Uses RwLock for thread-safe access.
#[derive(Clone, Debug)]
pub struct InMemoryAccountService {
    accounts: Table<AccountRecord>,
}

impl InMemoryAccountService {
    pub fn new() -> Self {
        Self {
            accounts: Table::new(ACCOUNT_SERVICE),
        }
    }

    /// Create a service pre-populated with `accounts`
    pub fn with_accounts(accounts: impl IntoIterator<Item = AccountRecord>) -> Self {
        let service = Self::new();
        for account in accounts {
            service.add(account);
        }
        service
    }

    pub fn add(&self, account: AccountRecord) {
        self.accounts.upsert(account, |a| a.id.as_str());
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryAccountService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AccountService for InMemoryAccountService {
    async fn get_account(
        &self,
        _ctx: &CallContext,
        id: &str,
    ) -> Result<AccountRecord, BackendError> {
        self.accounts.find(GET_ACCOUNT, id, |a| a.id.as_str())
    }

    async fn get_accounts(
        &self,
        _ctx: &CallContext,
        skip: u64,
        take: u64,
    ) -> Result<Vec<AccountRecord>, BackendError> {
        self.accounts.page(GET_ACCOUNTS, skip, take)
    }
}

/// In-memory catalog service
#[derive(Clone, Debug)]
pub struct InMemoryCatalogService {
    products: Table<ProductRecord>,
}

impl InMemoryCatalogService {
    pub fn new() -> Self {
        Self {
            products: Table::new(CATALOG_SERVICE),
        }
    }

    /// Create a service pre-populated with `products`
    pub fn with_products(products: impl IntoIterator<Item = ProductRecord>) -> Self {
        let service = Self::new();
        for product in products {
            service.add(product);
        }
        service
    }

    pub fn add(&self, product: ProductRecord) {
        self.products.upsert(product, |p| p.id.as_str());
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryCatalogService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CatalogService for InMemoryCatalogService {
    async fn get_product(
        &self,
        _ctx: &CallContext,
        id: &str,
    ) -> Result<ProductRecord, BackendError> {
        self.products.find(GET_PRODUCT, id, |p| p.id.as_str())
    }

    async fn get_products(
        &self,
        _ctx: &CallContext,
        skip: u64,
        take: u64,
    ) -> Result<Vec<ProductRecord>, BackendError> {
        self.products.page(GET_PRODUCTS, skip, take)
    }
}
