//! gRPC adapters for the account and catalog services
//!
//! Wrap the tonic clients generated from `proto/account.proto` and
//! `proto/catalog.proto`. Each request carries the remaining time of its call
//! context as the gRPC timeout, and every `tonic::Status` is mapped into a
//! [`BackendError`].

use crate::core::deadline::CallContext;
use crate::core::error::BackendError;
use crate::core::service::{
    ACCOUNT_SERVICE, AccountRecord, AccountService, CATALOG_SERVICE, CatalogService, GET_ACCOUNT,
    GET_ACCOUNTS, GET_PRODUCT, GET_PRODUCTS, ProductRecord,
};
use anyhow::Result;
use async_trait::async_trait;
use tonic::transport::{Channel, Endpoint};

// Include the generated protobuf code
pub mod account_proto {
    tonic::include_proto!("account");
}

pub mod catalog_proto {
    tonic::include_proto!("catalog");
}

use account_proto::account_service_client::AccountServiceClient;
use catalog_proto::catalog_service_client::CatalogServiceClient;

/// Build a request that expires with the call context
fn request<T>(ctx: &CallContext, message: T) -> tonic::Request<T> {
    let mut request = tonic::Request::new(message);
    if let Some(remaining) = ctx.remaining() {
        request.set_timeout(remaining);
    }
    request
}

fn lazy_channel(url: &str) -> Result<Channel> {
    Ok(Endpoint::from_shared(url.to_string())?.connect_lazy())
}

impl From<account_proto::Account> for AccountRecord {
    fn from(account: account_proto::Account) -> Self {
        Self {
            id: account.id,
            name: account.name,
        }
    }
}

impl From<catalog_proto::Product> for ProductRecord {
    fn from(product: catalog_proto::Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            price: product.price,
        }
    }
}

/// Account service reached over gRPC
#[derive(Clone, Debug)]
pub struct GrpcAccountService {
    client: AccountServiceClient<Channel>,
}

impl GrpcAccountService {
    /// Create a service that connects on first use
    pub fn connect_lazy(url: &str) -> Result<Self> {
        Ok(Self::from_channel(lazy_channel(url)?))
    }

    pub fn from_channel(channel: Channel) -> Self {
        Self {
            client: AccountServiceClient::new(channel),
        }
    }
}

#[async_trait]
impl AccountService for GrpcAccountService {
    async fn get_account(
        &self,
        ctx: &CallContext,
        id: &str,
    ) -> Result<AccountRecord, BackendError> {
        let response = self
            .client
            .clone()
            .get_account(request(
                ctx,
                account_proto::GetAccountRequest { id: id.to_string() },
            ))
            .await
            .map_err(|status| BackendError::from_status(ACCOUNT_SERVICE, GET_ACCOUNT, status))?;

        response
            .into_inner()
            .account
            .map(AccountRecord::from)
            .ok_or_else(|| {
                BackendError::internal(ACCOUNT_SERVICE, GET_ACCOUNT, "response carried no account")
            })
    }

    async fn get_accounts(
        &self,
        ctx: &CallContext,
        skip: u64,
        take: u64,
    ) -> Result<Vec<AccountRecord>, BackendError> {
        let response = self
            .client
            .clone()
            .get_accounts(request(
                ctx,
                account_proto::GetAccountsRequest { skip, take },
            ))
            .await
            .map_err(|status| BackendError::from_status(ACCOUNT_SERVICE, GET_ACCOUNTS, status))?;

        Ok(response
            .into_inner()
            .accounts
            .into_iter()
            .map(AccountRecord::from)
            .collect())
    }
}

/// Catalog service reached over gRPC
#[derive(Clone, Debug)]
pub struct GrpcCatalogService {
    client: CatalogServiceClient<Channel>,
}

impl GrpcCatalogService {
    /// Create a service that connects on first use
    pub fn connect_lazy(url: &str) -> Result<Self> {
        Ok(Self::from_channel(lazy_channel(url)?))
    }

    pub fn from_channel(channel: Channel) -> Self {
        Self {
            client: CatalogServiceClient::new(channel),
        }
    }
}

#[async_trait]
impl CatalogService for GrpcCatalogService {
    async fn get_product(
        &self,
        ctx: &CallContext,
        id: &str,
    ) -> Result<ProductRecord, BackendError> {
        let response = self
            .client
            .clone()
            .get_product(request(
                ctx,
                catalog_proto::GetProductRequest { id: id.to_string() },
            ))
            .await
            .map_err(|status| BackendError::from_status(CATALOG_SERVICE, GET_PRODUCT, status))?;

        response
            .into_inner()
            .product
            .map(ProductRecord::from)
            .ok_or_else(|| {
                BackendError::internal(CATALOG_SERVICE, GET_PRODUCT, "response carried no product")
            })
    }

    async fn get_products(
        &self,
        ctx: &CallContext,
        skip: u64,
        take: u64,
    ) -> Result<Vec<ProductRecord>, BackendError> {
        let response = self
            .client
            .clone()
            .get_products(request(
                ctx,
                catalog_proto::GetProductsRequest { skip, take },
            ))
            .await
            .map_err(|status| BackendError::from_status(CATALOG_SERVICE, GET_PRODUCTS, status))?;

        Ok(response
            .into_inner()
            .products
            .into_iter()
            .map(ProductRecord::from)
            .collect())
    }
}
