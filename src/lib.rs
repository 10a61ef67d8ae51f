//! # fanout
//!
//! Query-resolution fan-out layer. Sits behind a typed query API exposing
//! `Account`, `Product` and `Order` and turns every requested field into one
//! call to a remote backend: the account service or the catalog service.
//!
//! ## Features
//!
//! - **One call per field**: every resolver issues exactly one backend call
//! - **Pagination defaults**: missing `skip`/`take` become `0`/`100`
//! - **Per-call deadline**: every call is bounded by a 3 second timeout, nested
//!   inside the caller's own cancellation and deadline
//! - **Typed failures**: backend errors, timeouts and cancellations surface as
//!   one [`BackendError`](core::BackendError) shape, unchanged
//! - **GraphQL exposure** (feature `graphql`, default): async-graphql schema
//!   served by axum
//! - **gRPC backends** (feature `grpc`): tonic adapters for both services
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use fanout::prelude::*;
//!
//! let accounts = Arc::new(InMemoryAccountService::with_accounts([
//!     AccountRecord::new("42", "Ada"),
//! ]));
//! let catalog = Arc::new(InMemoryCatalogService::new());
//! let resolvers = Resolvers::new(accounts, catalog);
//!
//! let listing = resolvers
//!     .accounts(&CallContext::root(), None, None, Some("42"))
//!     .await?;
//! assert!(listing.is_by_id());
//! ```

pub mod clients;
pub mod config;
pub mod core;
pub mod resolvers;
pub mod server;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        Account, AccountRecord, AccountService, BackendError, CallContext, CallScope, CallStatus,
        CatalogService, DEFAULT_TAKE, DeadlinePolicy, Listing, Lookup, Order, PageRange, Product,
        ProductRecord,
    };

    // === Resolvers ===
    pub use crate::resolvers::Resolvers;

    // === Clients ===
    pub use crate::clients::{InMemoryAccountService, InMemoryCatalogService};
    #[cfg(feature = "grpc")]
    pub use crate::clients::{GrpcAccountService, GrpcCatalogService};

    // === Config ===
    pub use crate::config::{FanoutConfig, ServiceEndpoint};

    // === Server ===
    #[cfg(feature = "graphql")]
    pub use crate::server::{FanoutSchema, GraphQLExposure, build_schema};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use std::sync::Arc;
}
