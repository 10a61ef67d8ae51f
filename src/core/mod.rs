//! Core module containing the entity shapes, collaborator traits and call policies

pub mod deadline;
pub mod entity;
pub mod error;
pub mod query;
pub mod service;

pub use deadline::{CallContext, CallScope, DeadlinePolicy};
pub use entity::{Account, Order, Product};
pub use error::{BackendError, CallStatus, ConfigError, FanoutError, FanoutResult};
pub use query::{DEFAULT_TAKE, Listing, Lookup, PageRange};
pub use service::{AccountRecord, AccountService, CatalogService, ProductRecord};
