//! Backend service implementations
//!
//! - `in_memory`: ordered, thread-safe stand-ins used by tests and the demo
//! - `grpc` (feature `grpc`): adapters over the generated tonic clients

pub mod in_memory;

#[cfg(feature = "grpc")]
pub mod grpc;

pub use in_memory::{InMemoryAccountService, InMemoryCatalogService};

#[cfg(feature = "grpc")]
pub use grpc::{GrpcAccountService, GrpcCatalogService};
