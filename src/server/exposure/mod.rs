//! API exposure modules
//!
//! Each exposure wraps the resolver set in a protocol-specific router.

#[cfg(feature = "graphql")]
pub mod graphql;

#[cfg(feature = "graphql")]
pub use graphql::GraphQLExposure;
