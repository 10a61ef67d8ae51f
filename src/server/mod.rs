//! Server module exposing the resolvers over HTTP

pub mod exposure;

#[cfg(feature = "graphql")]
pub use exposure::graphql::{FanoutSchema, GraphQLExposure, build_schema};
