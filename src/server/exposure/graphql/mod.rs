//! GraphQL API exposure
//!
//! Serves the [`FanoutSchema`] over HTTP with axum. Each request gets its own
//! [`CallContext`]; if the client goes away and the handler future is dropped,
//! the context is cancelled and every in-flight backend call is abandoned.

mod schema;

pub use schema::{FanoutSchema, QueryRoot, build_schema};

use crate::core::CallContext;
use async_graphql::http::{GraphQLPlaygroundConfig, playground_source};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    Router,
    extract::Extension,
    response::{Html, IntoResponse},
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// GraphQL API exposure implementation
pub struct GraphQLExposure;

impl GraphQLExposure {
    /// Build the GraphQL router for `schema`
    ///
    /// Returns a router with:
    /// - `POST /graphql`: query endpoint
    /// - `GET /graphql/playground`: GraphQL playground
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let schema = build_schema(Resolvers::new(accounts, catalog));
    /// let app = GraphQLExposure::build_router(schema);
    /// ```
    pub fn build_router(schema: FanoutSchema) -> Router {
        Router::new()
            .route("/graphql", post(graphql_handler))
            .route("/graphql/playground", get(graphql_playground))
            .layer(
                ServiceBuilder::new()
                    .layer(TraceLayer::new_for_http())
                    .layer(Extension(schema)),
            )
    }
}

/// Handler for GraphQL queries
async fn graphql_handler(
    Extension(schema): Extension<FanoutSchema>,
    request: GraphQLRequest,
) -> GraphQLResponse {
    let call = CallContext::root();
    // Cancels the request's backend calls if this future is dropped early
    let _guard = call.cancellation_token().clone().drop_guard();

    schema.execute(request.into_inner().data(call)).await.into()
}

/// Handler for GraphQL playground UI
async fn graphql_playground() -> impl IntoResponse {
    Html(playground_source(GraphQLPlaygroundConfig::new("/graphql")))
}
