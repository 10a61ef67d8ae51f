//! Query API gateway over in-memory (or gRPC) account and catalog services
//!
//! ```bash
//! cargo run --example gateway -- fanout.yaml
//! cargo run --example gateway --features grpc -- fanout.yaml
//! ```

use anyhow::Result;
use fanout::prelude::*;
use tokio::net::TcpListener;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fanout=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => FanoutConfig::from_yaml_file(path)?,
        None => FanoutConfig::default(),
    };

    let (accounts, catalog) = backends(&config)?;
    let resolvers = Resolvers::from_config(accounts, catalog, &config);
    let app = GraphQLExposure::build_router(build_schema(resolvers));

    let listener = TcpListener::bind(&config.listen_addr).await?;
    tracing::info!("Server listening on {}", config.listen_addr);
    tracing::info!("GraphQL playground at http://{}/graphql/playground", config.listen_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

#[cfg(feature = "grpc")]
fn backends(config: &FanoutConfig) -> Result<(Arc<dyn AccountService>, Arc<dyn CatalogService>)> {
    tracing::info!(
        account = %config.account_service.url,
        catalog = %config.catalog_service.url,
        "using gRPC backends"
    );
    Ok((
        Arc::new(GrpcAccountService::connect_lazy(&config.account_service.url)?),
        Arc::new(GrpcCatalogService::connect_lazy(&config.catalog_service.url)?),
    ))
}

#[cfg(not(feature = "grpc"))]
fn backends(_config: &FanoutConfig) -> Result<(Arc<dyn AccountService>, Arc<dyn CatalogService>)> {
    tracing::info!("using in-memory backends with sample data");
    let accounts = InMemoryAccountService::with_accounts([
        AccountRecord::new("1", "Ada Lovelace"),
        AccountRecord::new("2", "Grace Hopper"),
        AccountRecord::new("3", "Barbara Liskov"),
    ]);
    let catalog = InMemoryCatalogService::with_products([
        ProductRecord::new("p1", "Mechanical keyboard", "Tenkeyless, brown switches", 129.0),
        ProductRecord::new("p2", "Monitor arm", "Single arm, gas spring", 89.5),
        ProductRecord::new("p3", "Desk lamp", "Warm white LED", 34.9),
    ]);
    Ok((Arc::new(accounts), Arc::new(catalog)))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!("Failed to install signal handler: {}", e),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
