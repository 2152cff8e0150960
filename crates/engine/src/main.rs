//! SheetKeeper Engine - Main entry point.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sheetkeeper_engine::api;
use sheetkeeper_engine::infrastructure::{
    clock::SystemClock,
    config::{load_dotenv_from_repo_root, EngineConfig},
    edge_seed::read_edge_seed,
    ports::ClockPort,
    sqlite::SqliteRepositories,
};
use sheetkeeper_engine::App;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from repo root (the engine may be started from `crates/engine`).
    load_dotenv_from_repo_root();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sheetkeeper_engine=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting SheetKeeper Engine");

    let config = EngineConfig::from_env();

    let clock: Arc<dyn ClockPort> = Arc::new(SystemClock::new());

    tracing::info!(database_url = %config.database_url, "Opening database");
    let repos = SqliteRepositories::open(&config.database_url, clock.clone()).await?;

    let app = Arc::new(App::from_sqlite(repos, clock));

    if let Some(path) = &config.edge_seed_path {
        let edges = read_edge_seed(path).await?;
        app.use_cases.edges.seed(&edges).await?;
    }

    let mut router = api::router(app);
    if let Some(cors) = api::cors::cors_layer(config.cors_allowed_origins.as_deref()) {
        router = router.layer(cors);
    }

    // Start server
    let addr = config.socket_addr()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
