use anyhow::{Context, Result};
use employee_api::{app, config, middleware};
use persistence::db::Database;
use persistence::repositories::EmployeeRepository;
use persistence::store::PgEmployeeStore;
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Load configuration
    let config = config::Config::load()?;

    // Initialize logging
    middleware::logging::init_logging(&config.logging)?;
    middleware::init_metrics()?;

    info!("Starting Employee Directory API v{}", env!("CARGO_PKG_VERSION"));

    // The pool is opened on first use; migrations force it early
    let database = Arc::new(Database::new(config.database.clone()));
    if config.database.run_migrations {
        info!("Running database migrations...");
        database
            .run_migrations()
            .await
            .context("failed to apply database migrations")?;
        info!("Migrations completed");
    }

    let store = PgEmployeeStore::new(database);
    let repository = EmployeeRepository::new(Arc::new(store));

    // Build application
    let app = app::create_app(config.clone(), repository);

    // Start server
    let addr = config.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
