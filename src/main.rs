use migration::{ Migrator, MigratorTrait };
use std::sync::Arc;
use tracing_subscriber::{ layer::SubscriberExt, util::SubscriberInitExt };
use web3_terminal::{ Config, Result };

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber
        ::registry()
        .with(
            tracing_subscriber::EnvFilter
                ::try_from_default_env()
                .unwrap_or_else(|_| "web3_terminal=debug,tower_http=debug".into())
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().map_err(|e| web3_terminal::AppError::Config(e.to_string()))?;

    tracing::info!(
        "Starting web3-terminal backend (resource routes gated: {})",
        config.require_auth
    );

    // Initialize database connection; failing here ends the process
    let db = sea_orm::Database
        ::connect(&config.database_url).await
        .map_err(|e| {
            tracing::error!("Database connection failed: {}", e);
            web3_terminal::AppError::Database(e)
        })?;

    tracing::info!("Database connected successfully");

    // Run migrations
    Migrator::up(&db, None).await.map_err(|e| web3_terminal::AppError::Database(e))?;

    tracing::info!("Migrations completed successfully");

    let token_service = Arc::new(
        web3_terminal::auth::TokenService::new(
            &config.jwt_secret,
            config.access_token_ttl_hours,
            config.refresh_token_ttl_hours
        )
    );

    // Create app state
    let app_state = web3_terminal::api::AppState::from_connection(db, token_service);

    // Build application router
    let app = web3_terminal::api::router(app_state, config.require_auth);

    // Start server
    let addr = config.bind_addr();
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener
        ::bind(&addr).await
        .map_err(|e| web3_terminal::AppError::Internal(e.to_string()))?;

    axum::serve(listener, app).await.map_err(|e| web3_terminal::AppError::Internal(e.to_string()))?;

    Ok(())
}
