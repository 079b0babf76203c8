//! Application startup and initialization logic.

use anyhow::Result;
use tracing::info;

use crate::app_state::AppState;
use crate::auth::jwt::JwtService;
use crate::config::Config;
use crate::database;
use crate::services;

/// Initialize application services and create the AppState.
pub async fn initialize_app(config: &Config) -> Result<AppState> {
    let db_pool = database::setup_database(&config.database_url, config.max_connections).await?;
    info!("PostgreSQL connection established");

    database::run_migrations(&db_pool).await?;
    info!("Database migrations completed");

    let jwt_service = JwtService::new(&config.jwt_secret);
    info!("JWT service initialized");

    let auth_service =
        services::AuthService::new(db_pool.clone(), config.clone(), jwt_service.clone());
    let listing_service = services::ListingService::new(db_pool.clone());
    let order_service = services::OrderService::new(db_pool.clone());
    info!("Marketplace services initialized");

    Ok(AppState {
        db: db_pool,
        config: config.clone(),
        jwt_service,
        auth_service,
        listing_service,
        order_service,
    })
}
