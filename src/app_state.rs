use crate::auth::jwt::JwtService;
use crate::config::Config;
use crate::services;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: sqlx::PgPool,
    pub config: Config,
    pub jwt_service: JwtService,
    pub auth_service: services::AuthService,
    pub listing_service: services::ListingService,
    pub order_service: services::OrderService,
}
