//! Protected routes that require a valid bearer token.

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};

use crate::app_state::AppState;
use crate::auth::middleware::auth_middleware;
use crate::handlers::{auth as auth_handlers, dashboard, listings, orders};

/// Build protected routes that require authentication.
pub fn protected_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route("/api/auth/profile", get(auth_handlers::get_profile))
        // Listing management
        .route("/api/listings", post(listings::create_listing))
        .route("/api/listings", get(listings::browse_listings))
        .route("/api/listings/mine", get(listings::my_listings))
        // Order workflow
        .route("/api/orders", post(orders::place_order))
        .route("/api/orders/{id}/decision", post(orders::decide_order))
        .route("/api/orders/incoming", get(orders::incoming_orders))
        .route("/api/orders/mine", get(orders::my_orders))
        // Dashboards
        .route("/api/dashboard/supplier", get(dashboard::supplier_dashboard))
        .route("/api/dashboard/buyer", get(dashboard::buyer_dashboard))
        .layer(from_fn_with_state(app_state, auth_middleware))
}
