//! Public routes that don't require authentication.

use axum::{
    Router,
    routing::{get, post},
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::app_state::AppState;
use crate::handlers::{auth as auth_handlers, dashboard, health, listings, orders};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "AgriConnect API",
        description = "Marketplace API connecting produce suppliers with buyers",
        version = "1.0.0"
    ),
    paths(
        health::health_check,
        auth_handlers::register,
        auth_handlers::login,
        auth_handlers::check_email,
        auth_handlers::get_profile,
        listings::create_listing,
        listings::browse_listings,
        listings::my_listings,
        orders::place_order,
        orders::decide_order,
        orders::incoming_orders,
        orders::my_orders,
        dashboard::supplier_dashboard,
        dashboard::buyer_dashboard,
    ),
    modifiers(&SecurityAddon)
)]
struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

/// Build public routes that don't require authentication.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/api/auth/register", post(auth_handlers::register))
        .route("/api/auth/login", post(auth_handlers::login))
        .route("/api/auth/check-email", get(auth_handlers::check_email))
        .merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", ApiDoc::openapi()))
}
