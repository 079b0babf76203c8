//! Router configuration.
//!
//! Routes are split into a public set (health, auth, docs) and a protected
//! set behind the JWT middleware.

use axum::Router;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::app_state::AppState;

mod protected;
mod public;

pub use protected::protected_routes;
pub use public::public_routes;

/// Build the application router.
pub fn build_router(app_state: AppState) -> Router {
    let timeout = std::time::Duration::from_secs(app_state.config.request_timeout);

    public_routes()
        .merge(protected_routes(app_state.clone()))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(timeout))
                .layer(CorsLayer::permissive()),
        )
        .with_state(app_state)
}
