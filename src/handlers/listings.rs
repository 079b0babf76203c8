use axum::{extract::State, response::Json};
use tracing::info;
use validator::Validate;

use crate::app_state::AppState;
use crate::auth::middleware::AuthenticatedUser;
use crate::auth::{Role, require_role};
use crate::error::{ApiError, Result};
use crate::handlers::extract::AppJson;
use crate::handlers::response::ApiResponse;
use crate::models::listing::{CreateListingRequest, Listing, ListingView};

/// Create a produce listing (suppliers only)
#[utoipa::path(
    post,
    path = "/api/listings",
    tag = "listings",
    request_body = CreateListingRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Listing created", body = ApiResponse<Listing>),
        (status = 400, description = "Invalid quantity or price"),
        (status = 403, description = "Not a supplier")
    )
)]
pub async fn create_listing(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    AppJson(request): AppJson<CreateListingRequest>,
) -> Result<Json<ApiResponse<Listing>>> {
    require_role(&user.0, Role::Supplier)?;

    request
        .validate()
        .map_err(|e| ApiError::BadRequest(format!("Validation error: {}", e)))?;

    info!(supplier_id = %user.0.sub, name = %request.name, "Creating listing");

    let listing = state
        .listing_service
        .create_listing(user.0.sub, request)
        .await?;

    Ok(Json(ApiResponse::success_with_message(
        listing,
        "Listing created",
    )))
}

/// Browse open listings (buyers only)
#[utoipa::path(
    get,
    path = "/api/listings",
    tag = "listings",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Available and low-stock listings", body = ApiResponse<Vec<ListingView>>),
        (status = 403, description = "Not a buyer")
    )
)]
pub async fn browse_listings(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<ApiResponse<Vec<ListingView>>>> {
    require_role(&user.0, Role::Buyer)?;

    let listings = state.listing_service.browse_listings().await?;
    Ok(Json(ApiResponse::success(listings)))
}

/// The authenticated supplier's own listings
#[utoipa::path(
    get,
    path = "/api/listings/mine",
    tag = "listings",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Supplier's listings", body = ApiResponse<Vec<Listing>>),
        (status = 403, description = "Not a supplier")
    )
)]
pub async fn my_listings(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<ApiResponse<Vec<Listing>>>> {
    require_role(&user.0, Role::Supplier)?;

    let listings = state
        .listing_service
        .listings_for_supplier(user.0.sub)
        .await?;
    Ok(Json(ApiResponse::success(listings)))
}
