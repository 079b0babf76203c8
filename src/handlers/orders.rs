use axum::{
    extract::{Path, State},
    response::Json,
};
use tracing::info;
use uuid::Uuid;

use crate::app_state::AppState;
use crate::auth::middleware::AuthenticatedUser;
use crate::auth::{Role, require_role};
use crate::error::Result;
use crate::handlers::extract::AppJson;
use crate::handlers::response::ApiResponse;
use crate::models::order::{Order, OrderDecisionRequest, OrderView, PlaceOrderRequest};

/// Place a supply request against a listing (buyers only)
#[utoipa::path(
    post,
    path = "/api/orders",
    tag = "orders",
    request_body = PlaceOrderRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Order placed", body = ApiResponse<Order>),
        (status = 400, description = "Invalid quantity"),
        (status = 403, description = "Not a buyer"),
        (status = 404, description = "Listing not found"),
        (status = 409, description = "Requested quantity exceeds stock")
    )
)]
pub async fn place_order(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    AppJson(request): AppJson<PlaceOrderRequest>,
) -> Result<Json<ApiResponse<Order>>> {
    require_role(&user.0, Role::Buyer)?;

    info!(
        buyer_id = %user.0.sub,
        listing_id = %request.listing_id,
        quantity = %request.quantity_requested,
        "Placing order"
    );

    let order = state
        .order_service
        .place_order(user.0.sub, request.listing_id, request.quantity_requested)
        .await?;

    Ok(Json(ApiResponse::success_with_message(
        order,
        "Supply request sent",
    )))
}

/// Accept or reject a pending order (suppliers only)
#[utoipa::path(
    post,
    path = "/api/orders/{id}/decision",
    tag = "orders",
    request_body = OrderDecisionRequest,
    params(("id" = Uuid, Path, description = "Order id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Order transitioned", body = ApiResponse<Order>),
        (status = 403, description = "Not the owning supplier"),
        (status = 404, description = "Order not found"),
        (status = 409, description = "Order is not pending, or stock ran out")
    )
)]
pub async fn decide_order(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(order_id): Path<Uuid>,
    AppJson(request): AppJson<OrderDecisionRequest>,
) -> Result<Json<ApiResponse<Order>>> {
    require_role(&user.0, Role::Supplier)?;

    let order = state
        .order_service
        .transition_order(user.0.sub, order_id, request.decision)
        .await?;

    Ok(Json(ApiResponse::success_with_message(
        order,
        format!("Order {}", request.decision_label()),
    )))
}

/// Orders received by the authenticated supplier
#[utoipa::path(
    get,
    path = "/api/orders/incoming",
    tag = "orders",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Incoming orders", body = ApiResponse<Vec<OrderView>>),
        (status = 403, description = "Not a supplier")
    )
)]
pub async fn incoming_orders(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<ApiResponse<Vec<OrderView>>>> {
    require_role(&user.0, Role::Supplier)?;

    let orders = state.order_service.incoming_for_supplier(user.0.sub).await?;
    Ok(Json(ApiResponse::success(orders)))
}

/// Orders placed by the authenticated buyer
#[utoipa::path(
    get,
    path = "/api/orders/mine",
    tag = "orders",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Buyer's orders", body = ApiResponse<Vec<OrderView>>),
        (status = 403, description = "Not a buyer")
    )
)]
pub async fn my_orders(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<ApiResponse<Vec<OrderView>>>> {
    require_role(&user.0, Role::Buyer)?;

    let orders = state.order_service.orders_for_buyer(user.0.sub).await?;
    Ok(Json(ApiResponse::success(orders)))
}
