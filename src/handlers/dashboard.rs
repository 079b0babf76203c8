//! Dashboard counters for the two role-specific home screens.

use axum::{extract::State, response::Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::app_state::AppState;
use crate::auth::middleware::AuthenticatedUser;
use crate::auth::{Role, require_role};
use crate::error::Result;

#[derive(Debug, Serialize, ToSchema)]
pub struct SupplierDashboard {
    pub total_listings: i64,
    pub available_listings: i64,
    pub pending_orders: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BuyerDashboard {
    pub total_suppliers: i64,
    pub open_listings: i64,
    pub pending_orders: i64,
}

#[derive(Debug, sqlx::FromRow)]
struct CountRow {
    count: i64,
}

async fn count(
    db: &sqlx::PgPool,
    sql: &str,
    id: Option<uuid::Uuid>,
) -> Result<i64> {
    let mut query = sqlx::query_as::<_, CountRow>(sql);
    if let Some(id) = id {
        query = query.bind(id);
    }
    let row = query.fetch_one(db).await?;
    Ok(row.count)
}

/// Supplier dashboard counters
#[utoipa::path(
    get,
    path = "/api/dashboard/supplier",
    tag = "dashboard",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Supplier stats", body = SupplierDashboard),
        (status = 403, description = "Not a supplier")
    )
)]
pub async fn supplier_dashboard(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<SupplierDashboard>> {
    require_role(&user.0, Role::Supplier)?;
    let supplier_id = user.0.sub;

    let total_listings = count(
        &state.db,
        "SELECT COUNT(*) AS count FROM listings WHERE supplier_id = $1",
        Some(supplier_id),
    )
    .await?;
    let available_listings = count(
        &state.db,
        "SELECT COUNT(*) AS count FROM listings WHERE supplier_id = $1 AND status = 'available'",
        Some(supplier_id),
    )
    .await?;
    let pending_orders = count(
        &state.db,
        "SELECT COUNT(*) AS count FROM orders WHERE supplier_id = $1 AND status = 'pending'",
        Some(supplier_id),
    )
    .await?;

    Ok(Json(SupplierDashboard {
        total_listings,
        available_listings,
        pending_orders,
    }))
}

/// Buyer dashboard counters
#[utoipa::path(
    get,
    path = "/api/dashboard/buyer",
    tag = "dashboard",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Buyer stats", body = BuyerDashboard),
        (status = 403, description = "Not a buyer")
    )
)]
pub async fn buyer_dashboard(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<BuyerDashboard>> {
    require_role(&user.0, Role::Buyer)?;
    let buyer_id = user.0.sub;

    let total_suppliers = count(
        &state.db,
        "SELECT COUNT(*) AS count FROM users WHERE role = 'supplier' AND is_active = true",
        None,
    )
    .await?;
    let open_listings = count(
        &state.db,
        "SELECT COUNT(*) AS count FROM listings WHERE status IN ('available', 'pending')",
        None,
    )
    .await?;
    let pending_orders = count(
        &state.db,
        "SELECT COUNT(*) AS count FROM orders WHERE buyer_id = $1 AND status = 'pending'",
        Some(buyer_id),
    )
    .await?;

    Ok(Json(BuyerDashboard {
        total_suppliers,
        open_listings,
        pending_orders,
    }))
}
