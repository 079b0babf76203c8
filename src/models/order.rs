use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::database::schema::types::OrderStatus;

/// A supply request linking one buyer, one supplier, and one listing
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub id: Uuid,
    pub buyer_id: Uuid,
    pub supplier_id: Uuid,
    pub listing_id: Uuid,
    #[schema(value_type = String, example = "60.0")]
    pub quantity_requested: Decimal,
    #[schema(value_type = String, example = "3000.0")]
    pub total_price: Decimal,
    pub status: OrderStatus,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, FromRow)]
pub struct OrderRow {
    pub id: Uuid,
    pub buyer_id: Uuid,
    pub supplier_id: Uuid,
    pub listing_id: Uuid,
    pub quantity_requested: Decimal,
    pub total_price: Decimal,
    pub status: OrderStatus,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<OrderRow> for Order {
    fn from(row: OrderRow) -> Self {
        Self {
            id: row.id,
            buyer_id: row.buyer_id,
            supplier_id: row.supplier_id,
            listing_id: row.listing_id,
            quantity_requested: row.quantity_requested,
            total_price: row.total_price,
            status: row.status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// An order joined with listing and counterparty names for dashboards
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct OrderView {
    pub id: Uuid,
    pub listing_id: Uuid,
    pub listing_name: String,
    pub buyer_name: String,
    pub supplier_name: String,
    #[schema(value_type = String)]
    pub quantity_requested: Decimal,
    #[schema(value_type = String)]
    pub total_price: Decimal,
    pub status: OrderStatus,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct PlaceOrderRequest {
    pub listing_id: Uuid,

    /// Requested quantity in kg; must be positive
    #[schema(value_type = String, example = "60.0")]
    pub quantity_requested: Decimal,
}

/// Supplier's decision on a pending order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum OrderDecision {
    Accepted,
    Rejected,
}

impl From<OrderDecision> for OrderStatus {
    fn from(decision: OrderDecision) -> Self {
        match decision {
            OrderDecision::Accepted => OrderStatus::Accepted,
            OrderDecision::Rejected => OrderStatus::Rejected,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct OrderDecisionRequest {
    pub decision: OrderDecision,
}

impl OrderDecisionRequest {
    pub fn decision_label(&self) -> &'static str {
        match self.decision {
            OrderDecision::Accepted => "accepted",
            OrderDecision::Rejected => "rejected",
        }
    }
}
