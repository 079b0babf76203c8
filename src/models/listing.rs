use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::database::schema::types::ListingStatus;

/// A produce listing owned by one supplier
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Listing {
    pub id: Uuid,
    pub supplier_id: Uuid,
    pub name: String,
    #[schema(value_type = String, example = "100.0")]
    pub quantity: Decimal,
    #[schema(value_type = String, example = "50.0")]
    pub price_per_kg: Decimal,
    pub availability_date: NaiveDate,
    pub contact_number: Option<String>,
    pub status: ListingStatus,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, FromRow)]
pub struct ListingRow {
    pub id: Uuid,
    pub supplier_id: Uuid,
    pub name: String,
    pub quantity: Decimal,
    pub price_per_kg: Decimal,
    pub availability_date: NaiveDate,
    pub contact_number: Option<String>,
    pub status: ListingStatus,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<ListingRow> for Listing {
    fn from(row: ListingRow) -> Self {
        Self {
            id: row.id,
            supplier_id: row.supplier_id,
            name: row.name,
            quantity: row.quantity,
            price_per_kg: row.price_per_kg,
            availability_date: row.availability_date,
            contact_number: row.contact_number,
            status: row.status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// A listing as shown to buyers, joined with the supplier's display name
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct ListingView {
    pub id: Uuid,
    pub supplier_id: Uuid,
    pub supplier_name: String,
    pub name: String,
    #[schema(value_type = String)]
    pub quantity: Decimal,
    #[schema(value_type = String)]
    pub price_per_kg: Decimal,
    pub availability_date: NaiveDate,
    pub contact_number: Option<String>,
    pub status: ListingStatus,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateListingRequest {
    #[validate(length(min = 1, max = 100))]
    #[schema(example = "Tomatoes")]
    pub name: String,

    /// Quantity in kg; must be positive
    #[schema(value_type = String, example = "100.0")]
    pub quantity: Decimal,

    /// Price per kg; must be positive
    #[schema(value_type = String, example = "50.0")]
    pub price_per_kg: Decimal,

    pub availability_date: NaiveDate,

    #[validate(length(max = 15))]
    pub contact_number: Option<String>,
}
