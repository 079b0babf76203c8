//! Listing management: creation with derived stock status, plus the
//! supplier and buyer listing queries.

use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use crate::database::DatabasePool;
use crate::database::schema::types::ListingStatus;
use crate::error::{ApiError, ErrorCode, Result};
use crate::models::listing::{CreateListingRequest, Listing, ListingRow, ListingView};

#[derive(Clone)]
pub struct ListingService {
    db: DatabasePool,
}

impl ListingService {
    pub fn new(db: DatabasePool) -> Self {
        Self { db }
    }

    /// Create a listing for a supplier. Status is derived from the initial
    /// quantity, never taken from the caller.
    pub async fn create_listing(
        &self,
        supplier_id: Uuid,
        request: CreateListingRequest,
    ) -> Result<Listing> {
        if request.quantity <= Decimal::ZERO {
            return Err(ApiError::invalid_quantity(
                "Quantity must be greater than zero",
            ));
        }
        if request.price_per_kg <= Decimal::ZERO {
            return Err(ApiError::with_code(
                ErrorCode::InvalidPrice,
                "Price per kg must be greater than zero",
            ));
        }

        let status = ListingStatus::for_quantity(request.quantity);

        let row = sqlx::query_as::<_, ListingRow>(
            r#"
            INSERT INTO listings (
                supplier_id, name, quantity, price_per_kg,
                availability_date, contact_number, status
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, supplier_id, name, quantity, price_per_kg,
                      availability_date, contact_number, status,
                      created_at, updated_at
            "#,
        )
        .bind(supplier_id)
        .bind(&request.name)
        .bind(request.quantity)
        .bind(request.price_per_kg)
        .bind(request.availability_date)
        .bind(&request.contact_number)
        .bind(status)
        .fetch_one(&self.db)
        .await?;

        info!(
            listing_id = %row.id,
            supplier_id = %supplier_id,
            status = %row.status,
            "Listing created"
        );

        Ok(row.into())
    }

    /// Fetch a single listing by id.
    pub async fn find_by_id(&self, listing_id: Uuid) -> Result<Option<Listing>> {
        let row = sqlx::query_as::<_, ListingRow>(
            r#"
            SELECT id, supplier_id, name, quantity, price_per_kg,
                   availability_date, contact_number, status,
                   created_at, updated_at
            FROM listings
            WHERE id = $1
            "#,
        )
        .bind(listing_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(row.map(Into::into))
    }

    /// All listings owned by a supplier, newest first.
    pub async fn listings_for_supplier(&self, supplier_id: Uuid) -> Result<Vec<Listing>> {
        let rows = sqlx::query_as::<_, ListingRow>(
            r#"
            SELECT id, supplier_id, name, quantity, price_per_kg,
                   availability_date, contact_number, status,
                   created_at, updated_at
            FROM listings
            WHERE supplier_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(supplier_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Listings visible to buyers: in stock or low stock, never sold out.
    pub async fn browse_listings(&self) -> Result<Vec<ListingView>> {
        let rows = sqlx::query_as::<_, ListingView>(
            r#"
            SELECT l.id, l.supplier_id, u.username AS supplier_name,
                   l.name, l.quantity, l.price_per_kg, l.availability_date,
                   l.contact_number, l.status, l.created_at
            FROM listings l
            JOIN users u ON u.id = l.supplier_id
            WHERE l.status IN ('available', 'pending')
            ORDER BY l.created_at DESC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }
}
