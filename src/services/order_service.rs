//! Order workflow: placing supply requests and the supplier's
//! accept/reject transition.
//!
//! Stock is checked twice with different strength. At request time the
//! check is advisory (competing requests may together exceed stock); at
//! acceptance time it is enforced under a row lock, so the sum of accepted
//! quantities can never exceed what the listing actually held.

use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use crate::database::DatabasePool;
use crate::database::schema::types::{ListingStatus, OrderStatus};
use crate::error::{ApiError, ErrorCode, Result};
use crate::models::listing::ListingRow;
use crate::models::order::{Order, OrderDecision, OrderRow, OrderView};

#[derive(Clone)]
pub struct OrderService {
    db: DatabasePool,
}

impl OrderService {
    pub fn new(db: DatabasePool) -> Self {
        Self { db }
    }

    /// Place a supply request against a listing.
    ///
    /// The stock check here does not reserve anything; the order simply
    /// becomes pending for the supplier to decide on.
    pub async fn place_order(
        &self,
        buyer_id: Uuid,
        listing_id: Uuid,
        quantity_requested: Decimal,
    ) -> Result<Order> {
        if quantity_requested <= Decimal::ZERO {
            return Err(ApiError::invalid_quantity(
                "Quantity must be greater than zero",
            ));
        }

        let listing = sqlx::query_as::<_, ListingRow>(
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
        .await?
        .ok_or_else(|| ApiError::not_found("Listing"))?;

        if quantity_requested > listing.quantity {
            return Err(ApiError::insufficient_stock(listing.quantity));
        }

        let total_price = quantity_requested * listing.price_per_kg;

        let row = sqlx::query_as::<_, OrderRow>(
            r#"
            INSERT INTO orders (
                buyer_id, supplier_id, listing_id,
                quantity_requested, total_price, status
            ) VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, buyer_id, supplier_id, listing_id,
                      quantity_requested, total_price, status,
                      created_at, updated_at
            "#,
        )
        .bind(buyer_id)
        .bind(listing.supplier_id)
        .bind(listing_id)
        .bind(quantity_requested)
        .bind(total_price)
        .bind(OrderStatus::Pending)
        .fetch_one(&self.db)
        .await?;

        info!(
            order_id = %row.id,
            buyer_id = %buyer_id,
            listing_id = %listing_id,
            quantity = %quantity_requested,
            total_price = %total_price,
            "Supply request placed"
        );

        Ok(row.into())
    }

    /// Accept or reject a pending order on behalf of its supplier.
    ///
    /// Acceptance decrements the listing quantity and re-derives its status
    /// in the same transaction as the order status update; either both
    /// persist or neither does.
    pub async fn transition_order(
        &self,
        supplier_id: Uuid,
        order_id: Uuid,
        decision: OrderDecision,
    ) -> Result<Order> {
        let mut tx = self.db.begin().await?;

        let order = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT id, buyer_id, supplier_id, listing_id,
                   quantity_requested, total_price, status,
                   created_at, updated_at
            FROM orders
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(order_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| ApiError::not_found("Order"))?;

        if order.supplier_id != supplier_id {
            return Err(ApiError::with_code(
                ErrorCode::ResourceAccessDenied,
                "Only the supplier who owns this order's listing can decide on it",
            ));
        }

        let next_status: OrderStatus = decision.into();
        if !order.status.can_transition_to(next_status) {
            return Err(ApiError::invalid_transition(order.status));
        }

        if decision == OrderDecision::Accepted {
            let listing = sqlx::query_as::<_, ListingRow>(
                r#"
                SELECT id, supplier_id, name, quantity, price_per_kg,
                       availability_date, contact_number, status,
                       created_at, updated_at
                FROM listings
                WHERE id = $1
                FOR UPDATE
                "#,
            )
            .bind(order.listing_id)
            .fetch_one(&mut *tx)
            .await?;

            // Stock may have been consumed by a competing accepted order
            // since this request was placed; first accepted wins.
            if order.quantity_requested > listing.quantity {
                return Err(ApiError::insufficient_stock(listing.quantity));
            }

            let remaining = listing.quantity - order.quantity_requested;
            let new_status = ListingStatus::for_quantity(remaining);

            sqlx::query(
                "UPDATE listings SET quantity = $1, status = $2, updated_at = NOW() WHERE id = $3",
            )
            .bind(remaining)
            .bind(new_status)
            .bind(listing.id)
            .execute(&mut *tx)
            .await?;

            info!(
                listing_id = %listing.id,
                remaining = %remaining,
                status = %new_status,
                "Inventory decremented on order acceptance"
            );
        }

        let updated = sqlx::query_as::<_, OrderRow>(
            r#"
            UPDATE orders SET status = $1, updated_at = NOW()
            WHERE id = $2
            RETURNING id, buyer_id, supplier_id, listing_id,
                      quantity_requested, total_price, status,
                      created_at, updated_at
            "#,
        )
        .bind(next_status)
        .bind(order_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        info!(
            order_id = %order_id,
            supplier_id = %supplier_id,
            status = %next_status,
            "Order transitioned"
        );

        Ok(updated.into())
    }

    /// Orders received by a supplier, newest first.
    pub async fn incoming_for_supplier(&self, supplier_id: Uuid) -> Result<Vec<OrderView>> {
        let rows = sqlx::query_as::<_, OrderView>(
            r#"
            SELECT o.id, o.listing_id, l.name AS listing_name,
                   b.username AS buyer_name, s.username AS supplier_name,
                   o.quantity_requested, o.total_price, o.status, o.created_at
            FROM orders o
            JOIN listings l ON l.id = o.listing_id
            JOIN users b ON b.id = o.buyer_id
            JOIN users s ON s.id = o.supplier_id
            WHERE o.supplier_id = $1
            ORDER BY o.created_at DESC
            "#,
        )
        .bind(supplier_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }

    /// Orders placed by a buyer, newest first.
    pub async fn orders_for_buyer(&self, buyer_id: Uuid) -> Result<Vec<OrderView>> {
        let rows = sqlx::query_as::<_, OrderView>(
            r#"
            SELECT o.id, o.listing_id, l.name AS listing_name,
                   b.username AS buyer_name, s.username AS supplier_name,
                   o.quantity_requested, o.total_price, o.status, o.created_at
            FROM orders o
            JOIN listings l ON l.id = o.listing_id
            JOIN users b ON b.id = o.buyer_id
            JOIN users s ON s.id = o.supplier_id
            WHERE o.buyer_id = $1
            ORDER BY o.created_at DESC
            "#,
        )
        .bind(buyer_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }

    /// Fetch a single order by id.
    pub async fn find_by_id(&self, order_id: Uuid) -> Result<Option<Order>> {
        let row = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT id, buyer_id, supplier_id, listing_id,
                   quantity_requested, total_price, status,
                   created_at, updated_at
            FROM orders
            WHERE id = $1
            "#,
        )
        .bind(order_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(row.map(Into::into))
    }
}
