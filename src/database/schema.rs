//! Postgres enum mirrors and the pure rules attached to them.

pub mod types {
    use rust_decimal::Decimal;
    use serde::{Deserialize, Serialize};
    use std::fmt;
    use utoipa::ToSchema;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
    #[sqlx(type_name = "user_role", rename_all = "lowercase")]
    #[serde(rename_all = "lowercase")]
    pub enum UserRole {
        Supplier,
        Buyer,
    }

    impl fmt::Display for UserRole {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                UserRole::Supplier => write!(f, "supplier"),
                UserRole::Buyer => write!(f, "buyer"),
            }
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
    #[sqlx(type_name = "listing_status", rename_all = "snake_case")]
    #[serde(rename_all = "snake_case")]
    pub enum ListingStatus {
        Available,
        Pending,
        SoldOut,
    }

    impl ListingStatus {
        /// Derive the stock status from a listing quantity.
        ///
        /// Anything below 50 kg counts as low stock; zero or negative
        /// quantity means the listing is sold out.
        pub fn for_quantity(quantity: Decimal) -> Self {
            let low_stock = Decimal::from(50u32);
            if quantity <= Decimal::ZERO {
                ListingStatus::SoldOut
            } else if quantity < low_stock {
                ListingStatus::Pending
            } else {
                ListingStatus::Available
            }
        }
    }

    impl fmt::Display for ListingStatus {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                ListingStatus::Available => write!(f, "available"),
                ListingStatus::Pending => write!(f, "pending"),
                ListingStatus::SoldOut => write!(f, "sold_out"),
            }
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
    #[sqlx(type_name = "order_status", rename_all = "lowercase")]
    #[serde(rename_all = "lowercase")]
    pub enum OrderStatus {
        Pending,
        Accepted,
        Rejected,
        Completed,
    }

    impl OrderStatus {
        /// Forward-only transitions: a pending order may be accepted or
        /// rejected; both are terminal. `Completed` exists in the data
        /// model but no operation transitions into it.
        pub fn can_transition_to(&self, next: OrderStatus) -> bool {
            matches!(
                (self, next),
                (OrderStatus::Pending, OrderStatus::Accepted)
                    | (OrderStatus::Pending, OrderStatus::Rejected)
            )
        }
    }

    impl fmt::Display for OrderStatus {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                OrderStatus::Pending => write!(f, "pending"),
                OrderStatus::Accepted => write!(f, "accepted"),
                OrderStatus::Rejected => write!(f, "rejected"),
                OrderStatus::Completed => write!(f, "completed"),
            }
        }
    }
}
