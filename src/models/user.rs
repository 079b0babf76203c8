use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::database::schema::types::UserRole;

#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Supplier-specific profile captured at registration
#[derive(Debug, Deserialize, Serialize, Validate, ToSchema)]
pub struct SupplierProfile {
    #[validate(length(max = 200))]
    #[schema(example = "Green Valley Farm")]
    pub farm_name: Option<String>,

    #[validate(length(min = 1, max = 300))]
    #[schema(example = "Pune, Maharashtra")]
    pub location: String,

    pub description: Option<String>,
}

/// Buyer-specific profile captured at registration
#[derive(Debug, Deserialize, Serialize, Validate, ToSchema)]
pub struct BuyerProfile {
    #[validate(length(min = 1, max = 200))]
    #[schema(example = "Cafe Luna")]
    pub business_name: String,

    /// One of: fine-dining, casual, cafe, fast-food, catering, hotel
    #[validate(custom(function = "validate_business_type"))]
    #[schema(example = "cafe")]
    pub business_type: String,

    #[validate(length(min = 1))]
    pub address: String,

    #[validate(length(max = 20))]
    pub tax_id: Option<String>,
}

fn validate_business_type(value: &str) -> Result<(), validator::ValidationError> {
    const BUSINESS_TYPES: [&str; 6] = [
        "fine-dining",
        "casual",
        "cafe",
        "fast-food",
        "catering",
        "hotel",
    ];
    if BUSINESS_TYPES.contains(&value) {
        Ok(())
    } else {
        Err(validator::ValidationError::new("invalid_business_type"))
    }
}

/// Registration request for either role
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 50))]
    #[schema(example = "green_farm")]
    pub username: String,

    #[validate(email)]
    #[schema(example = "farmer@example.com")]
    pub email: String,

    #[validate(length(min = 8, max = 128))]
    pub password: String,

    pub role: UserRole,

    #[validate(length(max = 100))]
    pub first_name: Option<String>,

    #[validate(length(max = 100))]
    pub last_name: Option<String>,

    #[validate(length(max = 15))]
    pub phone: Option<String>,

    /// Required when role is supplier
    #[validate(nested)]
    pub supplier_profile: Option<SupplierProfile>,

    /// Required when role is buyer
    #[validate(nested)]
    pub buyer_profile: Option<BuyerProfile>,
}

/// Login request; the role the client expects to log in as is explicit so a
/// buyer account cannot quietly enter a supplier session
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email)]
    #[schema(example = "farmer@example.com")]
    pub email: String,

    #[validate(length(min = 8, max = 128))]
    pub password: String,

    pub role: UserRole,
}

/// Query for the email-existence check endpoint
#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct CheckEmailQuery {
    pub email: String,
}

/// Response for the email-existence check endpoint
#[derive(Debug, Serialize, ToSchema)]
pub struct CheckEmailResponse {
    pub exists: bool,
}
