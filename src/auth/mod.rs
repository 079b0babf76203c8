use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

pub mod jwt;
pub mod middleware;
pub mod password;
pub mod roles;

pub use roles::{Role, require_role};

/// User claims for JWT tokens
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    pub sub: Uuid,        // Subject (user ID)
    pub username: String, // Username
    pub role: String,     // User role (supplier, buyer)
    pub exp: i64,         // Expiration time
    pub iat: i64,         // Issued at
    pub iss: String,      // Issuer
}

impl Claims {
    /// `expires_in` is the token lifetime in seconds; callers pass the
    /// configured `jwt_expiration` so the advertised and actual lifetimes
    /// always agree.
    pub fn new(user_id: Uuid, username: String, role: String, expires_in: i64) -> Self {
        let now = Utc::now().timestamp();

        Self {
            sub: user_id,
            username,
            role,
            exp: now + expires_in,
            iat: now,
            iss: "agriconnect-api".to_string(),
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }
}


/// Authentication response returned by login and registration
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: UserInfo,
}

/// User information for responses
#[derive(Debug, Serialize, ToSchema)]
pub struct UserInfo {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub role: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}
