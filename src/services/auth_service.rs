//! Registration and login for both marketplace roles.

use tracing::{info, warn};

use crate::auth::jwt::JwtService;
use crate::auth::password::PasswordService;
use crate::auth::{AuthResponse, Claims, UserInfo};
use crate::config::Config;
use crate::database::DatabasePool;
use crate::database::schema::types::UserRole;
use crate::error::{ApiError, ErrorCode, Result};
use crate::models::user::{
    BuyerProfile, LoginRequest, RegisterRequest, SupplierProfile, UserRow,
};

/// The role-specific profile a registration must carry.
enum RoleProfile<'a> {
    Supplier(&'a SupplierProfile),
    Buyer(&'a BuyerProfile),
}

impl<'a> RoleProfile<'a> {
    fn from_request(request: &'a RegisterRequest) -> Result<Self> {
        match request.role {
            UserRole::Supplier => request
                .supplier_profile
                .as_ref()
                .map(RoleProfile::Supplier)
                .ok_or_else(|| {
                    ApiError::validation_field(
                        "supplier_profile",
                        "Supplier registration requires a supplier profile",
                    )
                }),
            UserRole::Buyer => request
                .buyer_profile
                .as_ref()
                .map(RoleProfile::Buyer)
                .ok_or_else(|| {
                    ApiError::validation_field(
                        "buyer_profile",
                        "Buyer registration requires a buyer profile",
                    )
                }),
        }
    }
}

#[derive(Clone)]
pub struct AuthService {
    db: DatabasePool,
    config: Config,
    jwt_service: JwtService,
}

impl AuthService {
    pub fn new(db: DatabasePool, config: Config, jwt_service: JwtService) -> Self {
        Self {
            db,
            config,
            jwt_service,
        }
    }

    /// Register a new user with their role-specific profile. The user row
    /// and profile row are written in one transaction.
    pub async fn register(&self, request: RegisterRequest) -> Result<AuthResponse> {
        let profile = RoleProfile::from_request(&request)?;

        if self.email_exists(&request.email).await? {
            return Err(ApiError::already_exists("An account with this email"));
        }

        let password_hash =
            PasswordService::hash_password(&request.password, self.config.bcrypt_cost)?;

        let mut tx = self.db.begin().await?;

        let user = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (
                username, email, password_hash, role,
                first_name, last_name, phone
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, username, email, password_hash, role,
                      first_name, last_name, phone, is_active,
                      created_at, updated_at
            "#,
        )
        .bind(&request.username)
        .bind(&request.email)
        .bind(&password_hash)
        .bind(request.role)
        .bind(&request.first_name)
        .bind(&request.last_name)
        .bind(&request.phone)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                ApiError::already_exists("An account with this username or email")
            }
            _ => ApiError::Database(e),
        })?;

        match profile {
            RoleProfile::Supplier(profile) => {
                sqlx::query(
                    r#"
                    INSERT INTO supplier_profiles (user_id, farm_name, location, description)
                    VALUES ($1, $2, $3, $4)
                    "#,
                )
                .bind(user.id)
                .bind(&profile.farm_name)
                .bind(&profile.location)
                .bind(&profile.description)
                .execute(&mut *tx)
                .await?;
            }
            RoleProfile::Buyer(profile) => {
                sqlx::query(
                    r#"
                    INSERT INTO buyer_profiles (user_id, business_name, business_type, address, tax_id)
                    VALUES ($1, $2, $3, $4, $5)
                    "#,
                )
                .bind(user.id)
                .bind(&profile.business_name)
                .bind(&profile.business_type)
                .bind(&profile.address)
                .bind(&profile.tax_id)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;

        info!(user_id = %user.id, role = %user.role, "User registered");

        self.issue_token(user)
    }

    /// Authenticate by email and password for an explicit role.
    pub async fn login(&self, request: LoginRequest) -> Result<AuthResponse> {
        let user = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, email, password_hash, role,
                   first_name, last_name, phone, is_active,
                   created_at, updated_at
            FROM users
            WHERE email = $1 AND is_active = true
            "#,
        )
        .bind(&request.email)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| {
            warn!(email = %request.email, "Login failed: user not found");
            ApiError::invalid_credentials()
        })?;

        let password_valid =
            PasswordService::verify_password(&request.password, &user.password_hash)?;
        if !password_valid {
            warn!(user_id = %user.id, "Login failed: invalid password");
            return Err(ApiError::invalid_credentials());
        }

        if user.role != request.role {
            return Err(ApiError::with_code(
                ErrorCode::RoleMismatch,
                format!(
                    "This account is registered as a {}, not a {}",
                    user.role, request.role
                ),
            ));
        }

        info!(user_id = %user.id, role = %user.role, "User logged in");

        self.issue_token(user)
    }

    /// Whether an account already exists for this email.
    pub async fn email_exists(&self, email: &str) -> Result<bool> {
        let exists: Option<(bool,)> =
            sqlx::query_as("SELECT true FROM users WHERE email = $1 LIMIT 1")
                .bind(email)
                .fetch_optional(&self.db)
                .await?;

        Ok(exists.is_some())
    }

    /// Fetch the profile of an authenticated user.
    pub async fn user_info(&self, user_id: uuid::Uuid) -> Result<UserInfo> {
        let user = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, email, password_hash, role,
                   first_name, last_name, phone, is_active,
                   created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| ApiError::not_found("User"))?;

        Ok(Self::to_user_info(user))
    }

    fn issue_token(&self, user: UserRow) -> Result<AuthResponse> {
        let claims = Claims::new(
            user.id,
            user.username.clone(),
            user.role.to_string(),
            self.config.jwt_expiration,
        );
        let access_token = self.jwt_service.encode_token(&claims)?;

        Ok(AuthResponse {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.config.jwt_expiration,
            user: Self::to_user_info(user),
        })
    }

    fn to_user_info(user: UserRow) -> UserInfo {
        UserInfo {
            id: user.id,
            username: user.username,
            email: user.email,
            role: user.role.to_string(),
            first_name: user.first_name,
            last_name: user.last_name,
            created_at: Some(user.created_at),
        }
    }
}
