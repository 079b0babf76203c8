use axum::{
    extract::{Query, State},
    response::Json,
};
use validator::Validate;

use crate::app_state::AppState;
use crate::auth::middleware::AuthenticatedUser;
use crate::auth::{AuthResponse, UserInfo};
use crate::error::{ApiError, Result};
use crate::handlers::extract::AppJson;
use crate::models::user::{CheckEmailQuery, CheckEmailResponse, LoginRequest, RegisterRequest};

/// Register a supplier or buyer account
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "auth",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Account created", body = AuthResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email or username already registered")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    AppJson(request): AppJson<RegisterRequest>,
) -> Result<Json<AuthResponse>> {
    request
        .validate()
        .map_err(|e| ApiError::BadRequest(format!("Validation error: {}", e)))?;

    let response = state.auth_service.register(request).await?;
    Ok(Json(response))
}

/// Log in as a supplier or buyer
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 401, description = "Invalid credentials or wrong role"),
        (status = 400, description = "Validation error")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    AppJson(request): AppJson<LoginRequest>,
) -> Result<Json<AuthResponse>> {
    request
        .validate()
        .map_err(|e| ApiError::BadRequest(format!("Validation error: {}", e)))?;

    let response = state.auth_service.login(request).await?;
    Ok(Json(response))
}

/// Check whether an email is already registered
#[utoipa::path(
    get,
    path = "/api/auth/check-email",
    tag = "auth",
    params(CheckEmailQuery),
    responses(
        (status = 200, description = "Existence flag", body = CheckEmailResponse)
    )
)]
pub async fn check_email(
    State(state): State<AppState>,
    Query(query): Query<CheckEmailQuery>,
) -> Result<Json<CheckEmailResponse>> {
    let exists = state.auth_service.email_exists(&query.email).await?;
    Ok(Json(CheckEmailResponse { exists }))
}

/// Current user's profile
#[utoipa::path(
    get,
    path = "/api/auth/profile",
    tag = "auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "User profile", body = UserInfo),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_profile(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<UserInfo>> {
    let info = state.auth_service.user_info(user.0.sub).await?;
    Ok(Json(info))
}
