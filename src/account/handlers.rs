//! Account handlers (account view, card activation)

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::auth::CurrentUser;
use crate::gateway::{
    response::{ApiResponse, Rejection, error_codes, reject},
    state::AppState,
};

use super::models::mask_card;
use super::repository::{AccountRepository, UserRepository};

/// Caller-facing account view (card number masked)
#[derive(Debug, Serialize, ToSchema)]
pub struct AccountView {
    pub user_id: i64,
    /// Balance with 2 decimal places, as a string to preserve scale
    #[schema(example = "100.00")]
    pub balance: String,
    #[schema(example = "1234 **** **** 5678")]
    pub card_number: String,
    pub card_active: bool,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ActivateRequest {
    pub active: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CardActiveResponse {
    pub user_id: i64,
    pub card_active: bool,
}

/// Get own account
///
/// GET /api/v1/account/me
#[utoipa::path(
    get,
    path = "/api/v1/account/me",
    responses(
        (status = 200, description = "Account details", body = ApiResponse<AccountView>),
        (status = 401, description = "Authentication failed"),
        (status = 404, description = "Account not found")
    ),
    security(("jwt_auth" = [])),
    tag = "Account"
)]
pub async fn my_account(
    State(state): State<Arc<AppState>>,
    axum::Extension(user): axum::Extension<CurrentUser>,
) -> Result<Json<ApiResponse<AccountView>>, Rejection> {
    let account = AccountRepository::get_by_user_id(state.db.pool(), user.user_id)
        .await
        .map_err(|e| {
            tracing::error!("Account lookup failed: {}", e);
            reject(
                StatusCode::INTERNAL_SERVER_ERROR,
                error_codes::INTERNAL_ERROR,
                "Query failed",
            )
        })?
        .ok_or_else(|| {
            reject(
                StatusCode::NOT_FOUND,
                error_codes::ACCOUNT_NOT_FOUND,
                "Account not found",
            )
        })?;

    let mut balance = account.balance.round_dp(2);
    balance.rescale(2);
    Ok(Json(ApiResponse::success(AccountView {
        user_id: account.user_id,
        balance: balance.to_string(),
        card_number: mask_card(&account.card_number),
        card_active: account.card_active,
    })))
}

/// Toggle own card
///
/// PATCH /api/v1/account/activate
#[utoipa::path(
    patch,
    path = "/api/v1/account/activate",
    request_body = ActivateRequest,
    responses(
        (status = 200, description = "Card flag updated", body = ApiResponse<CardActiveResponse>),
        (status = 401, description = "Authentication failed"),
        (status = 404, description = "Account not found")
    ),
    security(("jwt_auth" = [])),
    tag = "Account"
)]
pub async fn activate_my_card(
    State(state): State<Arc<AppState>>,
    axum::Extension(user): axum::Extension<CurrentUser>,
    Json(req): Json<ActivateRequest>,
) -> Result<Json<ApiResponse<CardActiveResponse>>, Rejection> {
    set_card_active(&state, user.user_id, req.active).await
}

/// Toggle any user's card (back-office only)
///
/// PATCH /api/v1/account/{user_id}/activate
///
/// Distinct entry point from the self toggle: requires an admin or
/// account-manager role on the caller.
#[utoipa::path(
    patch,
    path = "/api/v1/account/{user_id}/activate",
    params(("user_id" = i64, Path, description = "Target user ID")),
    request_body = ActivateRequest,
    responses(
        (status = 200, description = "Card flag updated", body = ApiResponse<CardActiveResponse>),
        (status = 401, description = "Authentication failed"),
        (status = 403, description = "Caller lacks a back-office role"),
        (status = 404, description = "Account not found")
    ),
    security(("jwt_auth" = [])),
    tag = "Account"
)]
pub async fn admin_activate_card(
    State(state): State<Arc<AppState>>,
    axum::Extension(user): axum::Extension<CurrentUser>,
    Path(target_user_id): Path<i64>,
    Json(req): Json<ActivateRequest>,
) -> Result<Json<ApiResponse<CardActiveResponse>>, Rejection> {
    let caller = UserRepository::get_by_id(state.db.pool(), user.user_id)
        .await
        .map_err(|e| {
            tracing::error!("Caller lookup failed: {}", e);
            reject(
                StatusCode::INTERNAL_SERVER_ERROR,
                error_codes::INTERNAL_ERROR,
                "Query failed",
            )
        })?
        .ok_or_else(|| {
            reject(
                StatusCode::FORBIDDEN,
                error_codes::FORBIDDEN,
                "Unknown caller",
            )
        })?;

    if !caller.role.is_back_office() {
        return Err(reject(
            StatusCode::FORBIDDEN,
            error_codes::FORBIDDEN,
            "Admin or account-manager role required",
        ));
    }

    set_card_active(&state, target_user_id, req.active).await
}

async fn set_card_active(
    state: &AppState,
    user_id: i64,
    active: bool,
) -> Result<Json<ApiResponse<CardActiveResponse>>, Rejection> {
    let updated = AccountRepository::set_card_active(state.db.pool(), user_id, active)
        .await
        .map_err(|e| {
            tracing::error!("Card toggle failed for user {}: {}", user_id, e);
            reject(
                StatusCode::INTERNAL_SERVER_ERROR,
                error_codes::INTERNAL_ERROR,
                "Update failed",
            )
        })?;

    if !updated {
        return Err(reject(
            StatusCode::NOT_FOUND,
            error_codes::ACCOUNT_NOT_FOUND,
            "Account not found",
        ));
    }

    tracing::info!("Card for user {} set to active={}", user_id, active);
    Ok(Json(ApiResponse::success(CardActiveResponse {
        user_id,
        card_active: active,
    })))
}

// ============================================================================
// Internal provisioning (mock-api feature)
// ============================================================================

/// Internal user provisioning request
#[cfg(feature = "mock-api")]
#[derive(Debug, Deserialize)]
pub struct MockUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    /// Seed balance, defaults to 0
    pub balance: Option<rust_decimal::Decimal>,
    /// Card starts active, defaults to false
    pub card_active: Option<bool>,
    /// "user" | "account_manager" | "admin", defaults to "user"
    pub role: Option<String>,
}

#[cfg(feature = "mock-api")]
#[derive(Debug, Serialize)]
pub struct MockUserResponse {
    pub user_id: i64,
    pub card_number: String,
    pub token: String,
}

/// Internal Mock User Provisioning (Debug/Test Trigger)
///
/// [SECURITY WARNING] This endpoint is for development/testing ONLY.
/// It creates users and funded accounts without any registration flow.
///
/// POST /internal/mock/user
#[cfg(feature = "mock-api")]
pub async fn mock_create_user(
    State(state): State<Arc<AppState>>,
    headers: axum::http::HeaderMap,
    Json(req): Json<MockUserRequest>,
) -> Result<(StatusCode, Json<ApiResponse<MockUserResponse>>), Rejection> {
    use super::cards::generate_unique_card_number;
    use super::models::Role;
    use crate::auth::hash_password;

    let secret = headers
        .get("X-Internal-Secret")
        .and_then(|v| v.to_str().ok());
    if secret != Some(state.config.auth.internal_secret.as_str()) {
        return Err(reject(
            StatusCode::FORBIDDEN,
            error_codes::AUTH_FAILED,
            "Access Denied: Missing or Invalid X-Internal-Secret",
        ));
    }

    if req.username.is_empty() || req.email.is_empty() || req.password.len() < 8 {
        return Err(reject(
            StatusCode::BAD_REQUEST,
            error_codes::INVALID_PARAMETER,
            "Invalid username, email or password (min 8 chars)",
        ));
    }

    let role = match req.role.as_deref() {
        Some("admin") => Role::Admin,
        Some("account_manager") => Role::AccountManager,
        _ => Role::User,
    };

    let password_hash = hash_password(&req.password).map_err(|e| {
        tracing::error!("Password hashing failed: {}", e);
        reject(
            StatusCode::INTERNAL_SERVER_ERROR,
            error_codes::INTERNAL_ERROR,
            "Hashing failed",
        )
    })?;

    let pool = state.db.pool();
    let user_id = UserRepository::create(pool, &req.username, &req.email, &password_hash, role)
        .await
        .map_err(|e| {
            let err_msg = e.to_string();
            if err_msg.contains("duplicate key") {
                reject(
                    StatusCode::CONFLICT,
                    error_codes::INVALID_PARAMETER,
                    "Username or email already exists",
                )
            } else {
                tracing::error!("User provisioning failed: {}", err_msg);
                reject(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    error_codes::INTERNAL_ERROR,
                    "Provisioning failed",
                )
            }
        })?;

    let card_number = generate_unique_card_number(pool).await.map_err(|e| {
        tracing::error!("Card number generation failed: {}", e);
        reject(
            StatusCode::INTERNAL_SERVER_ERROR,
            error_codes::INTERNAL_ERROR,
            "Card generation failed",
        )
    })?;

    let balance = req.balance.unwrap_or_default();
    AccountRepository::create(
        pool,
        user_id,
        &card_number,
        balance,
        req.card_active.unwrap_or(false),
    )
    .await
    .map_err(|e| {
        tracing::error!("Account provisioning failed: {}", e);
        reject(
            StatusCode::INTERNAL_SERVER_ERROR,
            error_codes::INTERNAL_ERROR,
            "Provisioning failed",
        )
    })?;

    let token = state.auth.issue_token(user_id).map_err(|e| {
        tracing::error!("Token issuing failed: {}", e);
        reject(
            StatusCode::INTERNAL_SERVER_ERROR,
            error_codes::INTERNAL_ERROR,
            "Token issuing failed",
        )
    })?;

    tracing::info!("Provisioned mock user {} (id {})", req.username, user_id);
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(MockUserResponse {
            user_id,
            card_number,
            token,
        })),
    ))
}
