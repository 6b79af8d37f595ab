//! Transaction listing handler

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::gateway::{
    response::{ApiResponse, Rejection, error_codes, reject},
    state::AppState,
};

use super::models::{TransactionView, TxType};
use super::service::{LedgerQuery, LedgerService};

#[derive(Debug, Deserialize)]
pub struct ListParams {
    /// "sent" | "received" (optional)
    pub direction: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// List own transactions
///
/// GET /api/v1/transactions?direction&limit&offset
#[utoipa::path(
    get,
    path = "/api/v1/transactions",
    params(
        ("direction" = Option<String>, Query, description = "sent | received (optional)"),
        ("limit" = Option<i64>, Query, description = "Page size, clamped to 1..=200, default 50"),
        ("offset" = Option<i64>, Query, description = "Rows to skip, default 0")
    ),
    responses(
        (status = 200, description = "Transactions, newest first", body = ApiResponse<Vec<TransactionView>>),
        (status = 400, description = "Invalid direction"),
        (status = 401, description = "Authentication failed")
    ),
    security(("jwt_auth" = [])),
    tag = "Ledger"
)]
pub async fn list_transactions(
    State(state): State<Arc<AppState>>,
    axum::Extension(user): axum::Extension<CurrentUser>,
    Query(params): Query<ListParams>,
) -> Result<Json<ApiResponse<Vec<TransactionView>>>, Rejection> {
    let direction = match params.direction.as_deref() {
        None => None,
        Some(raw) => Some(raw.parse::<TxType>().map_err(|_| {
            reject(
                StatusCode::BAD_REQUEST,
                error_codes::INVALID_PARAMETER,
                "direction must be 'sent' or 'received'",
            )
        })?),
    };

    let query = LedgerQuery {
        direction,
        limit: params.limit,
        offset: params.offset,
    };

    match LedgerService::list(state.db.pool(), &state.config.ledger, user.user_id, query).await {
        Ok(items) => Ok(Json(ApiResponse::success(items))),
        Err(e) => {
            tracing::error!("Transaction listing for user {} failed: {}", user.user_id, e);
            Err(reject(
                StatusCode::INTERNAL_SERVER_ERROR,
                error_codes::INTERNAL_ERROR,
                "Query failed",
            ))
        }
    }
}
