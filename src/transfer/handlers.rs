//! Transfer handler

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};
use rust_decimal::Decimal;

use crate::auth::CurrentUser;
use crate::gateway::{
    response::{ApiResponse, Rejection, error_codes, reject},
    state::AppState,
};

use super::error::TransferError;
use super::service::{TransferRequest, TransferResponse, TransferService};

/// Create a peer-to-peer transfer
///
/// POST /api/v1/transfer
#[utoipa::path(
    post,
    path = "/api/v1/transfer",
    request_body = TransferRequest,
    responses(
        (status = 201, description = "Transfer committed", body = ApiResponse<TransferResponse>),
        (status = 400, description = "Invalid amount, self transfer or insufficient funds"),
        (status = 401, description = "Authentication failed"),
        (status = 403, description = "Sender card not active"),
        (status = 404, description = "Receiver or account not found"),
        (status = 503, description = "Lock wait expired, retry")
    ),
    security(("jwt_auth" = [])),
    tag = "Transfer"
)]
pub async fn create_transfer(
    State(state): State<Arc<AppState>>,
    axum::Extension(user): axum::Extension<CurrentUser>,
    Json(req): Json<TransferRequest>,
) -> Result<(StatusCode, Json<ApiResponse<TransferResponse>>), Rejection> {
    // Schema-level rejection: non-positive amounts fail before any lookup
    if req.amount <= Decimal::ZERO {
        return Err(reject(
            StatusCode::BAD_REQUEST,
            error_codes::INVALID_PARAMETER,
            "Amount must be positive",
        ));
    }

    match TransferService::execute(&state.db, &state.config.transfer, user.user_id, req).await {
        Ok(resp) => Ok((StatusCode::CREATED, Json(ApiResponse::success(resp)))),
        Err(e) => {
            tracing::warn!("Transfer by user {} failed: {}", user.user_id, e);
            Err(rejection_for(&e))
        }
    }
}

/// Map a transfer failure to HTTP status and error code
fn rejection_for(e: &TransferError) -> Rejection {
    let (status, code) = match e {
        TransferError::InvalidAmount => (StatusCode::BAD_REQUEST, error_codes::INVALID_PARAMETER),
        TransferError::SelfTransfer => (StatusCode::BAD_REQUEST, error_codes::SELF_TRANSFER),
        TransferError::InsufficientFunds => {
            (StatusCode::BAD_REQUEST, error_codes::INSUFFICIENT_FUNDS)
        }
        TransferError::CardInactive => (StatusCode::FORBIDDEN, error_codes::CARD_INACTIVE),
        TransferError::ReceiverNotFound => {
            (StatusCode::NOT_FOUND, error_codes::RECEIVER_NOT_FOUND)
        }
        TransferError::AccountMissing => (StatusCode::NOT_FOUND, error_codes::ACCOUNT_NOT_FOUND),
        TransferError::LockTimeout => {
            (StatusCode::SERVICE_UNAVAILABLE, error_codes::LOCK_TIMEOUT)
        }
        TransferError::Database(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            error_codes::INTERNAL_ERROR,
        ),
    };
    reject(status, code, e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(e: TransferError) -> StatusCode {
        rejection_for(&e).0
    }

    #[test]
    fn precondition_failures_map_to_client_errors() {
        assert_eq!(status_of(TransferError::InvalidAmount), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(TransferError::SelfTransfer), StatusCode::BAD_REQUEST);
        assert_eq!(
            status_of(TransferError::InsufficientFunds),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(status_of(TransferError::CardInactive), StatusCode::FORBIDDEN);
        assert_eq!(
            status_of(TransferError::ReceiverNotFound),
            StatusCode::NOT_FOUND
        );
        assert_eq!(status_of(TransferError::AccountMissing), StatusCode::NOT_FOUND);
    }

    #[test]
    fn lock_timeout_is_retryable_service_error() {
        assert_eq!(
            status_of(TransferError::LockTimeout),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
