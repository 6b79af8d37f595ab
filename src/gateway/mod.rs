//! HTTP Gateway
//!
//! Router construction, shared state, the unified response envelope and the
//! health endpoint. Private routes sit behind the JWT middleware.

pub mod openapi;
pub mod response;
pub mod state;

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    middleware::from_fn_with_state,
    routing::{get, patch, post},
};
use tokio::net::TcpListener;
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

use crate::auth::{AuthService, middleware::jwt_auth_middleware};
use crate::config::AppConfig;
use crate::db::Database;

use response::ApiResponse;
use state::AppState;

/// Health check response data
#[derive(serde::Serialize, ToSchema)]
pub struct HealthResponse {
    /// Server timestamp in milliseconds
    #[schema(example = 1703494800000_u64)]
    pub timestamp_ms: u64,
}

/// Health check endpoint
///
/// Pings the database; reports unhealthy without exposing internal detail.
#[utoipa::path(
    get,
    path = "/api/v1/health",
    responses(
        (status = 200, description = "Service healthy", body = ApiResponse<HealthResponse>),
        (status = 503, description = "Service unavailable")
    ),
    tag = "System"
)]
pub async fn health_check(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<ApiResponse<HealthResponse>>) {
    let timestamp_ms = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);

    match state.db.health_check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse::success(HealthResponse { timestamp_ms })),
        ),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ApiResponse {
                    code: response::error_codes::SERVICE_UNAVAILABLE,
                    msg: "unavailable".to_string(),
                    data: None,
                }),
            )
        }
    }
}

/// Build the application router
pub fn build_router(state: Arc<AppState>) -> Router {
    // Private routes: all behind JWT auth
    let private_routes = Router::new()
        .route("/transfer", post(crate::transfer::handlers::create_transfer))
        .route(
            "/transactions",
            get(crate::ledger::handlers::list_transactions),
        )
        .route("/account/me", get(crate::account::handlers::my_account))
        .route(
            "/account/activate",
            patch(crate::account::handlers::activate_my_card),
        )
        .route(
            "/account/{user_id}/activate",
            patch(crate::account::handlers::admin_activate_card),
        )
        .layer(from_fn_with_state(state.clone(), jwt_auth_middleware));

    let app = Router::new()
        .route("/api/v1/health", get(health_check))
        .nest("/api/v1", private_routes);

    // [SECURITY] Mock provisioning routes - only compiled when the
    // 'mock-api' feature is enabled. Production builds must disable it.
    #[cfg(feature = "mock-api")]
    let app = app.nest(
        "/internal/mock",
        Router::new().route("/user", post(crate::account::handlers::mock_create_user)),
    );

    app.with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", openapi::ApiDoc::openapi()))
}

/// Start the HTTP gateway server
pub async fn run_server(config: AppConfig, db: Arc<Database>) -> anyhow::Result<()> {
    let auth = Arc::new(AuthService::new(
        config.auth.jwt_secret.clone(),
        config.auth.token_ttl_hours,
    ));
    let addr = format!("{}:{}", config.gateway.host, config.gateway.port);
    let state = Arc::new(AppState::new(Arc::new(config), db, auth));

    let app = build_router(state);

    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Gateway listening on http://{}", addr);
    tracing::info!("API docs at http://{}/docs", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
