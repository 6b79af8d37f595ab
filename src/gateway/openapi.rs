//! OpenAPI / Swagger UI Documentation
//!
//! - Swagger UI: `http://localhost:8080/docs`
//! - OpenAPI JSON: `http://localhost:8080/api-docs/openapi.json`

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::account::handlers::{AccountView, ActivateRequest, CardActiveResponse};
use crate::gateway::HealthResponse;
use crate::ledger::models::{TransactionView, TxType};
use crate::transfer::service::{TransferRequest, TransferResponse};

/// JWT bearer authentication security scheme
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "jwt_auth",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            );
        }
    }
}

/// Main API Documentation struct
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Dicebank API",
        version = "1.0.0",
        description = "A small banking API: card-gated accounts, atomic peer-to-peer transfers, transaction history.",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Development"),
    ),
    paths(
        crate::gateway::health_check,
        crate::transfer::handlers::create_transfer,
        crate::ledger::handlers::list_transactions,
        crate::account::handlers::my_account,
        crate::account::handlers::activate_my_card,
        crate::account::handlers::admin_activate_card,
    ),
    components(
        schemas(
            HealthResponse,
            TransferRequest,
            TransferResponse,
            TransactionView,
            TxType,
            AccountView,
            ActivateRequest,
            CardActiveResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "System", description = "Health and service status"),
        (name = "Transfer", description = "Peer-to-peer money movement"),
        (name = "Ledger", description = "Transaction history"),
        (name = "Account", description = "Account view and card activation"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_document_builds() {
        let doc = ApiDoc::openapi();
        let json = doc.to_json().unwrap();
        assert!(json.contains("/api/v1/transfer"));
        assert!(json.contains("/api/v1/transactions"));
        assert!(json.contains("/api/v1/account/me"));
    }
}
