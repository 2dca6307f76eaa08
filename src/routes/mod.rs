// Route exports
pub mod inventory;
pub mod search;
pub mod sellers;

use crate::config::SearchSettings;
use crate::core::SearchEngine;
use crate::models::{ErrorResponse, HealthResponse};
use crate::services::{PostgresClient, PostgresError};
use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub postgres: Arc<PostgresClient>,
    pub engine: SearchEngine,
    pub search: SearchSettings,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check)).service(
        web::scope("/api/v1")
            .configure(search::configure)
            .configure(inventory::configure)
            .configure(sellers::configure),
    );
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let db_healthy = state.postgres.health_check().await.unwrap_or(false);

    let status = if db_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Build a 400 response for a request that failed validation or parsing
pub(crate) fn bad_request(message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "invalid_request".to_string(),
        message: message.into(),
        status_code: 400,
    })
}

/// Translate a storage error into the matching HTTP response
pub(crate) fn storage_error(context: &str, err: &PostgresError) -> HttpResponse {
    match err {
        PostgresError::NotFound(what) => HttpResponse::NotFound().json(ErrorResponse {
            error: "not_found".to_string(),
            message: what.clone(),
            status_code: 404,
        }),
        PostgresError::InvalidInput(message) => HttpResponse::BadRequest().json(ErrorResponse {
            error: "invalid_request".to_string(),
            message: message.clone(),
            status_code: 400,
        }),
        other => {
            tracing::error!("{}: {}", context, other);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "storage_error".to_string(),
                message: context.to_string(),
                status_code: 500,
            })
        }
    }
}
