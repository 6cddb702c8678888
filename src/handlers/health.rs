//! Service liveness.

use crate::state::AppState;
use actix_web::{web, HttpResponse, Responder};

/// GET /api/health
pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
    match state.db.ping().await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({
            "status": "healthy",
            "service": state.service_name,
            "redis": "connected",
        })),
        Err(e) => HttpResponse::ServiceUnavailable().json(serde_json::json!({
            "status": "degraded",
            "service": state.service_name,
            "redis": e.to_string(),
        })),
    }
}
