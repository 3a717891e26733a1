use actix_web::{get, web, HttpResponse, Responder};
use chrono::Utc;
use serde_json::json;

use crate::state::AppState;

/// Health check endpoint
///
/// Reports whether the database answers. Responds 503 when it does not.
#[get("/health")]
pub async fn health(state: web::Data<AppState>) -> impl Responder {
    match state.db.ping().await {
        Ok(()) => HttpResponse::Ok().json(json!({
            "status": "ok",
            "timestamp": Utc::now()
        })),
        Err(e) => {
            log::error!("health check failed: {}", e);
            HttpResponse::ServiceUnavailable().json(json!({
                "status": "unavailable",
                "timestamp": Utc::now()
            }))
        }
    }
}
