//! Liveness endpoint.

use actix_web::{web, HttpResponse};
use pharma_db::Database;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// `healthy` or `degraded`
    pub status: String,
    pub database: bool,
    pub migrations_total: usize,
    pub migrations_applied: usize,
    pub version: String,
}

/// GET /health
///
/// 200 when the database answers and every embedded migration is applied,
/// 503 otherwise.
pub async fn health(db: web::Data<Database>) -> HttpResponse {
    let health = db.health().await;
    let healthy = health.is_healthy();
    let body = HealthResponse {
        status: if healthy { "healthy" } else { "degraded" }.to_string(),
        database: health.reachable,
        migrations_total: health.migrations.map(|m| m.total).unwrap_or_default(),
        migrations_applied: health.migrations.map(|m| m.applied).unwrap_or_default(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    if healthy {
        HttpResponse::Ok().json(body)
    } else {
        HttpResponse::ServiceUnavailable().json(body)
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health));
}
