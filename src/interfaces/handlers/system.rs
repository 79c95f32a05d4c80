use actix_web::{web, HttpResponse, Responder};
use chrono::Utc;
use serde::Serialize;
use tracing::instrument;

use crate::{
    auth::firebase::TokenVerifier, repositories::project::ProjectRepository, AppState,
};

#[derive(Serialize)]
struct HealthCheckResponse {
    status: &'static str,
    timestamp: String,
    database: &'static str,
    version: &'static str,
}

/// Liveness probe: reports overall status plus a store ping. Responds 200
/// even when the database is down so the process itself is not recycled
/// for a storage outage.
#[instrument(skip(state))]
pub async fn health_check<R, V>(state: web::Data<AppState<R, V>>) -> impl Responder
where
    R: ProjectRepository,
    V: TokenVerifier,
{
    let database = match state.project_handler.project_repo.ping().await {
        Ok(()) => "connected",
        Err(e) => {
            tracing::warn!("health check database ping failed: {}", e);
            "unreachable"
        }
    };

    HttpResponse::Ok().json(HealthCheckResponse {
        status: "Ok",
        timestamp: Utc::now().to_rfc3339(),
        database,
        version: env!("CARGO_PKG_VERSION"),
    })
}
