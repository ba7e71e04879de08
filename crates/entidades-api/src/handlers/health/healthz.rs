//! Liveness probe handler

use actix_web::{HttpResponse, Responder};

use super::models::HealthResponse;

/// GET /healthz - Kubernetes-style liveness probe
///
/// Returns 200 OK whenever the server is running. Does not touch the database.
pub async fn healthz_handler() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse::ok_with_version(env!("CARGO_PKG_VERSION")))
}
