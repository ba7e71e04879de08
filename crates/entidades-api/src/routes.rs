//! API routes configuration

use crate::handlers;
use actix_web::web;

/// Configure API routes for Entidades
///
/// - GET /api/{nombreProyecto}/{nombreTabla} - List every row of a table (anonymous)
/// - GET /healthz - Liveness probe
/// - GET /readyz - Readiness probe (opens a database connection)
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/healthz", web::get().to(handlers::healthz_handler))
        .route("/readyz", web::get().to(handlers::readyz_handler))
        .service(web::scope("/api").service(handlers::list_rows));
}
