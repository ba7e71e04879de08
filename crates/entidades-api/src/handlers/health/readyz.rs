//! Readiness probe handler

use actix_web::{web, HttpResponse, Responder};
use entidades_store::ConnectionManager;
use log::warn;
use std::sync::Arc;

use super::models::HealthResponse;

/// GET /readyz - Kubernetes-style readiness probe
///
/// Ready when a database connection can be opened and closed.
pub async fn readyz_handler(connections: web::Data<Arc<dyn ConnectionManager>>) -> impl Responder {
    let connections = connections.get_ref().clone();
    let probe = web::block(move || connections.open()?.close()).await;

    match probe {
        Ok(Ok(())) => HttpResponse::Ok().json(HealthResponse::ready()),
        Ok(Err(e)) => {
            warn!("Readiness check failed: {}", e);
            HttpResponse::ServiceUnavailable().json(HealthResponse::unavailable(e.to_string()))
        },
        Err(e) => {
            warn!("Readiness check could not run: {}", e);
            HttpResponse::ServiceUnavailable().json(HealthResponse::unavailable(e.to_string()))
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::healthz_handler;
    use actix_web::{test, App};
    use entidades_store::{DbConnection, StoreError};

    struct Unreachable;

    impl ConnectionManager for Unreachable {
        fn open(&self) -> entidades_store::Result<Box<dyn DbConnection>> {
            Err(StoreError::Connection("sin red".to_string()))
        }

        fn describe(&self) -> String {
            "unreachable://".to_string()
        }
    }

    #[actix_web::test]
    async fn test_readyz_unavailable_when_open_fails() {
        let connections: Arc<dyn ConnectionManager> = Arc::new(Unreachable);
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(connections))
                .route("/readyz", web::get().to(readyz_handler)),
        )
        .await;

        let req = test::TestRequest::get().uri("/readyz").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 503);

        let body: HealthResponse = test::read_body_json(resp).await;
        assert_eq!(body.status, "unavailable");
        assert!(body.error.unwrap().contains("sin red"));
    }

    #[actix_web::test]
    async fn test_healthz_reports_version() {
        let app = test::init_service(App::new().route("/healthz", web::get().to(healthz_handler))).await;

        let req = test::TestRequest::get().uri("/healthz").to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());

        let body: HealthResponse = test::read_body_json(resp).await;
        assert_eq!(body.status, "ok");
        assert_eq!(body.version.as_deref(), Some(env!("CARGO_PKG_VERSION")));
    }
}
