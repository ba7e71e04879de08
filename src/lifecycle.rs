//! Server lifecycle management helpers.
//!
//! Bootstraps the database connection manager, wires the HTTP server and
//! coordinates graceful shutdown so `main.rs` stays a thin orchestrator.

use crate::middleware;
use actix_web::{web, App, HttpServer};
use anyhow::Result;
use entidades_api::routes::configure_routes;
use entidades_configs::ServerConfig;
use entidades_store::{ConnectionManager, SqliteConnectionManager};
use log::{debug, info, warn};
use std::net::{SocketAddr, TcpListener};
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Shared application components handed to every HTTP worker.
#[derive(Clone)]
pub struct ApplicationComponents {
    pub connections: Arc<dyn ConnectionManager>,
}

/// Build the SQLite connection manager described by `config.database`.
pub fn build_connection_manager(config: &ServerConfig) -> SqliteConnectionManager {
    let db = &config.database;
    let mut manager = SqliteConnectionManager::new(&db.path)
        .with_busy_timeout(Duration::from_millis(db.busy_timeout_ms));
    if db.read_only {
        manager = manager.read_only();
    } else if !db.create_if_missing {
        manager = manager.without_create();
    }
    manager
}

/// Prepare the database directory and check that a connection can be opened.
pub async fn bootstrap(config: &ServerConfig) -> Result<ApplicationComponents> {
    let phase_start = Instant::now();

    if config.database.create_if_missing && !config.database.read_only {
        if let Some(parent) = Path::new(&config.database.path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
    }

    let manager = build_connection_manager(config);
    let description = manager.describe();
    let connections: Arc<dyn ConnectionManager> = Arc::new(manager);

    let probe = connections.clone();
    web::block(move || probe.open()?.close())
        .await
        .map_err(|e| anyhow::anyhow!("Database probe could not run: {}", e))?
        .map_err(|e| anyhow::anyhow!("Cannot open database {}: {}", description, e))?;

    info!(
        "Database ready at {} ({:.2}ms)",
        description,
        phase_start.elapsed().as_secs_f64() * 1000.0
    );
    if !config.security.allowed_tables.is_empty() {
        info!("Table allow-list: {:?}", config.security.allowed_tables);
    } else {
        warn!("security.allowed_tables is empty - every table in the database can be listed");
    }

    Ok(ApplicationComponents { connections })
}

/// Run the HTTP server until Ctrl+C, then shut down gracefully.
pub async fn run(config: &ServerConfig, components: ApplicationComponents) -> Result<()> {
    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    info!("Starting HTTP server on {}", bind_addr);
    debug!("Endpoints: GET /api/{{nombreProyecto}}/{{nombreTabla}}, GET /healthz, GET /readyz");
    info!(
        "Server config: workers={}, shutdown_timeout={}s",
        config.server.effective_workers(),
        config.shutdown.timeout_seconds
    );

    let connections = components.connections.clone();
    let app_config = config.clone();

    let server = HttpServer::new(move || {
        App::new()
            .wrap(middleware::request_logger())
            .wrap(middleware::build_cors_from_config(&app_config))
            .app_data(web::Data::new(connections.clone()))
            .app_data(web::Data::new(app_config.clone()))
            .configure(configure_routes)
    });

    let server = if config.server.enable_http2 {
        info!("HTTP/2 support enabled (h2c - HTTP/2 cleartext)");
        server.bind_auto_h2c(&bind_addr)?
    } else {
        debug!("HTTP/1.1 only mode");
        server.bind(&bind_addr)?
    };

    let server = server
        .workers(config.server.effective_workers())
        .shutdown_timeout(config.shutdown.timeout_seconds)
        .disable_signals()
        .run();

    let server_handle = server.handle();
    let server_task = tokio::spawn(server);

    tokio::select! {
        result = server_task => {
            match result {
                Ok(Err(e)) => log::error!("Server stopped with error: {}", e),
                Err(e) => log::error!("Server task failed: {}", e),
                Ok(Ok(())) => {}
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!(
                "Received Ctrl+C, waiting up to {}s for in-flight requests...",
                config.shutdown.timeout_seconds
            );
            server_handle.stop(true).await;
            drop(components);
            debug!("Graceful shutdown complete");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}

/// A running HTTP server instance intended for integration tests.
///
/// Uses the same app wiring as [`run`] but binds an ephemeral port.
pub struct RunningTestHttpServer {
    pub base_url: String,
    pub bind_addr: SocketAddr,
    server_handle: actix_web::dev::ServerHandle,
    server_task: tokio::task::JoinHandle<std::io::Result<()>>,
}

impl RunningTestHttpServer {
    pub async fn shutdown(self) {
        self.server_handle.stop(false).await;
        let _ = self.server_task.await;
    }
}

/// Start the HTTP server for integration tests on a random available port.
///
/// Does not install Ctrl+C handling; the caller must invoke `shutdown()`.
pub async fn run_for_tests(
    config: &ServerConfig,
    components: ApplicationComponents,
) -> Result<RunningTestHttpServer> {
    let bind_ip = if config.server.host.is_empty() {
        "127.0.0.1"
    } else {
        config.server.host.as_str()
    };

    let listener = TcpListener::bind((bind_ip, 0))?;
    let bind_addr = listener.local_addr()?;

    let connections = components.connections.clone();
    let app_config = config.clone();

    let server = HttpServer::new(move || {
        App::new()
            .wrap(middleware::request_logger())
            .wrap(middleware::build_cors_from_config(&app_config))
            .app_data(web::Data::new(connections.clone()))
            .app_data(web::Data::new(app_config.clone()))
            .configure(configure_routes)
    });

    let server = server
        .listen(listener)?
        .workers(1)
        .disable_signals()
        .run();

    let server_handle = server.handle();
    let server_task = tokio::spawn(server);

    Ok(RunningTestHttpServer {
        base_url: format!("http://{}", bind_addr),
        bind_addr,
        server_handle,
        server_task,
    })
}
