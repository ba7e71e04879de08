// Entidades Server entrypoint
//!
//! Initialization, middleware wiring and graceful shutdown live in the
//! library modules so this file remains a thin orchestrator.

use anyhow::Result;
use entidades_configs::{ServerConfig, CONFIG_PATH_ENV, DEFAULT_CONFIG_PATH};
use entidades_server::lifecycle::{bootstrap, run};
use entidades_server::logging;
use log::{info, warn};
use std::env;
use std::path::Path;

#[actix_web::main]
async fn main() -> Result<()> {
    // Config path: first CLI argument, then $ENTIDADES_CONFIG, then ./config.toml
    let config_path = env::args()
        .nth(1)
        .or_else(|| env::var(CONFIG_PATH_ENV).ok())
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

    let (mut config, loaded_from_file) = if Path::new(&config_path).exists() {
        match ServerConfig::from_file(&config_path) {
            Ok(cfg) => (cfg, true),
            Err(e) => {
                eprintln!("❌ FATAL: Failed to load {}: {}", config_path, e);
                std::process::exit(1);
            },
        }
    } else {
        (ServerConfig::default(), false)
    };

    if let Err(e) = config.apply_env_overrides() {
        eprintln!("❌ FATAL: Invalid environment override: {}", e);
        std::process::exit(1);
    }
    if let Err(e) = config.finalize() {
        eprintln!("❌ FATAL: Invalid configuration: {}", e);
        std::process::exit(1);
    }

    // Logging before any other side effects
    let server_log_path = format!("{}/server.log", config.logging.logs_path);
    logging::init_logging(
        &config.logging.level,
        &server_log_path,
        config.logging.log_to_console,
        Some(&config.logging.targets),
        &config.logging.format,
    )?;

    info!("Entidades Server v{}", env!("CARGO_PKG_VERSION"));
    if loaded_from_file {
        info!("Loaded config from: {}", config_path);
    } else {
        warn!("Config file {} not found, using defaults", config_path);
    }
    info!("Host: {}  Port: {}", config.server.host, config.server.port);
    if let Some(path) = config.get("database.path") {
        info!("Database path: {}", path);
    }

    let components = bootstrap(&config).await?;

    run(&config, components).await
}
