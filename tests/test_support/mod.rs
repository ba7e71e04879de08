use anyhow::Result;
use entidades_configs::ServerConfig;
use entidades_server::lifecycle::{bootstrap, run_for_tests, RunningTestHttpServer};

/// A real HTTP server backed by a throwaway SQLite file.
pub struct HttpTestServer {
    _temp_dir: tempfile::TempDir,
    pub base_url: String,
    pub db_path: std::path::PathBuf,
    running: RunningTestHttpServer,
}

impl HttpTestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn shutdown(self) {
        self.running.shutdown().await;
    }
}

/// Seed a database with `seed_sql`, then start the server on a random port.
pub async fn start_http_test_server(
    seed_sql: &str,
    customize: impl FnOnce(&mut ServerConfig),
) -> Result<HttpTestServer> {
    let temp_dir = tempfile::TempDir::new()?;
    let db_path = temp_dir.path().join("data").join("tienda.db");
    std::fs::create_dir_all(db_path.parent().unwrap())?;

    let conn = rusqlite::Connection::open(&db_path)?;
    conn.execute_batch(seed_sql)?;
    drop(conn);

    let mut config = ServerConfig::default();
    config.server.host = "127.0.0.1".to_string();
    config.database.path = db_path.to_string_lossy().into_owned();
    config.logging.logs_path = temp_dir.path().join("logs").to_string_lossy().into_owned();
    customize(&mut config);
    config.validate()?;

    let components = bootstrap(&config).await?;
    let running = run_for_tests(&config, components).await?;

    Ok(HttpTestServer {
        base_url: running.base_url.clone(),
        _temp_dir: temp_dir,
        db_path,
        running,
    })
}
