//! Bootstrap behavior for different database settings.

use entidades_configs::ServerConfig;
use entidades_server::lifecycle::{bootstrap, build_connection_manager};

#[actix_rt::test]
async fn test_bootstrap_creates_missing_database() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("nested").join("nuevo.db");

    let mut config = ServerConfig::default();
    config.database.path = path.to_string_lossy().into_owned();

    let components = bootstrap(&config).await.expect("bootstrap");
    assert!(path.exists());
    assert!(components.connections.describe().contains("nuevo.db"));
}

#[actix_rt::test]
async fn test_bootstrap_fails_when_database_must_exist() {
    let dir = tempfile::TempDir::new().unwrap();

    let mut config = ServerConfig::default();
    config.database.path = dir.path().join("ausente.db").to_string_lossy().into_owned();
    config.database.create_if_missing = false;

    let err = bootstrap(&config).await.err().expect("bootstrap must fail");
    assert!(err.to_string().contains("Cannot open database"));
}

#[test]
fn test_connection_manager_follows_config() {
    let mut config = ServerConfig::default();
    config.database.path = "/tmp/entidades-test.db".to_string();
    let manager = build_connection_manager(&config);
    assert_eq!(manager.path().to_string_lossy(), "/tmp/entidades-test.db");
}
