//! Server log setup.
//!
//! Library crates log through the `log` facade; the binary routes those
//! records into `tracing-subscriber` layers configured from `[logging]`.

use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::path::Path;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Log format type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Compact text format: timestamp LEVEL target - message
    Compact,
    /// JSON Lines format for structured logging
    Json,
}

impl LogFormat {
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" | "jsonl" => LogFormat::Json,
            _ => LogFormat::Compact,
        }
    }
}

/// Crates of this workspace; they always log at the configured level.
const WORKSPACE_TARGETS: [&str; 4] =
    ["entidades_server", "entidades_api", "entidades_store", "entidades_configs"];

/// Third-party targets held at `warn` unless the whole server runs at `trace`.
const QUIET_TARGETS: [&str; 4] = ["actix_server", "h2", "mio", "rusqlite"];

/// Filter directives in precedence order: base level, workspace crates,
/// quieted dependencies, then per-target overrides from `[logging.targets]`.
fn filter_directives(level: &str, target_levels: Option<&HashMap<String, String>>) -> Vec<String> {
    let mut directives = vec![level.to_string()];
    directives.extend(WORKSPACE_TARGETS.iter().map(|t| format!("{}={}", t, level)));
    if level != "trace" {
        directives.extend(QUIET_TARGETS.iter().map(|t| format!("{}=warn", t)));
    }

    if let Some(map) = target_levels {
        let mut overrides: Vec<_> = map.iter().collect();
        overrides.sort();
        directives.extend(overrides.into_iter().map(|(t, l)| format!("{}={}", t, l)));
    }
    directives
}

fn build_env_filter(
    level: &str,
    target_levels: Option<&HashMap<String, String>>,
) -> anyhow::Result<EnvFilter> {
    let filter_str = filter_directives(level, target_levels).join(",");
    EnvFilter::try_new(&filter_str)
        .map_err(|e| anyhow::anyhow!("Invalid log filter '{}': {}", filter_str, e))
}

fn open_log_file(file_path: &str) -> anyhow::Result<File> {
    if let Some(parent) = Path::new(file_path).parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(file_path)
        .map_err(|e| anyhow::anyhow!("Cannot open log file {}: {}", file_path, e))
}

/// Install the global subscriber: an optional colored console layer plus a
/// file layer in compact text or JSON lines. `log::*` records from the
/// library crates reach both through the `LogTracer` bridge.
pub fn init_logging(
    level: &str,
    file_path: &str,
    log_to_console: bool,
    target_levels: Option<&HashMap<String, String>>,
    format: &str,
) -> anyhow::Result<()> {
    let log_file = open_log_file(file_path)?;
    let filter = || build_env_filter(level, target_levels);

    // Already installed when a test harness initialized logging first
    tracing_log::LogTracer::init().ok();

    let console_layer = if log_to_console {
        Some(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_filter(filter()?),
        )
    } else {
        None
    };

    let file_layer = match LogFormat::parse(format) {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_writer(log_file)
            .with_current_span(false)
            .with_filter(filter()?)
            .boxed(),
        LogFormat::Compact => tracing_subscriber::fmt::layer()
            .compact()
            .with_ansi(false)
            .with_writer(log_file)
            .with_filter(filter()?)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {}", e))?;

    log::debug!("Logging to {} (level={}, format={})", file_path, level, format);
    Ok(())
}
