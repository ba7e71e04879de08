// Default value functions

pub fn default_host() -> String {
    "127.0.0.1".to_string()
}

pub fn default_port() -> u16 {
    8080
}

pub fn default_workers() -> usize {
    0 // 0 = one worker per CPU
}

pub fn default_enable_http2() -> bool {
    false
}

pub fn default_true() -> bool {
    true
}

pub fn default_database_path() -> String {
    "./data/entidades.db".to_string() // Normalized to absolute at runtime
}

pub fn default_busy_timeout_ms() -> u64 {
    5000
}

pub fn default_log_level() -> String {
    "info".to_string()
}

pub fn default_log_format() -> String {
    "compact".to_string()
}

pub fn default_logs_path() -> String {
    "./logs".to_string()
}

pub fn default_shutdown_timeout_seconds() -> u64 {
    30
}

pub fn default_cors_methods() -> Vec<String> {
    vec!["GET".to_string(), "OPTIONS".to_string()]
}

pub fn default_cors_headers() -> Vec<String> {
    vec![
        "Authorization".to_string(),
        "Content-Type".to_string(),
        "Accept".to_string(),
        "Origin".to_string(),
    ]
}

pub fn default_cors_max_age() -> u64 {
    3600 // 1 hour
}
