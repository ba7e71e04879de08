use serde::{Deserialize, Serialize};

/// Body of the health probes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl HealthResponse {
    pub fn ok_with_version(version: &str) -> Self {
        Self {
            status: "ok".to_string(),
            version: Some(version.to_string()),
            error: None,
        }
    }

    pub fn ready() -> Self {
        Self {
            status: "ready".to_string(),
            version: None,
            error: None,
        }
    }

    pub fn unavailable(error: impl Into<String>) -> Self {
        Self {
            status: "unavailable".to_string(),
            version: None,
            error: Some(error.into()),
        }
    }
}
