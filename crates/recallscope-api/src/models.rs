//! Inbound API request and response models

use recallscope_core::FilterState;
use serde::{Deserialize, Serialize};

/// Body of `POST /api/search`. Both fields are optional: no text means
/// match-everything, no filters means an unfiltered result set.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchApiRequest {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub filters: FilterState,
}

/// Query parameters of `GET /api/graph`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GraphDataParams {
    pub id: Option<String>,
}

/// Generic error body. Internal error detail is logged, never leaked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: &str) -> Self {
        Self {
            error: message.to_string(),
        }
    }
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
}
