//! Liveness probe

use axum::Json;
use condscan_rule_engine::{RULE_ID, RULE_VERSION};
use serde::{Deserialize, Serialize};

/// Fixed health payload identifying the rule this service implements
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub rule: String,
    pub version: String,
}

impl HealthResponse {
    pub fn current() -> Self {
        Self {
            ok: true,
            rule: RULE_ID.to_string(),
            version: RULE_VERSION.to_string(),
        }
    }
}

/// `GET /health`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::current())
}
