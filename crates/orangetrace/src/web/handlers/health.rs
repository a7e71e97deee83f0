use axum::Json;
use serde_json::{json, Value};

/// Liveness probe.
///
/// ```text
/// GET /health  →  {"status": "ok"}
/// ```
pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
