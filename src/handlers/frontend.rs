use axum::Json;
use serde_json::{json, Value};

/// Fallback for installs without a frontend bundle.
pub async fn root_fallback() -> Json<Value> {
    Json(json!({
        "message": "3D Print Farm Manager Backend is running. Frontend not found in 'static' directory."
    }))
}
