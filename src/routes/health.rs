use crate::handlers::health;
use crate::AppState;
use axum::{routing::get, Router};

pub fn health_router() -> Router<AppState> {
    Router::new().route("/health", get(health::check))
}
