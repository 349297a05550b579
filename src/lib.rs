use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::Router;
use sqlx::SqlitePool;
use tower_http::services::{ServeDir, ServeFile};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod mjpeg;
pub mod models;
pub mod openapi;
pub mod routes;

#[derive(Clone)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub config: config::Settings,
    pub http_client: reqwest::Client,
}

impl AppState {
    pub fn new(db_pool: SqlitePool, config: config::Settings) -> Result<Self> {
        // One shared client for all printer-facing requests. Streaming
        // responses must not carry a total request timeout, so only the
        // connect phase is bounded here.
        let http_client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()
            .context("Failed to build upstream HTTP client")?;

        Ok(Self {
            db_pool,
            config,
            http_client,
        })
    }
}

/// Create the main Axum application router
pub async fn create_app(state: AppState) -> Router {
    // Register API documentation
    let openapi = openapi::ApiDoc::openapi();
    let static_dir = PathBuf::from(&state.config.static_dir);

    let app = Router::new()
        .nest("/api", routes::api::api_router())
        // Printer proxy endpoints (websocket, video, images)
        .merge(routes::proxy::proxy_router())
        // Health and monitoring endpoints
        .merge(routes::health::health_router())
        // Serve Swagger UI
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", openapi))
        .with_state(state);

    // Everything unmatched falls through to the frontend bundle.
    let app = if static_dir.is_dir() {
        tracing::info!("Frontend found in '{}'. Serving at '/'.", static_dir.display());
        let index = static_dir.join("index.html");
        app.fallback_service(ServeDir::new(&static_dir).not_found_service(ServeFile::new(index)))
    } else {
        tracing::warn!(
            "'{}' directory not found. Frontend will not be served.",
            static_dir.display()
        );
        app.fallback(handlers::frontend::root_fallback)
    };

    app.layer(tower_http::trace::TraceLayer::new_for_http())
        .layer(tower_http::cors::CorsLayer::permissive())
}
