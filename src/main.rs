use anyhow::Context;
use printfarm::{config::Settings, create_app, db, AppState};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "printfarm=info,tower_http=debug".into()),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    // Load configuration
    let settings = Settings::load().context("Failed to load application settings")?;
    let addr = settings.socket_addr().context("Invalid bind address")?;

    // Create the database pool, run migrations and seed defaults
    let db_pool = db::create_pool(&settings)
        .await
        .context("Failed to set up the database")?;

    let state = AppState::new(db_pool, settings)?;
    let app = create_app(state).await;

    info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
