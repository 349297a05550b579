use crate::config::Settings;
use crate::models::printer::Printer;
use anyhow::{Context, Result};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use std::time::Duration;

pub async fn create_pool(settings: &Settings) -> Result<SqlitePool> {
    // Create connection pool with configuration
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(30))
        .connect(&settings.database_url)
        .await
        .context("Failed to create database connection pool")?;

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;

    seed_defaults(&pool)
        .await
        .context("Failed to seed default data")?;

    Ok(pool)
}

/// Seed the database with a default printer and locations when empty,
/// so a fresh install has something to show in the frontend.
pub async fn seed_defaults(pool: &SqlitePool) -> Result<()> {
    let printers: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM printers")
        .fetch_one(pool)
        .await?;
    if printers == 0 {
        tracing::info!("Seeding database with default printer");
        sqlx::query(
            "INSERT INTO printers (id, name, location, ip_address, websocket_port, http_port, video_port) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind("a1b2c3d4-e5f6-7890-1234-567890abcdef")
        .bind("Elegoo Centauri Alpha")
        .bind("Main Workshop")
        .bind("192.168.1.100")
        .bind(8000)
        .bind(80)
        .bind(8080)
        .execute(pool)
        .await?;
    }

    let locations: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM locations")
        .fetch_one(pool)
        .await?;
    if locations == 0 {
        tracing::info!("Seeding database with default locations");
        for name in ["Main Workshop", "Garage", "Office"] {
            sqlx::query("INSERT INTO locations (name) VALUES (?)")
                .bind(name)
                .execute(pool)
                .await?;
        }
    }

    Ok(())
}

/// Fetch a printer row for the CRUD and proxy handlers.
pub async fn find_printer(pool: &SqlitePool, printer_id: &str) -> sqlx::Result<Option<Printer>> {
    sqlx::query_as::<_, Printer>("SELECT * FROM printers WHERE id = ?")
        .bind(printer_id)
        .fetch_optional(pool)
        .await
}
