use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::time::Duration;
use uuid::Uuid;
use validator::Validate;

use crate::{
    db,
    error::AppError,
    models::printer::{LoadFilamentRequest, Printer, PrinterPayload, PrinterStatus},
    AppState,
};

/// List all printers
#[utoipa::path(
    get,
    path = "/api/printers",
    tag = "printers",
    responses(
        (status = 200, description = "List of printers", body = Vec<Printer>)
    )
)]
pub async fn list_printers(State(state): State<AppState>) -> Result<Json<Vec<Printer>>, AppError> {
    let printers = sqlx::query_as::<_, Printer>("SELECT * FROM printers")
        .fetch_all(&state.db_pool)
        .await?;
    Ok(Json(printers))
}

/// Register a new printer
#[utoipa::path(
    post,
    path = "/api/printers",
    tag = "printers",
    request_body = PrinterPayload,
    responses(
        (status = 201, description = "Printer created", body = Printer),
        (status = 400, description = "Validation failed")
    )
)]
pub async fn create_printer(
    State(state): State<AppState>,
    Json(req): Json<PrinterPayload>,
) -> Result<(StatusCode, Json<Printer>), AppError> {
    req.validate()?;

    let id = Uuid::new_v4().to_string();
    sqlx::query(
        "INSERT INTO printers (id, name, location, ip_address, websocket_port, http_port, video_port) \
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&id)
    .bind(&req.name)
    .bind(&req.location)
    .bind(&req.ip_address)
    .bind(req.websocket_port)
    .bind(req.http_port)
    .bind(req.video_port)
    .execute(&state.db_pool)
    .await?;

    let printer = Printer {
        id,
        name: req.name,
        location: req.location,
        ip_address: req.ip_address,
        websocket_port: req.websocket_port,
        http_port: req.http_port,
        video_port: req.video_port,
        current_filament_id: None,
    };
    Ok((StatusCode::CREATED, Json(printer)))
}

/// Update a printer
#[utoipa::path(
    put,
    path = "/api/printers/{printer_id}",
    tag = "printers",
    params(("printer_id" = String, Path, description = "Printer ID")),
    request_body = PrinterPayload,
    responses(
        (status = 200, description = "Printer updated", body = Printer),
        (status = 404, description = "Printer not found")
    )
)]
pub async fn update_printer(
    State(state): State<AppState>,
    Path(printer_id): Path<String>,
    Json(req): Json<PrinterPayload>,
) -> Result<Json<Printer>, AppError> {
    req.validate()?;

    let result = sqlx::query(
        "UPDATE printers SET name = ?, location = ?, ip_address = ?, \
         websocket_port = ?, http_port = ?, video_port = ? WHERE id = ?",
    )
    .bind(&req.name)
    .bind(&req.location)
    .bind(&req.ip_address)
    .bind(req.websocket_port)
    .bind(req.http_port)
    .bind(req.video_port)
    .bind(&printer_id)
    .execute(&state.db_pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Printer"));
    }

    // Re-read so the loaded filament is reported as stored.
    let printer = sqlx::query_as::<_, Printer>("SELECT * FROM printers WHERE id = ?")
        .bind(&printer_id)
        .fetch_one(&state.db_pool)
        .await?;
    Ok(Json(printer))
}

/// Remove a printer
#[utoipa::path(
    delete,
    path = "/api/printers/{printer_id}",
    tag = "printers",
    params(("printer_id" = String, Path, description = "Printer ID")),
    responses(
        (status = 204, description = "Printer deleted"),
        (status = 404, description = "Printer not found")
    )
)]
pub async fn delete_printer(
    State(state): State<AppState>,
    Path(printer_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let result = sqlx::query("DELETE FROM printers WHERE id = ?")
        .bind(&printer_id)
        .execute(&state.db_pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Printer"));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// Load a filament spool into a printer (or unload with a null id)
#[utoipa::path(
    post,
    path = "/api/printers/{printer_id}/filament",
    tag = "printers",
    params(("printer_id" = String, Path, description = "Printer ID")),
    request_body = LoadFilamentRequest,
    responses(
        (status = 204, description = "Filament assignment updated"),
        (status = 404, description = "Printer or filament not found")
    )
)]
pub async fn load_filament(
    State(state): State<AppState>,
    Path(printer_id): Path<String>,
    Json(req): Json<LoadFilamentRequest>,
) -> Result<StatusCode, AppError> {
    if db::find_printer(&state.db_pool, &printer_id).await?.is_none() {
        return Err(AppError::NotFound("Printer"));
    }

    if let Some(filament_id) = &req.filament_id {
        let known: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM filaments WHERE id = ?")
            .bind(filament_id)
            .fetch_one(&state.db_pool)
            .await?;
        if known == 0 {
            return Err(AppError::NotFound("Filament"));
        }
    }

    sqlx::query("UPDATE printers SET current_filament_id = ? WHERE id = ?")
        .bind(&req.filament_id)
        .bind(&printer_id)
        .execute(&state.db_pool)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Probe whether a printer answers on its HTTP port
#[utoipa::path(
    get,
    path = "/api/printers/{printer_id}/status",
    tag = "printers",
    params(("printer_id" = String, Path, description = "Printer ID")),
    responses(
        (status = 200, description = "Reachability of the printer", body = PrinterStatus),
        (status = 404, description = "Printer not found")
    )
)]
pub async fn printer_status(
    State(state): State<AppState>,
    Path(printer_id): Path<String>,
) -> Result<Json<PrinterStatus>, AppError> {
    let printer = db::find_printer(&state.db_pool, &printer_id)
        .await?
        .ok_or(AppError::NotFound("Printer"))?;

    // Any response counts as online; only transport failures are offline.
    let url = format!("http://{}:{}/", printer.ip_address, printer.http_port);
    let online = state
        .http_client
        .get(&url)
        .timeout(Duration::from_secs(state.config.probe_timeout_secs))
        .send()
        .await
        .is_ok();

    Ok(Json(PrinterStatus { online }))
}
