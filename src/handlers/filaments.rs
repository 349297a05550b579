use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::AppError,
    models::filament::{Filament, FilamentPayload},
    AppState,
};

/// List all filament spools
#[utoipa::path(
    get,
    path = "/api/filaments",
    tag = "filaments",
    responses(
        (status = 200, description = "List of filaments", body = Vec<Filament>)
    )
)]
pub async fn list_filaments(State(state): State<AppState>) -> Result<Json<Vec<Filament>>, AppError> {
    let filaments = sqlx::query_as::<_, Filament>("SELECT * FROM filaments")
        .fetch_all(&state.db_pool)
        .await?;
    Ok(Json(filaments))
}

/// Register a new filament spool
#[utoipa::path(
    post,
    path = "/api/filaments",
    tag = "filaments",
    request_body = FilamentPayload,
    responses(
        (status = 201, description = "Filament created", body = Filament),
        (status = 400, description = "Validation failed")
    )
)]
pub async fn create_filament(
    State(state): State<AppState>,
    Json(req): Json<FilamentPayload>,
) -> Result<(StatusCode, Json<Filament>), AppError> {
    req.validate()?;

    let id = Uuid::new_v4().to_string();
    sqlx::query(
        "INSERT INTO filaments (id, name, material, color, manufacturer, purchase_price, \
         spool_weight_grams, remaining_weight_grams) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&id)
    .bind(&req.name)
    .bind(&req.material)
    .bind(&req.color)
    .bind(&req.manufacturer)
    .bind(req.purchase_price)
    .bind(req.spool_weight_grams)
    .bind(req.remaining_weight_grams)
    .execute(&state.db_pool)
    .await?;

    let filament = Filament {
        id,
        name: req.name,
        material: req.material,
        color: req.color,
        manufacturer: req.manufacturer,
        purchase_price: req.purchase_price,
        spool_weight_grams: req.spool_weight_grams,
        remaining_weight_grams: req.remaining_weight_grams,
    };
    Ok((StatusCode::CREATED, Json(filament)))
}

/// Update a filament spool
#[utoipa::path(
    put,
    path = "/api/filaments/{filament_id}",
    tag = "filaments",
    params(("filament_id" = String, Path, description = "Filament ID")),
    request_body = FilamentPayload,
    responses(
        (status = 200, description = "Filament updated", body = Filament),
        (status = 404, description = "Filament not found")
    )
)]
pub async fn update_filament(
    State(state): State<AppState>,
    Path(filament_id): Path<String>,
    Json(req): Json<FilamentPayload>,
) -> Result<Json<Filament>, AppError> {
    req.validate()?;

    let result = sqlx::query(
        "UPDATE filaments SET name = ?, material = ?, color = ?, manufacturer = ?, \
         purchase_price = ?, spool_weight_grams = ?, remaining_weight_grams = ? WHERE id = ?",
    )
    .bind(&req.name)
    .bind(&req.material)
    .bind(&req.color)
    .bind(&req.manufacturer)
    .bind(req.purchase_price)
    .bind(req.spool_weight_grams)
    .bind(req.remaining_weight_grams)
    .bind(&filament_id)
    .execute(&state.db_pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Filament"));
    }

    let filament = Filament {
        id: filament_id,
        name: req.name,
        material: req.material,
        color: req.color,
        manufacturer: req.manufacturer,
        purchase_price: req.purchase_price,
        spool_weight_grams: req.spool_weight_grams,
        remaining_weight_grams: req.remaining_weight_grams,
    };
    Ok(Json(filament))
}

/// Remove a filament spool
#[utoipa::path(
    delete,
    path = "/api/filaments/{filament_id}",
    tag = "filaments",
    params(("filament_id" = String, Path, description = "Filament ID")),
    responses(
        (status = 204, description = "Filament deleted"),
        (status = 400, description = "Filament is loaded in a printer"),
        (status = 404, description = "Filament not found")
    )
)]
pub async fn delete_filament(
    State(state): State<AppState>,
    Path(filament_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let loaded: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM printers WHERE current_filament_id = ?")
            .bind(&filament_id)
            .fetch_one(&state.db_pool)
            .await?;
    if loaded > 0 {
        return Err(AppError::BadRequest(
            "Cannot delete filament as it is currently loaded in a printer".to_string(),
        ));
    }

    let result = sqlx::query("DELETE FROM filaments WHERE id = ?")
        .bind(&filament_id)
        .execute(&state.db_pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Filament"));
    }
    Ok(StatusCode::NO_CONTENT)
}
