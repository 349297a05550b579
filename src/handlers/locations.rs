use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use validator::Validate;

use crate::{error::AppError, models::location::CreateLocationRequest, AppState};

/// List all location names
#[utoipa::path(
    get,
    path = "/api/locations",
    tag = "locations",
    responses(
        (status = 200, description = "List of location names", body = Vec<String>)
    )
)]
pub async fn list_locations(State(state): State<AppState>) -> Result<Json<Vec<String>>, AppError> {
    let names: Vec<String> = sqlx::query_scalar("SELECT name FROM locations")
        .fetch_all(&state.db_pool)
        .await?;
    Ok(Json(names))
}

/// Create a location
#[utoipa::path(
    post,
    path = "/api/locations",
    tag = "locations",
    request_body = CreateLocationRequest,
    responses(
        (status = 201, description = "Location created"),
        (status = 409, description = "Location already exists")
    )
)]
pub async fn create_location(
    State(state): State<AppState>,
    Json(req): Json<CreateLocationRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    req.validate()?;

    match sqlx::query("INSERT INTO locations (name) VALUES (?)")
        .bind(&req.name)
        .execute(&state.db_pool)
        .await
    {
        Ok(_) => Ok((
            StatusCode::CREATED,
            Json(json!({ "message": "Location created successfully" })),
        )),
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
            Err(AppError::Conflict("Location already exists".to_string()))
        }
        Err(e) => Err(e.into()),
    }
}

/// Remove a location
#[utoipa::path(
    delete,
    path = "/api/locations/{name}",
    tag = "locations",
    params(("name" = String, Path, description = "Location name")),
    responses(
        (status = 204, description = "Location deleted"),
        (status = 400, description = "Location is still in use by a printer"),
        (status = 404, description = "Location not found")
    )
)]
pub async fn delete_location(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<StatusCode, AppError> {
    let in_use: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM printers WHERE location = ?")
        .bind(&name)
        .fetch_one(&state.db_pool)
        .await?;
    if in_use > 0 {
        return Err(AppError::BadRequest(
            "Cannot delete location as it is currently in use by a printer".to_string(),
        ));
    }

    let result = sqlx::query("DELETE FROM locations WHERE name = ?")
        .bind(&name)
        .execute(&state.db_pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Location"));
    }
    Ok(StatusCode::NO_CONTENT)
}
