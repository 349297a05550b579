use crate::handlers::filaments;
use crate::AppState;
use axum::{
    routing::{get, put},
    Router,
};

pub fn filament_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(filaments::list_filaments).post(filaments::create_filament),
        )
        .route(
            "/:filament_id",
            put(filaments::update_filament).delete(filaments::delete_filament),
        )
}
