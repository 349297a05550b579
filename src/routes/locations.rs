use crate::handlers::locations;
use crate::AppState;
use axum::{
    routing::{delete, get},
    Router,
};

pub fn location_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(locations::list_locations).post(locations::create_location),
        )
        .route("/:name", delete(locations::delete_location))
}
