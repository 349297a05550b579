use crate::AppState;
use axum::Router;

pub fn api_router() -> Router<AppState> {
    Router::new()
        // Mount printer routes under /printers prefix
        .nest("/printers", super::printers::printer_router())
        // Mount location routes under /locations prefix
        .nest("/locations", super::locations::location_router())
        // Mount filament routes under /filaments prefix
        .nest("/filaments", super::filaments::filament_router())
}
