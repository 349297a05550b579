use crate::handlers::printers;
use crate::AppState;
use axum::{
    routing::{get, post, put},
    Router,
};

pub fn printer_router() -> Router<AppState> {
    Router::new()
        .route("/", get(printers::list_printers).post(printers::create_printer))
        .route(
            "/:printer_id",
            put(printers::update_printer).delete(printers::delete_printer),
        )
        .route("/:printer_id/filament", post(printers::load_filament))
        .route("/:printer_id/status", get(printers::printer_status))
}
