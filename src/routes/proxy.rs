use crate::handlers::{proxy, websocket};
use crate::AppState;
use axum::{routing::get, Router};

/// Printer-facing proxy endpoints. These live outside /api because the
/// printer frontend addresses them directly.
pub fn proxy_router() -> Router<AppState> {
    Router::new()
        .route(
            "/printers/:printer_id/websocket",
            get(websocket::printer_websocket),
        )
        .route("/printers/:printer_id/video", get(proxy::video_stream))
        .route(
            "/printers/:printer_id/board-resource/history_image/:filename",
            get(proxy::history_image),
        )
}
