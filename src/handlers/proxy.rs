use axum::{
    body::Body,
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use futures_util::StreamExt;
use std::time::Duration;
use tokio_stream::wrappers::ReceiverStream;

use crate::{db, error::AppError, mjpeg, models::printer::Printer, AppState};

async fn lookup_printer(state: &AppState, printer_id: &str) -> Result<Printer, AppError> {
    db::find_printer(&state.db_pool, printer_id)
        .await?
        .ok_or(AppError::NotFound("Printer"))
}

/// Relay a printer's camera feed as a clean MJPEG stream
#[utoipa::path(
    get,
    path = "/printers/{printer_id}/video",
    tag = "proxy",
    params(("printer_id" = String, Path, description = "Printer ID")),
    responses(
        (status = 200, description = "MJPEG stream (multipart/x-mixed-replace)"),
        (status = 404, description = "Printer not found"),
        (status = 502, description = "Printer stream unreachable")
    )
)]
pub async fn video_stream(
    State(state): State<AppState>,
    Path(printer_id): Path<String>,
) -> Result<Response, AppError> {
    let printer = lookup_printer(&state, &printer_id).await?;
    let target_url = format!("http://{}:{}/video", printer.ip_address, printer.video_port);

    let upstream = state
        .http_client
        .get(&target_url)
        .send()
        .await
        .map_err(|e| AppError::Upstream(e.to_string()))?
        .error_for_status()
        .map_err(|e| AppError::Upstream(e.to_string()))?;

    tracing::info!("relaying printer video stream from {}", target_url);

    let (tx, rx) = tokio::sync::mpsc::channel::<Result<Bytes, std::io::Error>>(16);
    tokio::spawn(async move {
        let mut extractor = mjpeg::FrameExtractor::new();
        let mut chunks = upstream.bytes_stream();
        while let Some(chunk) = chunks.next().await {
            let chunk = match chunk {
                Ok(chunk) => chunk,
                Err(e) => {
                    tracing::debug!("printer stream at {} ended: {}", target_url, e);
                    break;
                }
            };
            for frame in extractor.push(&chunk) {
                if tx.send(Ok(mjpeg::encode_part(&frame))).await.is_err() {
                    // Client went away.
                    return;
                }
            }
        }
    });

    let headers = [
        (header::CONTENT_TYPE, mjpeg::content_type()),
        (
            header::CACHE_CONTROL,
            "no-cache, no-store, must-revalidate".to_string(),
        ),
        (header::PRAGMA, "no-cache".to_string()),
        (header::EXPIRES, "0".to_string()),
        (header::CONNECTION, "keep-alive".to_string()),
    ];
    let body = Body::from_stream(ReceiverStream::new(rx));
    Ok((headers, body).into_response())
}

/// Fetch a print-history thumbnail from the printer's board interface
#[utoipa::path(
    get,
    path = "/printers/{printer_id}/board-resource/history_image/{filename}",
    tag = "proxy",
    params(
        ("printer_id" = String, Path, description = "Printer ID"),
        ("filename" = String, Path, description = "Thumbnail filename, e.g. {task_id}.png")
    ),
    responses(
        (status = 200, description = "Thumbnail bytes with the upstream content type"),
        (status = 404, description = "Printer not found"),
        (status = 502, description = "Printer unreachable")
    )
)]
pub async fn history_image(
    State(state): State<AppState>,
    Path((printer_id, filename)): Path<(String, String)>,
) -> Result<Response, AppError> {
    let printer = lookup_printer(&state, &printer_id).await?;
    let target_url = format!(
        "http://{}:{}/board-resource/history_image/{}",
        printer.ip_address, printer.http_port, filename
    );

    // Buffer the whole file before answering; printer connections are too
    // flaky to stream small static files through.
    let upstream = state
        .http_client
        .get(&target_url)
        .timeout(Duration::from_secs(state.config.upstream_timeout_secs))
        .send()
        .await
        .map_err(|e| AppError::Upstream(e.to_string()))?
        .error_for_status()
        .map_err(|e| AppError::Upstream(e.to_string()))?;

    let content_type = upstream
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("application/octet-stream")
        .to_string();
    let body = upstream
        .bytes()
        .await
        .map_err(|e| AppError::Upstream(e.to_string()))?;

    Ok(([(header::CONTENT_TYPE, content_type)], body).into_response())
}
