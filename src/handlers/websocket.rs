use axum::{
    extract::{
        ws::{close_code, CloseFrame, Message, WebSocket, WebSocketUpgrade},
        Path, State,
    },
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use tokio_tungstenite::{connect_async, tungstenite};

use crate::{db, error::AppError, AppState};

/// Bidirectional relay between a browser and a printer's control websocket.
/// The printer is looked up before the upgrade completes, so unknown ids
/// answer with a plain 404 instead of a half-open socket.
pub async fn printer_websocket(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
    Path(printer_id): Path<String>,
) -> Result<Response, AppError> {
    let printer = db::find_printer(&state.db_pool, &printer_id)
        .await?
        .ok_or(AppError::NotFound("Printer"))?;

    let target_url = format!(
        "ws://{}:{}/websocket",
        printer.ip_address, printer.websocket_port
    );
    Ok(ws.on_upgrade(move |socket| relay(socket, target_url)))
}

async fn relay(client: WebSocket, target_url: String) {
    let upstream = match connect_async(&target_url).await {
        Ok((socket, _)) => socket,
        Err(e) => {
            tracing::warn!("could not reach printer websocket at {}: {}", target_url, e);
            let mut client = client;
            let _ = client
                .send(Message::Close(Some(CloseFrame {
                    code: close_code::ERROR,
                    reason: "printer unreachable".into(),
                })))
                .await;
            return;
        }
    };
    tracing::info!("connected to printer websocket at {}", target_url);

    let (mut printer_tx, mut printer_rx) = upstream.split();
    let (mut client_tx, mut client_rx) = client.split();

    let to_printer = async {
        while let Some(Ok(message)) = client_rx.next().await {
            let forward = match message {
                Message::Text(text) => tungstenite::Message::Text(text),
                Message::Binary(data) => tungstenite::Message::Binary(data),
                Message::Close(_) => break,
                // Ping/pong is handled per hop.
                _ => continue,
            };
            if printer_tx.send(forward).await.is_err() {
                break;
            }
        }
    };

    let to_client = async {
        while let Some(Ok(message)) = printer_rx.next().await {
            let forward = match message {
                tungstenite::Message::Text(text) => Message::Text(text),
                tungstenite::Message::Binary(data) => Message::Binary(data),
                tungstenite::Message::Close(_) => break,
                _ => continue,
            };
            if client_tx.send(forward).await.is_err() {
                break;
            }
        }
    };

    // Either direction closing tears the relay down.
    tokio::select! {
        _ = to_printer => {}
        _ = to_client => {}
    }
    tracing::debug!("websocket relay to {} closed", target_url);
}
