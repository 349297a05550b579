mod common;

use axum::{
    body::Body,
    extract::ws::{Message, WebSocket, WebSocketUpgrade},
    http::{header, Request, StatusCode},
    response::IntoResponse,
    routing::get,
    Router,
};
use futures_util::{SinkExt, StreamExt};
use http_body_util::BodyExt;
use serde_json::json;
use tower::ServiceExt;

/// A minimal JPEG: start marker, payload, end marker.
fn jpeg_frame(payload: &[u8]) -> Vec<u8> {
    let mut frame = vec![0xFF, 0xD8];
    frame.extend_from_slice(payload);
    frame.extend_from_slice(&[0xFF, 0xD9]);
    frame
}

async fn register_printer(app: &Router, video_port: u16, http_port: u16) -> String {
    let mut payload = common::printer_payload("Stub Printer", "Test Lab");
    payload["video_port"] = json!(video_port);
    payload["http_port"] = json!(http_port);
    let (status, printer) = common::send(app, "POST", "/api/printers", Some(payload)).await;
    assert_eq!(status, StatusCode::CREATED);
    printer["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn history_image_is_proxied_with_content_type() {
    let app = common::test_app().await;

    let stub = Router::new().route(
        "/board-resource/history_image/:filename",
        get(|| async { ([(header::CONTENT_TYPE, "image/png")], &b"PNGDATA"[..]) }),
    );
    let addr = common::serve_on_ephemeral_port(stub).await;
    let id = register_printer(&app, 1, addr.port()).await;

    let request = Request::builder()
        .uri(format!(
            "/printers/{id}/board-resource/history_image/task-1.png"
        ))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "image/png"
    );
    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&body[..], b"PNGDATA");
}

#[tokio::test]
async fn history_image_for_unknown_printer_is_404() {
    let app = common::test_app().await;

    let request = Request::builder()
        .uri("/printers/missing/board-resource/history_image/task-1.png")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn history_image_with_unreachable_printer_is_502() {
    let app = common::test_app().await;

    let port = common::unreachable_port().await;
    let id = register_printer(&app, 1, port).await;

    let request = Request::builder()
        .uri(format!(
            "/printers/{id}/board-resource/history_image/task-1.png"
        ))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn video_stream_is_reframed_as_mjpeg() {
    let app = common::test_app().await;

    // The stub emits two frames with multipart noise in between; the
    // proxy should regroup them on its own boundary.
    let mut raw = b"--upstream\r\n\r\n".to_vec();
    raw.extend_from_slice(&jpeg_frame(b"frame-one"));
    raw.extend_from_slice(b"\r\n--upstream\r\n\r\n");
    raw.extend_from_slice(&jpeg_frame(b"frame-two"));

    let stub = Router::new().route(
        "/video",
        get(move || {
            let raw = raw.clone();
            async move {
                (
                    [(header::CONTENT_TYPE, "multipart/x-mixed-replace; boundary=upstream")],
                    raw,
                )
            }
        }),
    );
    let addr = common::serve_on_ephemeral_port(stub).await;
    let id = register_printer(&app, addr.port(), 1).await;

    let request = Request::builder()
        .uri(format!("/printers/{id}/video"))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "multipart/x-mixed-replace; boundary=foo"
    );
    assert_eq!(
        response.headers().get(header::CACHE_CONTROL).unwrap(),
        "no-cache, no-store, must-revalidate"
    );

    // The upstream body is finite, so the relayed stream ends too.
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let text = String::from_utf8_lossy(&body);
    assert_eq!(text.matches("--foo\r\nContent-Type: image/jpeg").count(), 2);
    assert!(text.contains("frame-one"));
    assert!(text.contains("frame-two"));
    assert!(!text.contains("--upstream"));
}

#[tokio::test]
async fn video_stream_with_unreachable_printer_is_502() {
    let app = common::test_app().await;

    let port = common::unreachable_port().await;
    let id = register_printer(&app, port, 1).await;

    let request = Request::builder()
        .uri(format!("/printers/{id}/video"))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

async fn ws_echo(ws: WebSocketUpgrade) -> impl IntoResponse {
    ws.on_upgrade(|mut socket: WebSocket| async move {
        while let Some(Ok(message)) = socket.recv().await {
            if let Message::Text(text) = message {
                if socket.send(Message::Text(text)).await.is_err() {
                    break;
                }
            }
        }
    })
}

#[tokio::test]
async fn websocket_relay_round_trips_text() {
    let app = common::test_app().await;

    // Stub printer speaking the /websocket control protocol.
    let stub = Router::new().route("/websocket", get(ws_echo));
    let printer_addr = common::serve_on_ephemeral_port(stub).await;

    let mut payload = common::printer_payload("WS Printer", "Test Lab");
    payload["websocket_port"] = json!(printer_addr.port());
    let (_, printer) = common::send(&app, "POST", "/api/printers", Some(payload)).await;
    let id = printer["id"].as_str().unwrap().to_string();

    // Run the app on a real listener; websockets need a live connection.
    let app_addr = common::serve_on_ephemeral_port(app).await;
    let url = format!("ws://{app_addr}/printers/{id}/websocket");
    let (mut socket, _) = tokio_tungstenite::connect_async(&url)
        .await
        .expect("websocket upgrade");

    socket
        .send(tokio_tungstenite::tungstenite::Message::Text(
            "M105".to_string(),
        ))
        .await
        .expect("send");
    let reply = socket.next().await.expect("reply").expect("frame");
    assert_eq!(
        reply,
        tokio_tungstenite::tungstenite::Message::Text("M105".to_string())
    );
}

#[tokio::test]
async fn websocket_for_unknown_printer_is_404() {
    let app = common::test_app().await;

    let app_addr = common::serve_on_ephemeral_port(app).await;
    let url = format!("ws://{app_addr}/printers/missing/websocket");
    let err = tokio_tungstenite::connect_async(&url).await.unwrap_err();

    match err {
        tokio_tungstenite::tungstenite::Error::Http(response) => {
            assert_eq!(response.status(), StatusCode::NOT_FOUND);
        }
        other => panic!("expected HTTP error, got {other:?}"),
    }
}
