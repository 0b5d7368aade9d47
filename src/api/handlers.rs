//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::{Json, Response},
};
use futures::{SinkExt, StreamExt};
use tracing::{debug, info, warn};

use crate::{state::AppState, worker::spawn_worker};
use super::responses::HealthResponse;

/// Handle GET /worker - Upgrade to a WebSocket backed by a fresh worker
pub async fn worker_socket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> Response {
    ws.on_upgrade(move |socket| serve_worker_socket(socket, state))
}

/// Relay frames between one WebSocket and its own countdown worker
async fn serve_worker_socket(socket: WebSocket, state: Arc<AppState>) {
    let active = state.connection_opened();
    info!("Worker connection opened ({} active)", active);

    let (mut sender, mut receiver) = socket.split();
    let (handle, mut notifications) = spawn_worker(state.worker_config.clone());

    loop {
        tokio::select! {
            frame = receiver.next() => {
                match frame {
                    Some(Ok(Message::Text(text))) => {
                        debug!("Received frame: {}", text);
                        if let Err(e) = handle.post_message(&text) {
                            warn!("Dropping malformed frame {:?}: {}", text, e);
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        warn!("WebSocket receive error: {}", e);
                        break;
                    }
                }
            }
            Some(notification) = notifications.recv() => {
                if let Err(e) = sender.send(Message::Text(notification.encode())).await {
                    warn!("Failed to send {} notification: {}", notification, e);
                    break;
                }
            }
        }
    }

    handle.terminate();
    let active = state.connection_closed();
    info!("Worker connection closed ({} active)", active);
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse::ok(&state))
}
