//! WebSocket Handler - 收听者连接
//!
//! 出站：转发广播事件；入站：start_radio / stop_radio / song_ended

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;

use crate::application::RadioOrchestrator;
use crate::infrastructure::events::ClientSignal;
use crate::infrastructure::http::state::AppState;

/// 收听者 WebSocket 连接处理
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_listener_socket(socket, state))
}

async fn handle_listener_socket(socket: WebSocket, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();

    // 注册事件接收器
    let (listener_id, mut event_rx) = state.event_publisher.register_listener();

    tracing::info!(
        listener_id = %listener_id,
        listeners = state.event_publisher.listener_count(),
        "Listener connected"
    );

    // 事件转发任务
    let mut forward_task = tokio::spawn(async move {
        loop {
            let event = match event_rx.recv().await {
                Ok(event) => event,
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(listener_id = %listener_id, skipped, "Listener lagging, events dropped");
                    continue;
                }
                Err(RecvError::Closed) => break,
            };

            let msg = match serde_json::to_string(&event) {
                Ok(json) => Message::Text(json),
                Err(e) => {
                    tracing::error!(error = %e, "Failed to serialize event");
                    continue;
                }
            };

            if let Err(e) = sender.send(msg).await {
                tracing::debug!(
                    listener_id = %listener_id,
                    error = %e,
                    "Failed to send WebSocket message"
                );
                break;
            }
        }
    });

    // 接收客户端控制信号
    let orchestrator = state.orchestrator.clone();
    let mut receive_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            match msg {
                Ok(Message::Text(text)) => match ClientSignal::parse(&text) {
                    Some(signal) => dispatch_signal(&orchestrator, signal),
                    None => {
                        tracing::debug!(listener_id = %listener_id, text = %text, "Unknown client message ignored");
                    }
                },
                Ok(Message::Close(_)) => {
                    tracing::info!(listener_id = %listener_id, "WebSocket closed by client");
                    break;
                }
                Err(e) => {
                    tracing::debug!(listener_id = %listener_id, error = %e, "WebSocket error");
                    break;
                }
                // Ping 由 axum 自动响应
                _ => {}
            }
        }
    });

    // 等待任一任务完成
    tokio::select! {
        _ = &mut forward_task => receive_task.abort(),
        _ = &mut receive_task => forward_task.abort(),
    }

    // 清理
    let connected_for = state.event_publisher.unregister_listener(&listener_id);
    tracing::info!(
        listener_id = %listener_id,
        connected_secs = connected_for.map(|d| d.num_seconds()),
        "Listener disconnected"
    );
}

/// 把收听者信号交给编排器
///
/// 断开连接不会停播，会话属于整个进程
pub fn dispatch_signal(orchestrator: &RadioOrchestrator, signal: ClientSignal) {
    match signal {
        ClientSignal::StartRadio => {
            tracing::info!("start_radio received");
            orchestrator.start();
        }
        ClientSignal::StopRadio => {
            tracing::info!("stop_radio received");
            orchestrator.stop();
        }
        ClientSignal::SongEnded => orchestrator.on_song_ended(),
    }
}
