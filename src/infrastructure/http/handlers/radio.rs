//! Radio Control Handlers
//!
//! 与 WebSocket 信号等价的 HTTP 入口，便于调试和脚本控制

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::infrastructure::http::dto::{ApiResponse, RadioControlResponse, RadioStatusResponse};
use crate::infrastructure::http::state::AppState;

/// 会话状态
pub async fn radio_status(
    State(state): State<Arc<AppState>>,
) -> Json<ApiResponse<RadioStatusResponse>> {
    Json(ApiResponse::success(RadioStatusResponse {
        session: state.orchestrator.snapshot(),
        listeners: state.event_publisher.listener_count(),
    }))
}

/// 开播（已在播时重新开始一轮）
pub async fn start_radio(
    State(state): State<Arc<AppState>>,
) -> Json<ApiResponse<RadioControlResponse>> {
    let was_playing = state.orchestrator.is_playing();
    state.orchestrator.start();
    tracing::info!(restarted = was_playing, "Radio start requested via API");

    Json(ApiResponse::success(RadioControlResponse {
        is_playing: true,
        changed: !was_playing,
    }))
}

/// 停播
pub async fn stop_radio(
    State(state): State<Arc<AppState>>,
) -> Json<ApiResponse<RadioControlResponse>> {
    let changed = state.orchestrator.stop();
    tracing::info!(changed, "Radio stop requested via API");

    Json(ApiResponse::success(RadioControlResponse {
        is_playing: false,
        changed,
    }))
}
