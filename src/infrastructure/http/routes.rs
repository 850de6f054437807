//! HTTP Routes
//!
//! Endpoints:
//! - /ws                   WS    收听者通道（事件推送 + 控制信号）
//! - /api/health           GET   健康检查
//! - /api/radio/status     GET   会话状态
//! - /api/radio/start      POST  开播
//! - /api/radio/stop       POST  停播

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .nest("/api", api_routes())
        .route("/ws", get(handlers::websocket_handler))
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(handlers::health))
        .nest("/radio", radio_routes())
}

/// Radio 路由
fn radio_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/status", get(handlers::radio_status))
        .route("/start", post(handlers::start_radio))
        .route("/stop", post(handlers::stop_radio))
}
