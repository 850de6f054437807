//! Application State

use std::sync::Arc;

use crate::application::RadioOrchestrator;
use crate::infrastructure::events::EventPublisher;

/// 应用状态
///
/// 进程内只有一个电台会话，所有连接共享同一个编排器
pub struct AppState {
    pub orchestrator: RadioOrchestrator,
    pub event_publisher: Arc<EventPublisher>,
}

impl AppState {
    pub fn new(orchestrator: RadioOrchestrator, event_publisher: Arc<EventPublisher>) -> Self {
        Self {
            orchestrator,
            event_publisher,
        }
    }
}
