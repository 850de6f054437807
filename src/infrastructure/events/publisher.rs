//! Event Publisher Implementation
//!
//! 单一会话，所有收听者共享一个广播通道

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::broadcast;
use uuid::Uuid;

use super::wire::WsEvent;
use crate::application::ports::{EventSinkPort, RadioEvent};

/// 广播通道容量
///
/// 音频以 data URI 内联在 dj_segment 中，单条事件可能较大，不需要很深的缓冲
const CHANNEL_CAPACITY: usize = 64;

/// 事件发布器
pub struct EventPublisher {
    channel: broadcast::Sender<WsEvent>,
    /// listener_id -> 连接时间
    listeners: DashMap<Uuid, DateTime<Utc>>,
}

impl EventPublisher {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            channel: tx,
            listeners: DashMap::new(),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// 注册收听者，返回其 id 与事件接收器
    pub fn register_listener(&self) -> (Uuid, broadcast::Receiver<WsEvent>) {
        let listener_id = Uuid::new_v4();
        self.listeners.insert(listener_id, Utc::now());
        (listener_id, self.channel.subscribe())
    }

    /// 取消注册收听者，返回连接时长
    pub fn unregister_listener(&self, listener_id: &Uuid) -> Option<chrono::Duration> {
        self.listeners
            .remove(listener_id)
            .map(|(_, connected_at)| Utc::now() - connected_at)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// 发布事件到所有收听者
    pub fn broadcast(&self, event: WsEvent) {
        if let Err(e) = self.channel.send(event) {
            tracing::debug!(error = %e, "Failed to publish event (no receivers)");
        }
    }
}

impl Default for EventPublisher {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSinkPort for EventPublisher {
    fn publish(&self, event: RadioEvent) {
        tracing::debug!(
            kind = event.kind(),
            listeners = self.listener_count(),
            "Publishing radio event"
        );
        self.broadcast(WsEvent::from(event));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_broadcast_reaches_all_listeners() {
        let publisher = EventPublisher::new();
        let (_, mut rx1) = publisher.register_listener();
        let (_, mut rx2) = publisher.register_listener();
        assert_eq!(publisher.listener_count(), 2);

        publisher.publish(RadioEvent::status("Generating DJ script..."));

        let expected = WsEvent::Status {
            message: "Generating DJ script...".to_string(),
        };
        assert_eq!(rx1.recv().await.unwrap(), expected);
        assert_eq!(rx2.recv().await.unwrap(), expected);
    }

    #[test]
    fn test_publish_without_listeners() {
        let publisher = EventPublisher::new();
        publisher.publish(RadioEvent::Stopped);
        assert_eq!(publisher.listener_count(), 0);
    }

    #[test]
    fn test_unregister_listener() {
        let publisher = EventPublisher::new();
        let (id, _rx) = publisher.register_listener();
        assert!(publisher.unregister_listener(&id).is_some());
        assert!(publisher.unregister_listener(&id).is_none());
        assert_eq!(publisher.listener_count(), 0);
    }
}
