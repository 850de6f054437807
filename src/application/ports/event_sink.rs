//! Event Sink Port - 向收听者广播电台事件

use crate::domain::{Segment, Track};

/// 电台事件
#[derive(Debug, Clone)]
pub enum RadioEvent {
    /// 进度提示
    Status { message: String },
    /// DJ 片段（口播文本 + 可选音频 + 预告歌曲）
    Segment(Segment),
    /// 开始播放曲目
    Playback { track: Track, duration_ms: u64 },
    /// 电台已停止
    Stopped,
    /// 本轮失败，稍后自动恢复
    Error { message: String },
}

impl RadioEvent {
    pub fn status(message: impl Into<String>) -> Self {
        Self::Status {
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Status { .. } => "status",
            Self::Segment(_) => "segment",
            Self::Playback { .. } => "playback",
            Self::Stopped => "stopped",
            Self::Error { .. } => "error",
        }
    }
}

/// Event Sink Port
///
/// 订阅者集合的发布接口；投递语义为"当前在线的收听者最多收到一次"，不做回放
pub trait EventSinkPort: Send + Sync {
    fn publish(&self, event: RadioEvent);
}
