//! 应用层错误定义

use thiserror::Error;

use super::ports::ContentError;

/// 单轮节目错误
///
/// 在轮次边界被捕获：发布 error 事件后按恢复延迟重试，永不终止电台
#[derive(Debug, Error)]
pub enum CycleError {
    /// 口播生成异常（降级策略之外）
    #[error("Content generation failed: {0}")]
    Content(#[from] ContentError),

    /// 电台已停止或本轮已被新的调度取代
    #[error("Cycle cancelled")]
    Cancelled,

    /// 内部错误
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CycleError {
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}
