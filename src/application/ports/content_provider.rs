//! Content Provider Port - DJ 口播文本生成
//!
//! 远程大模型调用的抽象接口，具体实现在 infrastructure/adapters/llm

use async_trait::async_trait;
use thiserror::Error;

/// 远程调用失败时替代口播的固定文本
pub const PLACEHOLDER_SCRIPT: &str =
    "Sorry, I'm having technical difficulties. Let's play some music while we fix this!";

/// 文本生成错误
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Content Provider Port
///
/// 实现方负责远程失败时的降级：返回 [`PLACEHOLDER_SCRIPT`] 而不是错误。
/// `Err` 只用于降级策略之外的异常，编排器会将其视为本轮失败。
#[async_trait]
pub trait ContentProviderPort: Send + Sync {
    /// 生成一段约一分钟的 DJ 口播
    ///
    /// `announce_next` 为 true 时要求在结尾预告下一首歌
    async fn generate_monologue(&self, announce_next: bool) -> Result<String, ContentError>;
}
