//! Speech Synthesizer Port - 文本转语音抽象
//!
//! 定义 TTS 合成的抽象接口，具体实现在 infrastructure/adapters/speech

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::SpeechAudio;

/// TTS 错误
#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Speech Synthesizer Port
///
/// 外部 TTS 服务的抽象接口
#[async_trait]
pub trait SpeechSynthesizerPort: Send + Sync {
    /// 合成口播语音
    ///
    /// 远程服务不可用时返回 `Ok(None)`：本轮片段照常发布，只是没有音频
    async fn synthesize(&self, text: &str) -> Result<Option<SpeechAudio>, SpeechError>;

    /// 检查 TTS 服务是否可用
    async fn health_check(&self) -> bool {
        true // 默认实现
    }
}
