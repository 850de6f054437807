//! Track Resolver Port - 曲库搜索抽象

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::Track;

/// 曲库搜索错误
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Authentication failed: {0}")]
    AuthError(String),
}

/// Track Resolver Port
///
/// 先按结构化条件（标题 + 艺人）搜索，没有结果再用关键词组合搜索
#[async_trait]
pub trait TrackResolverPort: Send + Sync {
    /// 解析可播放曲目
    ///
    /// 找不到返回 `Ok(None)`；`Err` 仅表示传输失败，调用方按"找不到"处理
    async fn resolve(&self, title: &str, artist: &str) -> Result<Option<Track>, CatalogError>;
}
