//! Data Transfer Objects

use serde::Serialize;

use crate::application::SessionSnapshot;

// ============================================================================
// 统一响应结构
// ============================================================================

/// 统一 API 响应格式
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub errno: i32,
    pub error: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 成功响应
    pub fn success(data: T) -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(data),
        }
    }
}

// ============================================================================
// Radio DTOs
// ============================================================================

#[derive(Debug, Serialize)]
pub struct RadioStatusResponse {
    #[serde(flatten)]
    pub session: SessionSnapshot,
    /// 当前连接的收听者数
    pub listeners: usize,
}

#[derive(Debug, Serialize)]
pub struct RadioControlResponse {
    pub is_playing: bool,
    /// 本次请求是否改变了会话状态
    pub changed: bool,
}
