//! Session State - 电台会话状态
//!
//! 只由 RadioOrchestrator 的控制入口（start / stop / 内部重新调度）修改

use std::time::Duration;

use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::domain::WakeReason;

/// 待执行唤醒所处阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WakePhase {
    /// 正在等待延迟到期
    Waiting,
    /// 延迟已到，本轮正在执行
    Running,
}

/// 已调度的唤醒
///
/// token 被取消后，对应任务在下一个挂起点退出，且不再发布任何事件
pub(super) struct PendingWake {
    pub reason: WakeReason,
    pub delay: Duration,
    pub phase: WakePhase,
    pub token: CancellationToken,
}

/// 会话状态
///
/// 不变量:
/// - 任意时刻最多一个 pending 唤醒
/// - is_playing == false 时 pending 必为 None
#[derive(Default)]
pub(super) struct SessionState {
    pub is_playing: bool,
    pub iteration: u64,
    pub pending: Option<PendingWake>,
}

impl SessionState {
    /// 取消当前唤醒（如果有）
    pub fn cancel_pending(&mut self) -> bool {
        match self.pending.take() {
            Some(wake) => {
                wake.token.cancel();
                true
            }
            None => false,
        }
    }

    /// token 对应的任务是否仍然有效
    pub fn is_current(&self, token: &CancellationToken) -> bool {
        self.is_playing && !token.is_cancelled()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            is_playing: self.is_playing,
            iteration: self.iteration,
            pending_wake: self.pending.as_ref().map(|wake| PendingWakeInfo {
                reason: wake.reason.as_str(),
                delay_ms: wake.delay.as_millis() as u64,
                phase: wake.phase,
            }),
        }
    }
}

/// 待执行唤醒的只读视图
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingWakeInfo {
    pub reason: &'static str,
    pub delay_ms: u64,
    pub phase: WakePhase,
}

/// 会话状态的只读快照
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub is_playing: bool,
    /// 已开始的轮次数
    pub iteration: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending_wake: Option<PendingWakeInfo>,
}
