//! 单轮节目结果与调度时长

use std::time::Duration;

use super::entities::{Segment, Track, DEFAULT_TRACK_DURATION_MS};

/// 电台节奏参数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RadioTiming {
    /// 口播窗口：发布片段后等待多久再放歌
    pub talk_window: Duration,
    /// 找不到歌曲时，下一轮的等待时间
    pub no_track_retry: Duration,
    /// 本轮失败后的恢复等待时间
    pub failure_retry: Duration,
    /// 曲目时长缺失时的默认播放时长
    pub default_track_duration: Duration,
}

impl Default for RadioTiming {
    fn default() -> Self {
        Self {
            talk_window: Duration::from_secs(60),
            no_track_retry: Duration::from_millis(5_000),
            failure_retry: Duration::from_millis(10_000),
            default_track_duration: Duration::from_millis(DEFAULT_TRACK_DURATION_MS),
        }
    }
}

/// 下一次唤醒的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WakeReason {
    /// start 触发的首轮
    Start,
    /// 等待当前曲目播完
    TrackFinished,
    /// 未找到曲目，稍后重试
    NoTrackRetry,
    /// 本轮失败，恢复重试
    FailureRetry,
    /// 收听者报告曲目已播完，立即进入下一轮
    SongEnded,
}

impl WakeReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::TrackFinished => "track_finished",
            Self::NoTrackRetry => "no_track_retry",
            Self::FailureRetry => "failure_retry",
            Self::SongEnded => "song_ended",
        }
    }
}

/// 单轮节目的结果
#[derive(Debug, Clone)]
pub enum CycleOutcome {
    /// 片段已发布，找到了曲目
    Played { segment: Segment, track: Track },
    /// 片段已发布，曲库中没有找到预告的歌
    NoTrackFound { segment: Segment },
    /// 本轮中途失败
    Failed { reason: String },
}

impl CycleOutcome {
    /// 根据结果决定下一轮的唤醒原因和等待时长
    pub fn next_wake(&self, timing: &RadioTiming) -> (WakeReason, Duration) {
        match self {
            Self::Played { track, .. } => {
                let default_ms = timing.default_track_duration.as_millis() as u64;
                (
                    WakeReason::TrackFinished,
                    Duration::from_millis(track.duration_or(default_ms)),
                )
            }
            Self::NoTrackFound { .. } => (WakeReason::NoTrackRetry, timing.no_track_retry),
            Self::Failed { .. } => (WakeReason::FailureRetry, timing.failure_retry),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}
