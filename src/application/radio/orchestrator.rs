//! Radio Orchestrator - 电台节目编排
//!
//! 状态机: Idle ⇄ Cycling
//!
//! 每一轮:
//! 1. status: 生成口播
//! 2. 生成口播文本（要求结尾预告下一首）
//! 3. 解析预告歌曲
//! 4. status: 语音合成；合成失败时本轮没有音频
//! 5. 发布 DJ 片段
//! 6. status: 搜索歌曲
//! 7. 等待口播窗口（可被 stop 取消）
//! 8. 找到曲目 → 发布 playback，曲目时长后进入下一轮；
//!    未找到 → 5 秒后下一轮；任何失败 → error 事件，10 秒后下一轮
//!
//! 所有调度都经过同一个"先取消再调度"入口，保证最多一个待执行唤醒。

use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use futures_util::FutureExt;
use tokio_util::sync::CancellationToken;

use super::state::{PendingWake, SessionSnapshot, SessionState, WakePhase};
use crate::application::error::CycleError;
use crate::application::ports::{
    ContentProviderPort, EventSinkPort, RadioEvent, SpeechSynthesizerPort, TrackResolverPort,
};
use crate::domain::radio::extract_song;
use crate::domain::{CycleOutcome, RadioTiming, Segment, WakeReason};

pub const MSG_GENERATING: &str = "Generating DJ script...";
pub const MSG_CONVERTING: &str = "Converting to speech...";
pub const MSG_SEARCHING: &str = "Searching for song...";
pub const MSG_SONG_NOT_FOUND: &str = "Song not found, trying next DJ segment...";
pub const MSG_RECOVERING: &str = "Technical difficulties. Restarting soon...";

/// 编排器配置
#[derive(Debug, Clone, Default)]
pub struct OrchestratorConfig {
    pub timing: RadioTiming,
    /// 收到 song_ended 时是否提前进入下一轮（默认只按计时推进）
    pub advance_on_song_end: bool,
}

/// 电台编排器
///
/// 持有唯一的 SessionState；start / stop / on_song_ended 是仅有的外部修改入口。
/// Clone 共享同一个会话。
#[derive(Clone)]
pub struct RadioOrchestrator {
    inner: Arc<Inner>,
}

struct Inner {
    config: OrchestratorConfig,
    content: Arc<dyn ContentProviderPort>,
    speech: Arc<dyn SpeechSynthesizerPort>,
    tracks: Arc<dyn TrackResolverPort>,
    events: Arc<dyn EventSinkPort>,
    state: Mutex<SessionState>,
}

impl RadioOrchestrator {
    pub fn new(
        config: OrchestratorConfig,
        content: Arc<dyn ContentProviderPort>,
        speech: Arc<dyn SpeechSynthesizerPort>,
        tracks: Arc<dyn TrackResolverPort>,
        events: Arc<dyn EventSinkPort>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                config,
                content,
                speech,
                tracks,
                events,
                state: Mutex::new(SessionState::default()),
            }),
        }
    }

    /// 开播
    ///
    /// 已在播时取消当前唤醒并立即重新开始一轮，不会产生两个并发的轮次
    pub fn start(&self) {
        let mut state = self.inner.lock_state();
        let was_playing = state.is_playing;
        state.is_playing = true;
        self.inner
            .schedule_locked(&mut state, WakeReason::Start, Duration::ZERO);

        if was_playing {
            tracing::info!("Radio restarted");
        } else {
            tracing::info!("Radio started");
        }
    }

    /// 停播
    ///
    /// 返回 false 表示本来就是空闲状态（不会重复发布 stopped）
    pub fn stop(&self) -> bool {
        let mut state = self.inner.lock_state();
        if !state.is_playing {
            tracing::debug!("Stop requested while idle, ignoring");
            return false;
        }
        state.cancel_pending();
        state.is_playing = false;
        // 持锁发布，保证 stopped 之后不会再有本会话的事件
        self.inner.events.publish(RadioEvent::Stopped);
        drop(state);

        tracing::info!("Radio stopped");
        true
    }

    /// 收听者报告曲目播放结束
    ///
    /// 默认仅记录；开启 `advance_on_song_end` 且当前正在等待曲目播完时，立即开始下一轮
    pub fn on_song_ended(&self) {
        if !self.inner.config.advance_on_song_end {
            tracing::debug!("Listener reported song ended");
            return;
        }

        let mut state = self.inner.lock_state();
        let waiting_for_track = matches!(
            &state.pending,
            Some(wake) if wake.reason == WakeReason::TrackFinished && wake.phase == WakePhase::Waiting
        );
        if !state.is_playing || !waiting_for_track {
            tracing::debug!("Song ended signal ignored (not waiting for a track)");
            return;
        }

        tracing::info!("Song ended early, advancing to next segment");
        self.inner
            .schedule_locked(&mut state, WakeReason::SongEnded, Duration::ZERO);
    }

    pub fn is_playing(&self) -> bool {
        self.inner.lock_state().is_playing
    }

    /// 当前待执行唤醒数（0 或 1）
    pub fn pending_wakes(&self) -> usize {
        usize::from(self.inner.lock_state().pending.is_some())
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.inner.lock_state().snapshot()
    }
}

impl Inner {
    fn lock_state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// 先取消再调度：所有状态转换共用的唯一调度入口
    fn schedule_locked(self: &Arc<Self>, state: &mut SessionState, reason: WakeReason, delay: Duration) {
        state.cancel_pending();

        let token = CancellationToken::new();
        tokio::spawn(Arc::clone(self).run_wake(token.clone(), delay));

        state.pending = Some(PendingWake {
            reason,
            delay,
            phase: WakePhase::Waiting,
            token,
        });

        tracing::debug!(
            reason = reason.as_str(),
            delay_ms = delay.as_millis() as u64,
            "Next radio cycle scheduled"
        );
    }

    /// 本轮结束后调度下一轮（本轮已被取消则不调度）
    fn schedule_next(self: &Arc<Self>, token: &CancellationToken, reason: WakeReason, delay: Duration) {
        let mut state = self.lock_state();
        if !state.is_current(token) {
            return;
        }
        self.schedule_locked(&mut state, reason, delay);
    }

    /// 延迟到期后把唤醒标记为执行中，返回轮次编号
    fn begin_iteration(&self, token: &CancellationToken) -> Option<u64> {
        let mut state = self.lock_state();
        if !state.is_current(token) {
            return None;
        }
        state.iteration += 1;
        if let Some(wake) = state.pending.as_mut() {
            wake.phase = WakePhase::Running;
        }
        Some(state.iteration)
    }

    /// 仅在会话仍处于 Cycling 且本轮未被取代时发布
    fn emit(&self, token: &CancellationToken, event: RadioEvent) -> Result<(), CycleError> {
        let state = self.lock_state();
        if !state.is_current(token) {
            return Err(CycleError::Cancelled);
        }
        self.events.publish(event);
        Ok(())
    }

    async fn run_wake(self: Arc<Self>, token: CancellationToken, delay: Duration) {
        if !delay.is_zero() {
            tokio::select! {
                biased;
                _ = token.cancelled() => return,
                _ = tokio::time::sleep(delay) => {}
            }
        }

        let Some(iteration) = self.begin_iteration(&token) else {
            return;
        };

        let cycle = AssertUnwindSafe(self.run_cycle(&token, iteration)).catch_unwind();
        let outcome = tokio::select! {
            biased;
            _ = token.cancelled() => None,
            result = cycle => match result {
                Ok(outcome) => outcome,
                Err(_) => Some(self.fail_cycle(&token, iteration, CycleError::internal("radio cycle panicked"))),
            },
        };

        let Some(outcome) = outcome else {
            tracing::debug!(iteration, "Radio cycle cancelled");
            return;
        };

        let (reason, delay) = outcome.next_wake(&self.config.timing);
        if outcome.is_failure() {
            tracing::warn!(iteration, retry_ms = delay.as_millis() as u64, "Radio cycle will retry");
        }
        self.schedule_next(&token, reason, delay);
    }

    /// 执行一轮；None 表示本轮被取消
    async fn run_cycle(&self, token: &CancellationToken, iteration: u64) -> Option<CycleOutcome> {
        tracing::info!(iteration, "Radio cycle started");

        match self.try_cycle(token, iteration).await {
            Ok(outcome) => Some(outcome),
            Err(e) if e.is_cancelled() => None,
            Err(e) => Some(self.fail_cycle(token, iteration, e)),
        }
    }

    fn fail_cycle(&self, token: &CancellationToken, iteration: u64, error: CycleError) -> CycleOutcome {
        tracing::error!(iteration, error = %error, "Radio cycle failed");
        // 已取消时不会发布，后续调度也会跳过
        let _ = self.emit(token, RadioEvent::error(MSG_RECOVERING));
        CycleOutcome::Failed {
            reason: error.to_string(),
        }
    }

    async fn try_cycle(&self, token: &CancellationToken, iteration: u64) -> Result<CycleOutcome, CycleError> {
        self.emit(token, RadioEvent::status(MSG_GENERATING))?;
        let script = self.content.generate_monologue(true).await?;

        let song = extract_song(&script);
        tracing::info!(iteration, song = %song, script_len = script.len(), "DJ script ready");

        self.emit(token, RadioEvent::status(MSG_CONVERTING))?;
        // 语音失败不影响本轮，片段照常发布，只是没有音频
        let audio = match self.speech.synthesize(&script).await {
            Ok(audio) => audio,
            Err(e) => {
                tracing::warn!(iteration, error = %e, "Speech synthesis failed");
                None
            }
        };
        match &audio {
            Some(audio) => tracing::debug!(iteration, audio_size = audio.len(), "Speech synthesized"),
            None => tracing::warn!(iteration, "Speech unavailable, publishing script without audio"),
        }

        let segment = Segment::new(script, audio, song.clone());
        self.emit(token, RadioEvent::Segment(segment.clone()))?;

        self.emit(token, RadioEvent::status(MSG_SEARCHING))?;
        let track = match self.tracks.resolve(&song.title, &song.artist).await {
            Ok(track) => track,
            Err(e) => {
                tracing::warn!(iteration, song = %song, error = %e, "Track search failed, treating as not found");
                None
            }
        };

        // 口播窗口
        tokio::select! {
            biased;
            _ = token.cancelled() => return Err(CycleError::Cancelled),
            _ = tokio::time::sleep(self.config.timing.talk_window) => {}
        }

        match track {
            Some(track) => {
                let default_ms = self.config.timing.default_track_duration.as_millis() as u64;
                let duration_ms = track.duration_or(default_ms);
                tracing::info!(
                    iteration,
                    uri = %track.uri,
                    name = %track.display_name,
                    duration_ms,
                    "Playing track"
                );
                self.emit(
                    token,
                    RadioEvent::Playback {
                        track: track.clone(),
                        duration_ms,
                    },
                )?;
                Ok(CycleOutcome::Played { segment, track })
            }
            None => {
                tracing::info!(iteration, song = %song, "Track not found");
                self.emit(token, RadioEvent::status(MSG_SONG_NOT_FOUND))?;
                Ok(CycleOutcome::NoTrackFound { segment })
            }
        }
    }
}
