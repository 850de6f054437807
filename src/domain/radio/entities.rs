//! Radio Context - Entities

use super::value_objects::{SongRef, SpeechAudio};

/// 曲目时长缺失时使用的默认值（毫秒）
pub const DEFAULT_TRACK_DURATION_MS: u64 = 30_000;

/// 可播放曲目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    /// 曲库 URI（如 `spotify:track:...`）
    pub uri: String,
    pub display_name: String,
    pub artist_name: String,
    pub album_art_url: Option<String>,
    /// 试听片段地址
    pub preview_locator: Option<String>,
    /// 曲库给出的时长，可能缺失
    pub duration_ms: Option<u64>,
}

impl Track {
    /// 播放时长，缺失或为 0 时回退到 `default_ms`
    pub fn duration_or(&self, default_ms: u64) -> u64 {
        match self.duration_ms {
            Some(ms) if ms > 0 => ms,
            _ => default_ms,
        }
    }
}

/// DJ 片段 - 单轮节目的口播内容
///
/// 不变量:
/// - 创建后不可变
/// - audio 为 None 表示本轮没有可用语音
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    script: String,
    audio: Option<SpeechAudio>,
    announced_song: SongRef,
}

impl Segment {
    pub fn new(script: String, audio: Option<SpeechAudio>, announced_song: SongRef) -> Self {
        Self {
            script,
            audio,
            announced_song,
        }
    }

    pub fn script(&self) -> &str {
        &self.script
    }

    pub fn audio(&self) -> Option<&SpeechAudio> {
        self.audio.as_ref()
    }

    pub fn announced_song(&self) -> &SongRef {
        &self.announced_song
    }

    pub fn has_audio(&self) -> bool {
        self.audio.is_some()
    }
}
