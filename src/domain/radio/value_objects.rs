//! Radio Context - Value Objects

use base64::Engine;
use serde::{Deserialize, Serialize};

/// 预告歌曲（标题 + 艺人）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SongRef {
    pub title: String,
    pub artist: String,
}

impl SongRef {
    pub fn new(title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
        }
    }
}

impl std::fmt::Display for SongRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "\"{}\" by {}", self.title, self.artist)
    }
}

/// 合成后的语音数据
///
/// 不变量:
/// - data 非空
#[derive(Clone, PartialEq, Eq)]
pub struct SpeechAudio {
    data: Vec<u8>,
    mime_type: String,
}

impl SpeechAudio {
    pub fn new(data: Vec<u8>, mime_type: impl Into<String>) -> Result<Self, &'static str> {
        if data.is_empty() {
            return Err("audio payload cannot be empty");
        }
        Ok(Self {
            data,
            mime_type: mime_type.into(),
        })
    }

    /// MPEG 音频（TTS 服务的默认输出）
    pub fn mpeg(data: Vec<u8>) -> Result<Self, &'static str> {
        Self::new(data, "audio/mpeg")
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// 编码为 `data:<mime>;base64,...`，客户端可直接播放
    pub fn to_data_uri(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.mime_type,
            base64::engine::general_purpose::STANDARD.encode(&self.data)
        )
    }
}

impl std::fmt::Debug for SpeechAudio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpeechAudio")
            .field("mime_type", &self.mime_type)
            .field("len", &self.data.len())
            .finish()
    }
}
