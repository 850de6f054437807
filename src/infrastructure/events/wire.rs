//! WebSocket 线上格式
//!
//! 字段名与现有前端保持一致（camelCase），事件以 `{"event": ..., "data": ...}` 封装

use serde::{Deserialize, Serialize};

use crate::application::ports::RadioEvent;

/// 推送给收听者的事件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum WsEvent {
    /// 进度提示
    Status { message: String },
    /// DJ 口播片段
    DjSegment {
        script: String,
        /// `data:audio/mpeg;base64,...`，语音不可用时为 null
        audio: Option<String>,
        #[serde(rename = "songDetails")]
        song_details: SongDetails,
    },
    /// 开始播放曲目
    PlaySong {
        uri: String,
        name: String,
        artist: String,
        #[serde(rename = "albumCover", skip_serializing_if = "Option::is_none")]
        album_cover: Option<String>,
        #[serde(rename = "previewUrl", skip_serializing_if = "Option::is_none")]
        preview_url: Option<String>,
        /// 毫秒
        duration: u64,
    },
    RadioStopped,
    Error { message: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SongDetails {
    pub title: String,
    pub artist: String,
}

impl From<RadioEvent> for WsEvent {
    fn from(event: RadioEvent) -> Self {
        match event {
            RadioEvent::Status { message } => WsEvent::Status { message },
            RadioEvent::Segment(segment) => {
                let song = segment.announced_song();
                WsEvent::DjSegment {
                    script: segment.script().to_string(),
                    audio: segment.audio().map(|audio| audio.to_data_uri()),
                    song_details: SongDetails {
                        title: song.title.clone(),
                        artist: song.artist.clone(),
                    },
                }
            }
            RadioEvent::Playback { track, duration_ms } => WsEvent::PlaySong {
                uri: track.uri,
                name: track.display_name,
                artist: track.artist_name,
                album_cover: track.album_art_url,
                preview_url: track.preview_locator,
                duration: duration_ms,
            },
            RadioEvent::Stopped => WsEvent::RadioStopped,
            RadioEvent::Error { message } => WsEvent::Error { message },
        }
    }
}

/// 收听者发来的控制信号
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ClientSignal {
    StartRadio,
    StopRadio,
    SongEnded,
}

impl ClientSignal {
    /// 解析文本帧：`{"event":"start_radio"}` 或裸信号名 `start_radio`
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if let Ok(signal) = serde_json::from_str::<ClientSignal>(text) {
            return Some(signal);
        }
        match text.trim_matches('"') {
            "start_radio" => Some(Self::StartRadio),
            "stop_radio" => Some(Self::StopRadio),
            "song_ended" => Some(Self::SongEnded),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Segment, SongRef, SpeechAudio, Track};
    use serde_json::json;

    fn track() -> Track {
        Track {
            uri: "spotify:track:1".to_string(),
            display_name: "Imagine".to_string(),
            artist_name: "John Lennon".to_string(),
            album_art_url: Some("https://img/1.jpg".to_string()),
            preview_locator: None,
            duration_ms: Some(183000),
        }
    }

    #[test]
    fn test_dj_segment_wire_shape() {
        let segment = Segment::new(
            "Next up, \"Imagine\" by John Lennon".to_string(),
            Some(SpeechAudio::mpeg(b"abc".to_vec()).unwrap()),
            SongRef::new("Imagine", "John Lennon"),
        );
        let value = serde_json::to_value(WsEvent::from(RadioEvent::Segment(segment))).unwrap();
        assert_eq!(
            value,
            json!({
                "event": "dj_segment",
                "data": {
                    "script": "Next up, \"Imagine\" by John Lennon",
                    "audio": "data:audio/mpeg;base64,YWJj",
                    "songDetails": { "title": "Imagine", "artist": "John Lennon" }
                }
            })
        );
    }

    #[test]
    fn test_dj_segment_without_audio() {
        let segment = Segment::new("hi".to_string(), None, SongRef::new("A", "B"));
        let value = serde_json::to_value(WsEvent::from(RadioEvent::Segment(segment))).unwrap();
        assert!(value["data"]["audio"].is_null());
    }

    #[test]
    fn test_play_song_wire_shape() {
        let event = RadioEvent::Playback {
            track: track(),
            duration_ms: 183000,
        };
        let value = serde_json::to_value(WsEvent::from(event)).unwrap();
        assert_eq!(
            value,
            json!({
                "event": "play_song",
                "data": {
                    "uri": "spotify:track:1",
                    "name": "Imagine",
                    "artist": "John Lennon",
                    "albumCover": "https://img/1.jpg",
                    "duration": 183000
                }
            })
        );
    }

    #[test]
    fn test_simple_events() {
        assert_eq!(
            serde_json::to_value(WsEvent::from(RadioEvent::Stopped)).unwrap(),
            json!({ "event": "radio_stopped" })
        );
        assert_eq!(
            serde_json::to_value(WsEvent::from(RadioEvent::status("Searching for song..."))).unwrap(),
            json!({ "event": "status", "data": { "message": "Searching for song..." } })
        );
        assert_eq!(
            serde_json::to_value(WsEvent::from(RadioEvent::error("boom"))).unwrap(),
            json!({ "event": "error", "data": { "message": "boom" } })
        );
    }

    #[test]
    fn test_client_signal_parse() {
        assert_eq!(ClientSignal::parse(r#"{"event":"start_radio"}"#), Some(ClientSignal::StartRadio));
        assert_eq!(ClientSignal::parse(r#"{"event":"stop_radio","data":null}"#), Some(ClientSignal::StopRadio));
        assert_eq!(ClientSignal::parse("song_ended"), Some(ClientSignal::SongEnded));
        assert_eq!(ClientSignal::parse(" \"stop_radio\" "), Some(ClientSignal::StopRadio));
        assert_eq!(ClientSignal::parse("dance"), None);
        assert_eq!(ClientSignal::parse(r#"{"event":"dance"}"#), None);
    }
}
