//! Radio Context - 电台节目限界上下文
//!
//! 职责:
//! - DJ 片段（Segment）与预告歌曲（SongRef）
//! - 曲目描述（Track）
//! - 播报文本中的歌曲解析
//! - 单轮节目结果（CycleOutcome）

mod announcement;
mod cycle;
mod entities;
mod value_objects;

pub use announcement::{
    extract_song, extract_song_with_rng, fallback_song, FALLBACK_CATALOG,
};
pub use cycle::{CycleOutcome, RadioTiming, WakeReason};
pub use entities::{Segment, Track, DEFAULT_TRACK_DURATION_MS};
pub use value_objects::{SongRef, SpeechAudio};
