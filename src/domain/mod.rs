//! Domain Layer - 领域层
//!
//! Radio Context: DJ 片段、预告歌曲、曲目与单轮节目结果

pub mod radio;

pub use radio::{CycleOutcome, RadioTiming, Segment, SongRef, SpeechAudio, Track, WakeReason};
