//! Radio Session - 电台会话编排
//!
//! RadioOrchestrator 串联 口播生成 → 歌曲解析 → 语音合成 → 曲库搜索，
//! 按固定节奏在"口播"与"放歌"之间切换，并把每一步广播给收听者。

mod orchestrator;
mod state;


pub use orchestrator::{
    OrchestratorConfig, RadioOrchestrator, MSG_CONVERTING, MSG_GENERATING, MSG_RECOVERING,
    MSG_SEARCHING, MSG_SONG_NOT_FOUND,
};
pub use state::{PendingWakeInfo, SessionSnapshot, WakePhase};
