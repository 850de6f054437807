//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（ContentProvider、SpeechSynthesizer、TrackResolver、EventSink）
//! - radio: 电台会话编排器
//! - error: 应用层错误定义

pub mod error;
pub mod ports;
pub mod radio;

pub use error::CycleError;

pub use ports::{
    // Content provider
    ContentError,
    ContentProviderPort,
    PLACEHOLDER_SCRIPT,
    // Event sink
    EventSinkPort,
    RadioEvent,
    // Speech synthesizer
    SpeechError,
    SpeechSynthesizerPort,
    // Track resolver
    CatalogError,
    TrackResolverPort,
};

pub use radio::{OrchestratorConfig, RadioOrchestrator, SessionSnapshot};
