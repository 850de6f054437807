//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod content_provider;
mod event_sink;
mod speech_synthesizer;
mod track_resolver;

pub use content_provider::{ContentError, ContentProviderPort, PLACEHOLDER_SCRIPT};
pub use event_sink::{EventSinkPort, RadioEvent};
pub use speech_synthesizer::{SpeechError, SpeechSynthesizerPort};
pub use track_resolver::{CatalogError, TrackResolverPort};
