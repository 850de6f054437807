//! HTTP 层测试用的假端口

use async_trait::async_trait;
use std::sync::Arc;

use crate::application::{
    CatalogError, ContentError, ContentProviderPort, OrchestratorConfig, RadioOrchestrator,
    SpeechError, SpeechSynthesizerPort, TrackResolverPort,
};
use crate::domain::{SpeechAudio, Track};
use crate::infrastructure::events::EventPublisher;
use crate::infrastructure::http::state::AppState;

/// 永不返回，保证会话停留在第一步
struct StalledContent;

#[async_trait]
impl ContentProviderPort for StalledContent {
    async fn generate_monologue(&self, _announce_next: bool) -> Result<String, ContentError> {
        std::future::pending().await
    }
}

struct NoSpeech;

#[async_trait]
impl SpeechSynthesizerPort for NoSpeech {
    async fn synthesize(&self, _text: &str) -> Result<Option<SpeechAudio>, SpeechError> {
        Ok(None)
    }
}

struct NoTracks;

#[async_trait]
impl TrackResolverPort for NoTracks {
    async fn resolve(&self, _title: &str, _artist: &str) -> Result<Option<Track>, CatalogError> {
        Ok(None)
    }
}

pub(crate) fn test_state_with(config: OrchestratorConfig) -> Arc<AppState> {
    let publisher = EventPublisher::new().arc();
    let orchestrator = RadioOrchestrator::new(
        config,
        Arc::new(StalledContent),
        Arc::new(NoSpeech),
        Arc::new(NoTracks),
        publisher.clone(),
    );
    Arc::new(AppState::new(orchestrator, publisher))
}

pub(crate) fn test_state() -> Arc<AppState> {
    test_state_with(OrchestratorConfig::default())
}
