//! RadioDJ - AI 电台 DJ 服务
//!
//! 生成 DJ 口播 → 合成语音 → 搜索预告的歌曲 → 推送给所有收听者，循环往复

use std::sync::Arc;

use radiodj::application::{OrchestratorConfig, RadioOrchestrator, SpeechSynthesizerPort};
use radiodj::config::{load_config, print_config, AppConfig};
use radiodj::infrastructure::adapters::{
    ChatCompletionClient, ChatCompletionClientConfig, ElevenLabsClient, ElevenLabsClientConfig,
    SpotifyClient, SpotifyClientConfig, SpotifyTokenManager, SpotifyTokenManagerConfig,
};
use radiodj::infrastructure::events::EventPublisher;
use radiodj::infrastructure::http::{AppState, HttpServer, ServerConfig};
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config);

    tracing::info!("RadioDJ - AI 电台 DJ 服务");
    print_config(&config);

    // 口播文本生成
    let content = Arc::new(ChatCompletionClient::new(ChatCompletionClientConfig {
        base_url: config.llm.url.clone(),
        api_key: config.llm.api_key.clone(),
        model: config.llm.model.clone(),
        temperature: config.llm.temperature,
        max_tokens: config.llm.max_tokens,
        timeout_secs: config.llm.timeout_secs,
    })?);

    // 语音合成
    let speech = Arc::new(ElevenLabsClient::new(ElevenLabsClientConfig {
        base_url: config.speech.url.clone(),
        api_key: config.speech.api_key.clone(),
        voice_id: config.speech.voice_id.clone(),
        model_id: config.speech.model_id.clone(),
        stability: config.speech.stability,
        similarity_boost: config.speech.similarity_boost,
        timeout_secs: config.speech.timeout_secs,
    })?);
    let probe = speech.clone();
    tokio::spawn(async move {
        if probe.health_check().await {
            tracing::info!("Speech service reachable");
        } else {
            tracing::warn!("Speech service health check failed, segments may have no audio");
        }
    });

    // 曲库令牌 + 搜索
    let tokens = Arc::new(SpotifyTokenManager::new(SpotifyTokenManagerConfig {
        auth_url: config.catalog.auth_url.clone(),
        client_id: config.catalog.client_id.clone(),
        client_secret: config.catalog.client_secret.clone(),
        refresh_margin_secs: config.catalog.refresh_margin_secs,
        retry_secs: config.catalog.retry_secs,
        timeout_secs: config.catalog.timeout_secs,
    })?);
    let tracks = Arc::new(SpotifyClient::new(
        SpotifyClientConfig {
            api_url: config.catalog.api_url.clone(),
            timeout_secs: config.catalog.timeout_secs,
        },
        tokens.clone(),
    )?);

    // 令牌刷新独立于节目循环
    let shutdown = CancellationToken::new();
    let refresher = tokio::spawn(tokens.run_refresh_loop(shutdown.clone()));

    // 创建事件发布器与编排器
    let event_publisher = EventPublisher::new().arc();
    let orchestrator = RadioOrchestrator::new(
        OrchestratorConfig::from(&config.radio),
        content,
        speech,
        tracks,
        event_publisher.clone(),
    );

    // 创建 HTTP 服务器
    let mut server_config = ServerConfig::new(&config.server.host, config.server.port);
    if config.server.static_files.enabled {
        server_config = server_config.with_static_files(
            config.server.static_files.dir.clone(),
            config.server.static_files.path.clone(),
        );
    }
    let state = AppState::new(orchestrator.clone(), event_publisher);
    let server = HttpServer::new(server_config, state);

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            tokio::signal::ctrl_c()
                .await
                .expect("Failed to listen for ctrl-c");
            tracing::info!("Received shutdown signal");
        })
        .await?;

    orchestrator.stop();
    shutdown.cancel();
    if let Err(e) = refresher.await {
        tracing::warn!(error = %e, "Token refresher task ended abnormally");
    }

    tracing::info!("Server shutdown complete");

    Ok(())
}

/// 初始化日志（RUST_LOG 优先于 log.level）
fn init_tracing(config: &AppConfig) {
    let log_filter = format!(
        "{},radiodj={},tower_http=debug",
        config.log.level, config.log.level
    );
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    if config.log.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
