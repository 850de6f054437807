//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量（`RADIODJ_` 前缀）
//! 2. 配置文件（config.toml）
//! 3. 旧式环境变量（`PORT`、`DEEPSEEK_API_KEY` 等）
//! 4. 默认值

use config::{builder::DefaultState, Config, ConfigBuilder, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 旧式环境变量 -> 配置键
const LEGACY_ENV_KEYS: &[(&str, &str)] = &[
    ("PORT", "server.port"),
    ("DEEPSEEK_API_KEY", "llm.api_key"),
    ("ELEVENLABS_API_KEY", "speech.api_key"),
    ("SPOTIFY_CLIENT_ID", "catalog.client_id"),
    ("SPOTIFY_CLIENT_SECRET", "catalog.client_secret"),
];

/// 加载应用配置
///
/// # 环境变量示例
/// - `RADIODJ_SERVER__PORT=8080`
/// - `RADIODJ_LLM__API_KEY=sk-...`
/// - `RADIODJ_RADIO__TALK_WINDOW_SECS=30`
/// - `RADIODJ_RADIO__ADVANCE_ON_SONG_END=true`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = default_builder()?;

    // 旧式环境变量只作为默认值，配置文件和 RADIODJ_ 变量可以覆盖
    for (key, value) in legacy_overrides(|name| std::env::var(name).ok()) {
        builder = builder.set_default(key, value)?;
    }

    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 前缀: RADIODJ_，层级分隔符: __
    builder = builder.add_source(
        Environment::with_prefix("RADIODJ")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

fn default_builder() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let defaults = AppConfig::default();
    let builder = Config::builder()
        .set_default("server.host", defaults.server.host)?
        .set_default("server.port", i64::from(defaults.server.port))?
        .set_default("llm.url", defaults.llm.url)?
        .set_default("speech.url", defaults.speech.url)?
        .set_default("catalog.api_url", defaults.catalog.api_url)?
        .set_default("catalog.auth_url", defaults.catalog.auth_url)?
        .set_default("log.level", defaults.log.level)?
        .set_default("log.json", defaults.log.json)?;
    Ok(builder)
}

/// 收集已设置的旧式环境变量
fn legacy_overrides<F>(lookup: F) -> Vec<(&'static str, String)>
where
    F: Fn(&str) -> Option<String>,
{
    LEGACY_ENV_KEYS
        .iter()
        .filter_map(|(name, key)| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .map(|value| (*key, value))
        })
        .collect()
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    for (name, url) in [
        ("llm.url", &config.llm.url),
        ("speech.url", &config.speech.url),
        ("catalog.api_url", &config.catalog.api_url),
        ("catalog.auth_url", &config.catalog.auth_url),
    ] {
        if url.trim().is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "{} cannot be empty",
                name
            )));
        }
    }

    // 重试间隔为 0 会变成空转
    if config.radio.no_track_retry_ms == 0 || config.radio.failure_retry_ms == 0 {
        return Err(ConfigError::ValidationError(
            "Radio retry delays cannot be 0".to_string(),
        ));
    }

    if config.catalog.retry_secs == 0 {
        return Err(ConfigError::ValidationError(
            "Catalog token retry interval cannot be 0".to_string(),
        ));
    }

    Ok(())
}

/// 打码显示密钥
fn mask_secret(secret: &str) -> String {
    if secret.is_empty() {
        return "(not set)".to_string();
    }
    let visible: String = secret.chars().take(4).collect();
    if secret.chars().count() <= 8 {
        "****".to_string()
    } else {
        format!("{}****", visible)
    }
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}", config.server.addr());
    if config.server.static_files.enabled {
        tracing::info!(
            "Static Files: {:?} -> {}",
            config.server.static_files.dir,
            config.server.static_files.path
        );
    }
    tracing::info!("LLM: {} (model {})", config.llm.url, config.llm.model);
    tracing::info!("LLM API Key: {}", mask_secret(&config.llm.api_key));
    tracing::info!("Speech: {} (voice {})", config.speech.url, config.speech.voice_id);
    tracing::info!("Speech API Key: {}", mask_secret(&config.speech.api_key));
    tracing::info!("Catalog: {}", config.catalog.api_url);
    tracing::info!("Catalog Client ID: {}", mask_secret(&config.catalog.client_id));
    tracing::info!("Catalog Client Secret: {}", mask_secret(&config.catalog.client_secret));
    tracing::info!(
        "Radio: talk window {}s, no-track retry {}ms, failure retry {}ms, default track {}ms",
        config.radio.talk_window_secs,
        config.radio.no_track_retry_ms,
        config.radio.failure_retry_ms,
        config.radio.default_track_duration_ms
    );
    tracing::info!("Advance On Song End: {}", config.radio.advance_on_song_end);
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");

    if config.llm.api_key.is_empty() {
        tracing::warn!("LLM API key not set, DJ will use the placeholder script");
    }
    if config.speech.api_key.is_empty() {
        tracing::warn!("Speech API key not set, segments will have no audio");
    }
    if config.catalog.client_id.is_empty() || config.catalog.client_secret.is_empty() {
        tracing::warn!("Catalog credentials not set, songs will not be found");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_validation_passes_for_valid_config() {
        let config = AppConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validation_error_for_zero_port() {
        let mut config = AppConfig::default();
        config.server.port = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_empty_url() {
        let mut config = AppConfig::default();
        config.speech.url = String::new();
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::ValidationError(msg)) if msg.contains("speech.url")
        ));
    }

    #[test]
    fn test_validation_error_for_zero_retry() {
        let mut config = AppConfig::default();
        config.radio.failure_retry_ms = 0;
        assert!(validate_config(&config).is_err());

        let mut config = AppConfig::default();
        config.catalog.retry_secs = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_legacy_overrides() {
        let overrides = legacy_overrides(|name| match name {
            "PORT" => Some("8080".to_string()),
            "DEEPSEEK_API_KEY" => Some("sk-test".to_string()),
            "SPOTIFY_CLIENT_ID" => Some("  ".to_string()),
            _ => None,
        });
        assert_eq!(
            overrides,
            vec![
                ("server.port", "8080".to_string()),
                ("llm.api_key", "sk-test".to_string()),
            ]
        );
    }

    #[test]
    fn test_mask_secret() {
        assert_eq!(mask_secret(""), "(not set)");
        assert_eq!(mask_secret("short"), "****");
        assert_eq!(mask_secret("sk-1234567890"), "sk-1****");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[server]
port = 6001

[radio]
talk_window_secs = 15
advance_on_song_end = true

[speech]
voice_id = "custom-voice"
"#
        )
        .unwrap();

        let config = load_config_from_path(Some(file.path())).unwrap();
        assert_eq!(config.radio.talk_window_secs, 15);
        assert!(config.radio.advance_on_song_end);
        assert_eq!(config.radio.no_track_retry_ms, 5000);
        assert_eq!(config.speech.voice_id, "custom-voice");
        assert_eq!(config.llm.model, "deepseek-chat");
    }

    #[test]
    fn test_invalid_file_rejected() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[radio]\nno_track_retry_ms = 0").unwrap();

        assert!(matches!(
            load_config_from_path(Some(file.path())),
            Err(ConfigError::ValidationError(_))
        ));
    }
}
