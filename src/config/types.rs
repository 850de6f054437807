//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::application::OrchestratorConfig;
use crate::domain::RadioTiming;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 口播文本生成（Chat Completion）
    #[serde(default)]
    pub llm: LlmConfig,

    /// 语音合成
    #[serde(default)]
    pub speech: SpeechConfig,

    /// 曲库搜索
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// 节目节奏
    #[serde(default)]
    pub radio: RadioConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,

    /// 静态文件服务配置
    #[serde(default)]
    pub static_files: StaticFilesConfig,
}

/// 静态文件服务配置
#[derive(Debug, Clone, Deserialize)]
pub struct StaticFilesConfig {
    /// 是否启用静态文件服务
    #[serde(default)]
    pub enabled: bool,

    /// 前端构建产物目录
    #[serde(default = "default_static_dir")]
    pub dir: PathBuf,

    /// URL 路径前缀（如 "/" 表示根路径托管）
    #[serde(default = "default_static_path")]
    pub path: String,
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("build")
}

fn default_static_path() -> String {
    "/".to_string()
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            dir: default_static_dir(),
            path: default_static_path(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_files: StaticFilesConfig::default(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Chat Completion 配置
#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    /// OpenAI 兼容接口地址
    #[serde(default = "default_llm_url")]
    pub url: String,

    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_llm_model")]
    pub model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// 请求超时时间（秒）
    #[serde(default = "default_remote_timeout")]
    pub timeout_secs: u64,
}

fn default_llm_url() -> String {
    "https://api.deepseek.com/v1".to_string()
}

fn default_llm_model() -> String {
    "deepseek-chat".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    500
}

fn default_remote_timeout() -> u64 {
    60
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            url: default_llm_url(),
            api_key: String::new(),
            model: default_llm_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_remote_timeout(),
        }
    }
}

/// 语音合成配置
#[derive(Debug, Clone, Deserialize)]
pub struct SpeechConfig {
    #[serde(default = "default_speech_url")]
    pub url: String,

    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_voice_id")]
    pub voice_id: String,

    #[serde(default = "default_speech_model")]
    pub model_id: String,

    #[serde(default = "default_stability")]
    pub stability: f32,

    #[serde(default = "default_similarity_boost")]
    pub similarity_boost: f32,

    /// 请求超时时间（秒）
    #[serde(default = "default_remote_timeout")]
    pub timeout_secs: u64,
}

fn default_speech_url() -> String {
    "https://api.elevenlabs.io/v1".to_string()
}

fn default_voice_id() -> String {
    "21m00Tcm4TlvDq8ikWAM".to_string()
}

fn default_speech_model() -> String {
    "eleven_monolingual_v1".to_string()
}

fn default_stability() -> f32 {
    0.5
}

fn default_similarity_boost() -> f32 {
    0.75
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            url: default_speech_url(),
            api_key: String::new(),
            voice_id: default_voice_id(),
            model_id: default_speech_model(),
            stability: default_stability(),
            similarity_boost: default_similarity_boost(),
            timeout_secs: default_remote_timeout(),
        }
    }
}

/// 曲库配置
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    #[serde(default = "default_catalog_api_url")]
    pub api_url: String,

    /// client-credentials 授权端点
    #[serde(default = "default_catalog_auth_url")]
    pub auth_url: String,

    #[serde(default)]
    pub client_id: String,

    #[serde(default)]
    pub client_secret: String,

    /// 令牌到期前多久刷新（秒）
    #[serde(default = "default_refresh_margin")]
    pub refresh_margin_secs: u64,

    /// 刷新失败后的重试间隔（秒）
    #[serde(default = "default_refresh_retry")]
    pub retry_secs: u64,

    /// 请求超时时间（秒）
    #[serde(default = "default_catalog_timeout")]
    pub timeout_secs: u64,
}

fn default_catalog_api_url() -> String {
    "https://api.spotify.com/v1".to_string()
}

fn default_catalog_auth_url() -> String {
    "https://accounts.spotify.com/api/token".to_string()
}

fn default_refresh_margin() -> u64 {
    60
}

fn default_refresh_retry() -> u64 {
    30
}

fn default_catalog_timeout() -> u64 {
    30
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            api_url: default_catalog_api_url(),
            auth_url: default_catalog_auth_url(),
            client_id: String::new(),
            client_secret: String::new(),
            refresh_margin_secs: default_refresh_margin(),
            retry_secs: default_refresh_retry(),
            timeout_secs: default_catalog_timeout(),
        }
    }
}

/// 节目节奏配置
#[derive(Debug, Clone, Deserialize)]
pub struct RadioConfig {
    /// 口播窗口（秒），发布 DJ 片段后到开始播歌的间隔
    #[serde(default = "default_talk_window")]
    pub talk_window_secs: u64,

    /// 未找到曲目时的重试间隔（毫秒）
    #[serde(default = "default_no_track_retry")]
    pub no_track_retry_ms: u64,

    /// 本轮失败后的重试间隔（毫秒）
    #[serde(default = "default_failure_retry")]
    pub failure_retry_ms: u64,

    /// 曲目缺少时长时使用的默认值（毫秒）
    #[serde(default = "default_track_duration")]
    pub default_track_duration_ms: u64,

    /// 收到 song_ended 时是否提前进入下一轮
    #[serde(default)]
    pub advance_on_song_end: bool,
}

fn default_talk_window() -> u64 {
    60
}

fn default_no_track_retry() -> u64 {
    5000
}

fn default_failure_retry() -> u64 {
    10000
}

fn default_track_duration() -> u64 {
    30000
}

impl Default for RadioConfig {
    fn default() -> Self {
        Self {
            talk_window_secs: default_talk_window(),
            no_track_retry_ms: default_no_track_retry(),
            failure_retry_ms: default_failure_retry(),
            default_track_duration_ms: default_track_duration(),
            advance_on_song_end: false,
        }
    }
}

impl From<&RadioConfig> for OrchestratorConfig {
    fn from(config: &RadioConfig) -> Self {
        OrchestratorConfig {
            timing: RadioTiming {
                talk_window: Duration::from_secs(config.talk_window_secs),
                no_track_retry: Duration::from_millis(config.no_track_retry_ms),
                failure_retry: Duration::from_millis(config.failure_retry_ms),
                default_track_duration: Duration::from_millis(config.default_track_duration_ms),
            },
            advance_on_song_end: config.advance_on_song_end,
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
