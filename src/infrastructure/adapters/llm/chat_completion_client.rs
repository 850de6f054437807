//! Chat Completion Client - 生成 DJ 口播
//!
//! 实现 ContentProviderPort trait，调用 OpenAI 兼容接口（默认 DeepSeek）
//!
//! POST {base_url}/chat/completions
//! Request: {"model": "...", "messages": [{"role": "user", "content": "..."}], ...}
//! Response: {"choices": [{"message": {"content": "..."}}]}

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::application::ports::{ContentError, ContentProviderPort, PLACEHOLDER_SCRIPT};

const DJ_PROMPT: &str = "Act as a funny, engaging radio DJ. Share some jokes and discuss recent world news for about 1 minute worth of talking.";

const ANNOUNCE_PROMPT: &str = " In the last 5 seconds, announce the next song that will be played by saying something like 'Coming up next is [SONG NAME] by [ARTIST NAME]!'";

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Chat Completion 客户端配置
#[derive(Debug, Clone)]
pub struct ChatCompletionClientConfig {
    /// API 基础 URL（不含 /chat/completions）
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for ChatCompletionClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.deepseek.com/v1".to_string(),
            api_key: String::new(),
            model: "deepseek-chat".to_string(),
            temperature: 0.7,
            max_tokens: 500,
            timeout_secs: 60,
        }
    }
}

impl ChatCompletionClientConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// 构建 DJ 提示词
pub fn build_prompt(announce_next: bool) -> String {
    let mut prompt = DJ_PROMPT.to_string();
    if announce_next {
        prompt.push_str(ANNOUNCE_PROMPT);
    }
    prompt
}

/// Chat Completion 客户端
pub struct ChatCompletionClient {
    client: Client,
    config: ChatCompletionClientConfig,
}

impl ChatCompletionClient {
    pub fn new(config: ChatCompletionClientConfig) -> Result<Self, ContentError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ContentError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }

    /// 调用远程模型，失败时返回错误
    async fn request_completion(&self, prompt: &str) -> Result<String, ContentError> {
        let body = ChatRequest {
            model: &self.config.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        tracing::debug!(
            url = %self.completions_url(),
            model = %self.config.model,
            prompt_len = prompt.len(),
            "Sending chat completion request"
        );

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ContentError::Timeout
                } else {
                    ContentError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ContentError::ServiceError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| ContentError::InvalidResponse(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| ContentError::InvalidResponse("empty completion".to_string()))
    }
}

#[async_trait]
impl ContentProviderPort for ChatCompletionClient {
    async fn generate_monologue(&self, announce_next: bool) -> Result<String, ContentError> {
        let prompt = build_prompt(announce_next);
        match self.request_completion(&prompt).await {
            Ok(script) => {
                tracing::info!(script_len = script.len(), "DJ script generated");
                Ok(script)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Script generation failed, using placeholder");
                Ok(PLACEHOLDER_SCRIPT.to_string())
            }
        }
    }
}
