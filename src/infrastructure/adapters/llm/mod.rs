//! LLM Adapter - OpenAI 兼容的 Chat Completion 客户端

mod chat_completion_client;

pub use chat_completion_client::*;
