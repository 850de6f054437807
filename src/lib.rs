//! RadioDJ - AI 电台 DJ 服务
//!
//! 架构设计: Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Radio: 曲目、口播片段、预告解析、轮次节奏
//!
//! 应用层 (application/):
//! - Ports: 端口定义（ContentProvider, SpeechSynthesizer, TrackResolver, EventSink）
//! - Radio: 会话编排器（Idle ⇄ Cycling 状态机）
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: WebSocket 收听通道 + 控制 API
//! - Adapters: Chat Completion、ElevenLabs、Spotify 客户端
//! - Events: 事件广播与收听者登记

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
