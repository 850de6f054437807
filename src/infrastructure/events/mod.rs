//! Events - 收听者事件通道
//!
//! 出站事件的线上格式、入站控制信号，以及广播发布器

mod publisher;
mod wire;

pub use publisher::EventPublisher;
pub use wire::{ClientSignal, SongDetails, WsEvent};
