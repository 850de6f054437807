//! HTTP Handlers

mod health;
mod radio;
mod websocket;

pub use health::*;
pub use radio::*;
pub use websocket::*;
