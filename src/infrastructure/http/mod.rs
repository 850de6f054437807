//! HTTP Layer - WebSocket 收听通道 + 控制 API

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

#[cfg(test)]
mod test_support;

pub use routes::create_routes;
pub use server::{HttpServer, ServerConfig};
pub use state::AppState;
