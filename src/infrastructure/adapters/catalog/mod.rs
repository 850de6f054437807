//! Catalog Adapter - Spotify 曲库搜索
//!
//! - SpotifyTokenManager: client-credentials 令牌获取与后台定时刷新
//! - SpotifyClient: TrackResolverPort 实现

mod spotify_client;
mod token_manager;

pub use spotify_client::{SpotifyClient, SpotifyClientConfig};
pub use token_manager::{SpotifyTokenManager, SpotifyTokenManagerConfig};
